//! Bevy plugin driving the camera and avatar from a scroll container
//!
//! The plugin only registers systems. Nothing moves until the host mounts a
//! rig with [`ScrollRigExt::mount_scroll_rig`], which inserts the
//! [`ScrollTimeline`] and [`FrameSmoother`] resources the systems run on.

mod frame;
mod scroll;
mod spin;

pub use frame::smooth_frame;
pub use scroll::track_scroll;
pub use spin::{spin_decorations, Spin};

use bevy::prelude::*;

use crate::error::RigError;
use crate::events::SectionChanged;
use crate::settings::RigSettings;
use crate::smoother::FrameSmoother;
use crate::timeline::ScrollTimeline;

/// Rig system ordering within `Update`
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RigSet {
    /// Scroll position -> target states
    Timeline,
    /// Target states -> live transforms
    Smoothing,
}

/// Scroll rig plugin
pub struct ScrollRigPlugin {
    settings: RigSettings,
}

impl ScrollRigPlugin {
    /// Create the plugin with the built-in portfolio choreography
    ///
    /// # Example
    /// ```no_run
    /// use bevy::prelude::*;
    /// use bevy_scroll_rig::prelude::*;
    ///
    /// App::new()
    ///     .add_plugins(DefaultPlugins)
    ///     .add_plugins(ScrollRigPlugin::new())
    ///     .run();
    /// ```
    pub fn new() -> Self {
        Self {
            settings: RigSettings::default(),
        }
    }

    /// Set custom rig settings
    ///
    /// These become the `RigSettings` resource; they are only applied when a
    /// rig is mounted.
    pub fn with_settings(mut self, settings: RigSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl Default for ScrollRigPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ScrollRigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.clone());
        app.add_message::<SectionChanged>();

        app.configure_sets(Update, (RigSet::Timeline, RigSet::Smoothing).chain());
        app.add_systems(
            Update,
            track_scroll
                .in_set(RigSet::Timeline)
                .run_if(resource_exists::<ScrollTimeline>),
        );
        app.add_systems(
            Update,
            smooth_frame
                .in_set(RigSet::Smoothing)
                .run_if(resource_exists::<FrameSmoother>),
        );
        app.add_systems(Update, spin_decorations);
    }
}

/// Entities a rig is attached to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RigEntities {
    /// UI node with `ScrollPosition` whose scroll drives the timeline
    pub container: Entity,
    /// Entity with a `Transform` following the avatar track
    pub avatar: Entity,
    /// Camera entity following the camera track
    pub camera: Entity,
}

/// Mount and unmount rigs
///
/// Mounting validates the settings eagerly and fails without touching the
/// world. Mounting again replaces the current rig; unmounting when nothing is
/// mounted is a no-op.
pub trait ScrollRigExt {
    fn mount_scroll_rig(&mut self, settings: &RigSettings, entities: RigEntities) -> Result<(), RigError>;

    fn unmount_scroll_rig(&mut self);
}

fn build_rig(settings: &RigSettings, entities: RigEntities) -> Result<(ScrollTimeline, FrameSmoother), RigError> {
    let (camera, avatar) = settings.build_tracks()?;
    let smoother = FrameSmoother::new(&settings.smoothing, entities.avatar, entities.camera)?;
    info!(
        "Mounting scroll rig on {:?}: {} camera / {} avatar waypoints",
        entities.container,
        camera.len(),
        avatar.len()
    );
    Ok((ScrollTimeline::new(entities.container, camera, avatar), smoother))
}

impl ScrollRigExt for Commands<'_, '_> {
    fn mount_scroll_rig(&mut self, settings: &RigSettings, entities: RigEntities) -> Result<(), RigError> {
        let (timeline, smoother) = build_rig(settings, entities)?;
        self.insert_resource(timeline);
        self.insert_resource(smoother);
        Ok(())
    }

    fn unmount_scroll_rig(&mut self) {
        info!("Unmounting scroll rig");
        self.remove_resource::<ScrollTimeline>();
        self.remove_resource::<FrameSmoother>();
    }
}

impl ScrollRigExt for World {
    fn mount_scroll_rig(&mut self, settings: &RigSettings, entities: RigEntities) -> Result<(), RigError> {
        let (timeline, smoother) = build_rig(settings, entities)?;
        self.insert_resource(timeline);
        self.insert_resource(smoother);
        Ok(())
    }

    fn unmount_scroll_rig(&mut self) {
        let timeline = self.remove_resource::<ScrollTimeline>();
        let smoother = self.remove_resource::<FrameSmoother>();
        if timeline.is_some() || smoother.is_some() {
            info!("Unmounted scroll rig");
        }
    }
}
