//! # Bevy Scroll Rig
//!
//! Scroll-driven camera and avatar choreography for Bevy.
//!
//! The scroll position of a UI container is normalized into a progress value
//! in `[0, 1]`, which picks a target pose for the camera and for an avatar
//! entity from two waypoint tracks. Every frame both entities ease a fixed
//! fraction of the way toward their targets.
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_scroll_rig::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ScrollRigPlugin::new())
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands, settings: Res<RigSettings>) {
//!     let camera = commands.spawn((Camera3d::default(), Transform::from_xyz(0.0, 0.0, 15.0))).id();
//!     let avatar = commands.spawn(Transform::default()).id();
//!     let container = commands
//!         .spawn((Node { overflow: Overflow::scroll_y(), ..default() }, ScrollPosition::default()))
//!         .id();
//!
//!     if let Err(err) = commands.mount_scroll_rig(&settings, RigEntities { container, avatar, camera }) {
//!         error!("Invalid rig settings: {err}");
//!     }
//! }
//! ```
//!
//! ## Custom choreography
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_scroll_rig::prelude::*;
//!
//! fn main() {
//!     let settings = RigSettings::load("assets/rig.ron").unwrap_or_default();
//!
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ScrollRigPlugin::new().with_settings(settings))
//!         .run();
//! }
//! ```

pub mod error;
pub mod events;
pub mod plugin;
pub mod settings;
pub mod smoother;
pub mod timeline;
pub mod types;

pub mod prelude {
    //! Convenient re-exports for common usage
    pub use crate::error::RigError;
    pub use crate::events::SectionChanged;
    pub use crate::plugin::{RigEntities, RigSet, ScrollRigExt, ScrollRigPlugin, Spin};
    pub use crate::settings::*;
    pub use crate::smoother::FrameSmoother;
    pub use crate::timeline::{ScrollSample, ScrollTimeline, Section, Track};
    pub use crate::types::*;
}
