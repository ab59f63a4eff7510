//! Per-frame exponential smoothing of live transform values
//!
//! Each frame every live property moves a fixed fraction `alpha` of the way
//! towards its target, so motion eases out and never overshoots for
//! `0 < alpha < 1`.

use bevy::prelude::*;

use crate::error::RigError;
use crate::settings::SmoothingSettings;
use crate::types::{lerp, AvatarProperty, CameraProperty, TrackProperty, TransformState};

/// Default per-frame smoothing factor
pub const DEFAULT_ALPHA: f32 = 0.08;

/// Default distance below which a live value snaps onto its target
pub const DEFAULT_SNAP_EPSILON: f32 = 1e-4;

/// Move every live property one smoothing step towards its target
///
/// Properties missing from `target` hold their live value, and target
/// properties missing from `live` are ignored (the live state is seeded from
/// the entity, not from the target). Returns `true` if any value changed.
pub fn smooth_toward<P: TrackProperty>(
    live: &mut TransformState<P>,
    target: &TransformState<P>,
    alpha: f32,
    snap_epsilon: f32,
) -> bool {
    let mut changed = false;
    for &property in P::ALL {
        let (Some(current), Some(goal)) = (live.get(property), target.get(property)) else {
            continue;
        };

        let next = if (goal - current).abs() <= snap_epsilon {
            goal
        } else {
            lerp(current, goal, alpha)
        };

        if next != current {
            live.set(property, next);
            changed = true;
        }
    }
    changed
}

/// Upper bound on the frames needed to bring a distance within `epsilon`
///
/// Solves `distance * (1 - alpha)^n <= epsilon` for `n`.
pub fn frames_to_converge(distance: f32, epsilon: f32, alpha: f32) -> u32 {
    let distance = distance.abs();
    if distance <= epsilon || alpha >= 1.0 {
        return u32::from(distance > epsilon);
    }
    if alpha <= 0.0 || epsilon <= 0.0 {
        return u32::MAX;
    }
    let frames = (epsilon / distance).ln() / (1.0 - alpha).ln();
    frames.ceil() as u32
}

/// Frame callback state: smoothing parameters, the entities being driven and
/// their live values
///
/// Present as a resource only while the rig is mounted; removing it stops the
/// frame system.
#[derive(Resource, Clone, Debug)]
pub struct FrameSmoother {
    alpha: f32,
    snap_epsilon: f32,
    avatar: Entity,
    camera: Entity,
    camera_live: Option<TransformState<CameraProperty>>,
    avatar_live: Option<TransformState<AvatarProperty>>,
}

impl FrameSmoother {
    /// Create a smoother for the given entities
    ///
    /// Live states stay empty until each entity is first seen, at which point
    /// they are seeded from the entity's own transform.
    pub fn new(settings: &SmoothingSettings, avatar: Entity, camera: Entity) -> Result<Self, RigError> {
        settings.validate()?;
        Ok(Self {
            alpha: settings.alpha,
            snap_epsilon: settings.snap_epsilon,
            avatar,
            camera,
            camera_live: None,
            avatar_live: None,
        })
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn snap_epsilon(&self) -> f32 {
        self.snap_epsilon
    }

    pub fn avatar(&self) -> Entity {
        self.avatar
    }

    pub fn camera(&self) -> Entity {
        self.camera
    }

    pub fn camera_live(&self) -> Option<&TransformState<CameraProperty>> {
        self.camera_live.as_ref()
    }

    pub fn avatar_live(&self) -> Option<&TransformState<AvatarProperty>> {
        self.avatar_live.as_ref()
    }

    /// Advance the camera live state, seeding it with `seed` on first use
    pub fn step_camera(
        &mut self,
        seed: impl FnOnce() -> TransformState<CameraProperty>,
        target: &TransformState<CameraProperty>,
    ) -> &TransformState<CameraProperty> {
        let live = self.camera_live.get_or_insert_with(seed);
        smooth_toward(live, target, self.alpha, self.snap_epsilon);
        live
    }

    /// Advance the avatar live state, seeding it with `seed` on first use
    pub fn step_avatar(
        &mut self,
        seed: impl FnOnce() -> TransformState<AvatarProperty>,
        target: &TransformState<AvatarProperty>,
    ) -> &TransformState<AvatarProperty> {
        let live = self.avatar_live.get_or_insert_with(seed);
        smooth_toward(live, target, self.alpha, self.snap_epsilon);
        live
    }
}
