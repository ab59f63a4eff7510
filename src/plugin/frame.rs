//! Frame callback: eases the camera and avatar toward the timeline targets

use bevy::prelude::*;

use crate::smoother::FrameSmoother;
use crate::timeline::ScrollTimeline;
use crate::types::{AvatarProperty, CameraProperty, TransformState};

/// Advance both live states one step and write them to their entities
///
/// Each entity's live state is seeded from the entity itself the first time
/// it is found. Missing entities are skipped for the frame.
pub fn smooth_frame(
    mut smoother: ResMut<FrameSmoother>,
    timeline: Option<Res<ScrollTimeline>>,
    mut transforms: ParamSet<(
        Query<(&mut Transform, Option<&mut Projection>)>,
        Query<&mut Transform>,
    )>,
) {
    let empty_camera = TransformState::new();
    let empty_avatar = TransformState::new();
    let (camera_target, avatar_target) = match timeline.as_deref() {
        Some(timeline) => (timeline.camera_target(), timeline.avatar_target()),
        None => (&empty_camera, &empty_avatar),
    };

    let camera = smoother.camera();
    match transforms.p0().get_mut(camera) {
        Ok((mut transform, mut projection)) => {
            let live = smoother.step_camera(
                || camera_state(&transform, projection.as_deref()),
                camera_target,
            );
            let next = camera_transform(&transform, live);
            transform.set_if_neq(next);

            let perspective = match (projection.as_mut(), live.get(CameraProperty::Fov)) {
                (Some(projection), Some(fov)) => apply_fov(projection, fov),
                (Some(projection), None) => matches!(**projection, Projection::Perspective(_)),
                (None, _) => false,
            };
            if !perspective && camera_target.contains(CameraProperty::Fov) {
                warn_once!("Scroll rig camera {:?} has no perspective projection, ignoring fov", camera);
            }
        }
        Err(_) => debug!("Rig camera {:?} unavailable, skipping", camera),
    }

    let avatar = smoother.avatar();
    match transforms.p1().get_mut(avatar) {
        Ok(mut transform) => {
            let live = smoother.step_avatar(|| avatar_state(&transform), avatar_target);
            let next = avatar_transform(&transform, live);
            transform.set_if_neq(next);
        }
        Err(_) => debug!("Rig avatar {:?} unavailable, skipping", avatar),
    }
}

/// Write a fov in degrees to a perspective projection
///
/// Returns `false` for other projections. The projection is only marked
/// changed when the value differs.
fn apply_fov(projection: &mut Mut<Projection>, fov_degrees: f32) -> bool {
    let Projection::Perspective(perspective) = projection.bypass_change_detection() else {
        return false;
    };
    let fov = fov_degrees.to_radians();
    if perspective.fov != fov {
        perspective.fov = fov;
        projection.set_changed();
    }
    true
}

/// Current camera pose as a full property set (fov in degrees)
pub(crate) fn camera_state(transform: &Transform, projection: Option<&Projection>) -> TransformState<CameraProperty> {
    let (rot_x, rot_y, rot_z) = transform.rotation.to_euler(EulerRot::XYZ);
    let state = TransformState::new()
        .with(CameraProperty::X, transform.translation.x)
        .with(CameraProperty::Y, transform.translation.y)
        .with(CameraProperty::Z, transform.translation.z)
        .with(CameraProperty::RotX, rot_x)
        .with(CameraProperty::RotY, rot_y)
        .with(CameraProperty::RotZ, rot_z);
    match projection {
        Some(Projection::Perspective(perspective)) => state.with(CameraProperty::Fov, perspective.fov.to_degrees()),
        _ => state,
    }
}

/// Current avatar pose; of the rotation only the yaw is tracked
pub(crate) fn avatar_state(transform: &Transform) -> TransformState<AvatarProperty> {
    let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
    TransformState::new()
        .with(AvatarProperty::PosX, transform.translation.x)
        .with(AvatarProperty::PosY, transform.translation.y)
        .with(AvatarProperty::PosZ, transform.translation.z)
        .with(AvatarProperty::ScaleX, transform.scale.x)
        .with(AvatarProperty::ScaleY, transform.scale.y)
        .with(AvatarProperty::ScaleZ, transform.scale.z)
        .with(AvatarProperty::RotY, yaw)
}

pub(crate) fn camera_transform(current: &Transform, live: &TransformState<CameraProperty>) -> Transform {
    let value = |property, fallback| live.get(property).unwrap_or(fallback);
    let (rot_x, rot_y, rot_z) = current.rotation.to_euler(EulerRot::XYZ);
    Transform {
        translation: Vec3::new(
            value(CameraProperty::X, current.translation.x),
            value(CameraProperty::Y, current.translation.y),
            value(CameraProperty::Z, current.translation.z),
        ),
        rotation: Quat::from_euler(
            EulerRot::XYZ,
            value(CameraProperty::RotX, rot_x),
            value(CameraProperty::RotY, rot_y),
            value(CameraProperty::RotZ, rot_z),
        ),
        scale: current.scale,
    }
}

pub(crate) fn avatar_transform(current: &Transform, live: &TransformState<AvatarProperty>) -> Transform {
    let value = |property, fallback| live.get(property).unwrap_or(fallback);
    // Only the yaw is tracked; pitch and roll stay as they are
    let rotation = match live.get(AvatarProperty::RotY) {
        Some(yaw) => {
            let (_, pitch, roll) = current.rotation.to_euler(EulerRot::YXZ);
            Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll)
        }
        None => current.rotation,
    };
    Transform {
        translation: Vec3::new(
            value(AvatarProperty::PosX, current.translation.x),
            value(AvatarProperty::PosY, current.translation.y),
            value(AvatarProperty::PosZ, current.translation.z),
        ),
        rotation,
        scale: Vec3::new(
            value(AvatarProperty::ScaleX, current.scale.x),
            value(AvatarProperty::ScaleY, current.scale.y),
            value(AvatarProperty::ScaleZ, current.scale.z),
        ),
    }
}
