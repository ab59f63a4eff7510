//! Built-in portfolio choreography
//!
//! Six equal sections. The camera dollies in from z = 15 while widening its
//! field of view and turning a full revolution; the avatar grows, recedes and
//! turns with it.

use std::f32::consts::PI;

use crate::timeline::Section;
use crate::types::{AvatarProperty, CameraProperty, TransformState};

use super::TrackSettings;

/// Page sections, in scroll order
pub const SECTION_LABELS: [&str; 6] = ["Home", "About", "Experience", "Skills", "Projects", "Contact"];

/// Camera starting pose: pulled back on the z axis with a 50 degree FOV
pub fn camera_initial() -> TransformState<CameraProperty> {
    use CameraProperty::*;
    TransformState::new()
        .with(X, 0.0)
        .with(Y, 0.0)
        .with(Z, 15.0)
        .with(RotX, 0.0)
        .with(RotY, 0.0)
        .with(RotZ, 0.0)
        .with(Fov, 50.0)
}

/// Avatar starting pose: at the origin, unit scale, facing forward
pub fn avatar_initial() -> TransformState<AvatarProperty> {
    use AvatarProperty::*;
    TransformState::new()
        .with(PosX, 0.0)
        .with(PosY, 0.0)
        .with(PosZ, 0.0)
        .with(ScaleX, 1.0)
        .with(ScaleY, 1.0)
        .with(ScaleZ, 1.0)
        .with(RotY, 0.0)
}

fn camera_pose(x: f32, y: f32, z: f32, rot_y: f32, fov: f32) -> TransformState<CameraProperty> {
    use CameraProperty::*;
    TransformState::new()
        .with(X, x)
        .with(Y, y)
        .with(Z, z)
        .with(RotY, rot_y)
        .with(Fov, fov)
}

fn avatar_pose(position: [f32; 3], scale: f32, rot_y: f32) -> TransformState<AvatarProperty> {
    use AvatarProperty::*;
    TransformState::new()
        .with(PosX, position[0])
        .with(PosY, position[1])
        .with(PosZ, position[2])
        .with(ScaleX, scale)
        .with(ScaleY, scale)
        .with(ScaleZ, scale)
        .with(RotY, rot_y)
}

pub fn camera_track() -> TrackSettings<CameraProperty> {
    let poses = [
        camera_pose(0.0, 0.0, 12.0, 0.0, 45.0),
        camera_pose(-2.0, 1.0, 10.0, PI / 4.0, 50.0),
        camera_pose(2.0, -1.0, 8.0, PI / 2.0, 55.0),
        camera_pose(0.0, 0.0, 6.0, PI, 60.0),
        camera_pose(0.0, -2.0, 5.0, PI * 1.5, 65.0),
        camera_pose(0.0, -3.0, 4.0, PI * 2.0, 70.0),
    ];
    TrackSettings::Sections {
        initial: camera_initial(),
        sections: SECTION_LABELS
            .iter()
            .zip(poses)
            .map(|(label, to)| Section::new(*label, to))
            .collect(),
    }
}

pub fn avatar_track() -> TrackSettings<AvatarProperty> {
    let poses = [
        avatar_pose([0.0, 0.0, 10.0], 5.0, 0.0),
        avatar_pose([-2.0, 1.0, 12.0], 6.0, PI / 4.0),
        avatar_pose([2.0, -1.0, 14.0], 7.0, PI / 2.0),
        avatar_pose([0.0, 0.0, 18.0], 9.0, PI),
        avatar_pose([0.0, -2.0, 20.0], 10.0, PI * 1.5),
        avatar_pose([0.0, -3.0, 22.0], 8.0, PI * 2.0),
    ];
    TrackSettings::Sections {
        initial: avatar_initial(),
        sections: SECTION_LABELS
            .iter()
            .zip(poses)
            .map(|(label, to)| Section::new(*label, to))
            .collect(),
    }
}
