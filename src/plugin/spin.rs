//! Constant-rate decorative rotation

use bevy::prelude::*;

/// Rotates an entity by a fixed amount every frame
///
/// Runs whether or not a rig is mounted. Put it on a child of the rig
/// avatar rather than the avatar itself, since the rig overwrites the avatar
/// rotation every frame.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    /// Radians per frame around the local X, Y and Z axes
    pub rate: Vec3,
}

impl Spin {
    pub fn new(rate: Vec3) -> Self {
        Self { rate }
    }

    /// Slow tumble used for the background sphere
    pub fn sphere() -> Self {
        Self::new(Vec3::new(0.002, 0.004, 0.0))
    }

    /// Idle turn for the avatar model
    pub fn idle() -> Self {
        Self::new(Vec3::new(0.0, 0.003, 0.0))
    }
}

pub fn spin_decorations(mut spinning: Query<(&mut Transform, &Spin)>) {
    for (mut transform, spin) in &mut spinning {
        if spin.rate == Vec3::ZERO {
            continue;
        }
        transform.rotate_local_x(spin.rate.x);
        transform.rotate_local_y(spin.rate.y);
        transform.rotate_local_z(spin.rate.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_accumulates_per_frame() {
        let mut app = App::new();
        app.add_systems(Update, spin_decorations);
        let idle = app.world_mut().spawn((Transform::default(), Spin::idle())).id();
        let still = app.world_mut().spawn((Transform::default(), Spin::new(Vec3::ZERO))).id();

        for _ in 0..10 {
            app.update();
        }

        let rotation = app.world().get::<Transform>(idle).unwrap().rotation;
        assert!(rotation.abs_diff_eq(Quat::from_rotation_y(0.03), 1e-5));

        let still = app.world().get::<Transform>(still).unwrap().rotation;
        assert_eq!(still, Quat::IDENTITY);
    }
}
