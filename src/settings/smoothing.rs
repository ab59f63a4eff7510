//! Frame smoothing settings

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::smoother::{DEFAULT_ALPHA, DEFAULT_SNAP_EPSILON};

/// Smoothing settings
#[derive(Clone, Debug, PartialEq, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingSettings {
    /// Fraction of the remaining distance covered each frame, in (0, 1]
    pub alpha: f32,

    /// Distance at which a live value snaps onto its target
    pub snap_epsilon: f32,
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            snap_epsilon: DEFAULT_SNAP_EPSILON,
        }
    }
}

impl SmoothingSettings {
    /// Check the ranges without building a smoother
    pub fn validate(&self) -> Result<(), RigError> {
        let alpha_ok = self.alpha.is_finite() && self.alpha > 0.0 && self.alpha <= 1.0;
        let epsilon_ok = self.snap_epsilon.is_finite() && self.snap_epsilon >= 0.0;
        if alpha_ok && epsilon_ok {
            Ok(())
        } else {
            Err(RigError::InvalidSmoothing {
                alpha: self.alpha,
                snap_epsilon: self.snap_epsilon,
            })
        }
    }
}
