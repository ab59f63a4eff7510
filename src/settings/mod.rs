//! Rig settings
//!
//! [`RigSettings`] bundles the smoothing parameters with both track
//! choreographies. It defaults to the built-in portfolio choreography and
//! can be loaded from, or saved to, RON. Use [`RigSettingsBuilder`] to
//! override individual parts in code.

mod portfolio;
mod smoothing;
mod track;

pub use portfolio::SECTION_LABELS;
pub use smoothing::*;
pub use track::*;

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::timeline::Track;
use crate::types::{AvatarProperty, CameraProperty};

/// Complete rig configuration
#[derive(Clone, Debug, PartialEq, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct RigSettings {
    pub smoothing: SmoothingSettings,
    pub camera: TrackSettings<CameraProperty>,
    pub avatar: TrackSettings<AvatarProperty>,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self::portfolio()
    }
}

impl RigSettings {
    /// Six-section portfolio choreography
    pub fn portfolio() -> Self {
        Self {
            smoothing: SmoothingSettings::default(),
            camera: portfolio::camera_track(),
            avatar: portfolio::avatar_track(),
        }
    }

    /// Validate everything and build both tracks
    pub fn build_tracks(&self) -> Result<(Track<CameraProperty>, Track<AvatarProperty>), RigError> {
        self.smoothing.validate()?;
        Ok((self.camera.build()?, self.avatar.build()?))
    }

    pub fn validate(&self) -> Result<(), RigError> {
        self.build_tracks().map(|_| ())
    }

    /// Parse settings from RON; omitted fields keep their defaults
    pub fn from_ron_str(source: &str) -> Result<Self, RigError> {
        let settings: Self = ron::from_str(source)?;
        Ok(settings)
    }

    pub fn to_ron_string(&self) -> Result<String, RigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Load settings from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_ron_str(&content)
    }

    /// Save settings to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RigError> {
        std::fs::write(path.as_ref(), self.to_ron_string()?)?;
        Ok(())
    }
}

/// Builder for configuring the rig settings at once
///
/// # Example
/// ```no_run
/// use bevy_scroll_rig::settings::RigSettingsBuilder;
///
/// let settings = RigSettingsBuilder::default()
///     .alpha(0.12)
///     .build();
/// ```
#[derive(Default)]
pub struct RigSettingsBuilder {
    settings: RigSettings,
}

impl From<RigSettings> for RigSettingsBuilder {
    fn from(settings: RigSettings) -> Self {
        Self { settings }
    }
}

impl RigSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.settings.smoothing.alpha = alpha;
        self
    }

    pub fn snap_epsilon(mut self, snap_epsilon: f32) -> Self {
        self.settings.smoothing.snap_epsilon = snap_epsilon;
        self
    }

    pub fn camera(mut self, camera: TrackSettings<CameraProperty>) -> Self {
        self.settings.camera = camera;
        self
    }

    pub fn avatar(mut self, avatar: TrackSettings<AvatarProperty>) -> Self {
        self.settings.avatar = avatar;
        self
    }

    pub fn build(self) -> RigSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TransformState, Waypoint};

    #[test]
    fn test_default_is_valid() {
        let settings = RigSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.smoothing.alpha, 0.08);
    }

    #[test]
    fn test_ron_round_trip() {
        let settings = RigSettingsBuilder::new().alpha(0.2).build();
        let ron = settings.to_ron_string().unwrap();
        let parsed = RigSettings::from_ron_str(&ron).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let ron = r#"(
            smoothing: (alpha: 0.2),
            camera: Waypoints([
                (progress_start: 0.0, progress_end: 1.0, from: {fov: 45.0}, to: {fov: 70.0}),
            ]),
        )"#;
        let settings = RigSettings::from_ron_str(ron).unwrap();

        assert_eq!(settings.smoothing.alpha, 0.2);
        assert_eq!(settings.smoothing.snap_epsilon, SmoothingSettings::default().snap_epsilon);
        assert_eq!(settings.avatar, RigSettings::default().avatar);

        let (camera, _) = settings.build_tracks().unwrap();
        assert_eq!(camera.sample(0.5).get(CameraProperty::Fov), Some(57.5));
    }

    #[test]
    fn test_malformed_ron_is_a_parse_error() {
        let err = RigSettings::from_ron_str("(smoothing: (alpha: \"fast\"))").unwrap_err();
        assert!(matches!(err, RigError::SettingsParse(_)));
    }

    #[test]
    fn test_invalid_settings_are_reported() {
        let settings = RigSettingsBuilder::new().alpha(0.0).build();
        assert!(matches!(settings.validate(), Err(RigError::InvalidSmoothing { .. })));

        let gap = TrackSettings::Waypoints(vec![
            Waypoint::new(0.0, 0.4, TransformState::new(), TransformState::new()),
            Waypoint::new(0.5, 1.0, TransformState::new(), TransformState::new()),
        ]);
        let settings = RigSettingsBuilder::new().camera(gap).build();
        assert!(matches!(settings.validate(), Err(RigError::NonContiguous { index: 1, .. })));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("scroll_rig_{}.ron", std::process::id()));
        let settings = RigSettingsBuilder::new().snap_epsilon(0.0).build();

        settings.save(&path).unwrap();
        let loaded = RigSettings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RigSettings::load("/nonexistent/scroll_rig.ron").unwrap_err();
        assert!(matches!(err, RigError::Io(_)));
    }
}
