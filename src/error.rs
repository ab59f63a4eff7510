//! Configuration errors
//!
//! Everything here is raised while building a rig (validating waypoints,
//! loading settings). Runtime hiccups such as a missing entity or a zero
//! scroll extent are handled in place by the systems and never surface as
//! errors.

use thiserror::Error;

use crate::types::TrackKind;

/// Error raised when rig configuration is rejected
#[derive(Debug, Error)]
pub enum RigError {
    /// A track was configured without any waypoints or sections
    #[error("{track} track has no waypoints")]
    EmptyTrack { track: TrackKind },

    /// A waypoint range is inverted, non-finite or leaves [0, 1]
    #[error("{track} waypoint {index} has an invalid progress range [{start}, {end}]")]
    InvalidRange {
        track: TrackKind,
        index: usize,
        start: f32,
        end: f32,
    },

    /// The waypoints do not start at 0 or do not end at 1
    #[error("{track} track must cover [0, 1] but covers [{start}, {end}]")]
    IncompleteCoverage {
        track: TrackKind,
        start: f32,
        end: f32,
    },

    /// The first or last waypoint spans no progress at all
    #[error("{track} waypoint {index} has zero length at the end of the track")]
    ZeroLengthEnd { track: TrackKind, index: usize },

    /// A waypoint does not start where the previous one ends
    #[error("{track} waypoint {index} starts at {start} but the previous waypoint ends at {previous_end}")]
    NonContiguous {
        track: TrackKind,
        index: usize,
        start: f32,
        previous_end: f32,
    },

    /// `from` and `to` of a waypoint animate different properties
    #[error("{track} waypoint {index} does not animate the same properties in `from` and `to`")]
    MismatchedProperties { track: TrackKind, index: usize },

    /// A property value is NaN or infinite
    #[error("{track} waypoint {index} has a non-finite value for `{property}`")]
    NonFiniteValue {
        track: TrackKind,
        index: usize,
        property: &'static str,
    },

    /// A section duration is zero, negative or non-finite
    #[error("{track} section {index} has an invalid duration {duration}")]
    InvalidDuration {
        track: TrackKind,
        index: usize,
        duration: f32,
    },

    /// Smoothing factor or snap epsilon out of range
    #[error("smoothing factor must be in (0, 1] and snap epsilon non-negative, got alpha {alpha} and epsilon {snap_epsilon}")]
    InvalidSmoothing { alpha: f32, snap_epsilon: f32 },

    /// RON settings could not be parsed
    #[error("failed to parse rig settings: {0}")]
    SettingsParse(#[from] ron::error::SpannedError),

    /// RON settings could not be written
    #[error("failed to serialize rig settings: {0}")]
    SettingsSerialize(#[from] ron::Error),

    /// Settings file could not be read or written
    #[error("rig settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
