//! Track choreography settings

use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::timeline::{Section, Track};
use crate::types::{TrackProperty, TransformState, Waypoint};

/// How a track is authored
///
/// Either explicit waypoints with progress ranges, or sequential sections
/// whose ranges are derived from their relative durations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TrackSettings<P: Ord> {
    /// Explicit, contiguous waypoints covering [0, 1]
    Waypoints(Vec<Waypoint<P>>),

    /// Sections played back to back starting from `initial`
    Sections {
        initial: TransformState<P>,
        sections: Vec<Section<P>>,
    },
}

impl<P: TrackProperty> TrackSettings<P> {
    /// Validate and build the track
    pub fn build(&self) -> Result<Track<P>, RigError> {
        match self {
            TrackSettings::Waypoints(waypoints) => Track::new(waypoints.clone()),
            TrackSettings::Sections { initial, sections } => Track::from_sections(initial, sections),
        }
    }

    /// Labels of the authored segments, in scroll order
    pub fn labels(&self) -> Vec<&str> {
        match self {
            TrackSettings::Waypoints(waypoints) => waypoints.iter().map(|w| w.label.as_str()).collect(),
            TrackSettings::Sections { sections, .. } => sections.iter().map(|s| s.label.as_str()).collect(),
        }
    }
}
