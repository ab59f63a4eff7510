//! Rig messages for the host application

use bevy::prelude::*;

use crate::types::TrackKind;

/// Message fired when scrolling moves a track into a different waypoint
///
/// Hosts typically use this to highlight the navigation entry of the page
/// section currently in view.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct SectionChanged {
    /// Track whose active waypoint changed
    pub track: TrackKind,
    /// Index of the newly active waypoint
    pub index: usize,
    /// Label of the newly active waypoint (may be empty)
    pub label: String,
}

impl SectionChanged {
    pub fn new(track: TrackKind, index: usize, label: impl Into<String>) -> Self {
        Self {
            track,
            index,
            label: label.into(),
        }
    }
}
