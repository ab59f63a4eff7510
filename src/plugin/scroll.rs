//! Scroll listener: container scroll position -> timeline targets

use bevy::prelude::*;
use bevy::ui::{ComputedNode, ScrollPosition};

use crate::events::SectionChanged;
use crate::timeline::{ScrollSample, ScrollTimeline};
use crate::types::TrackKind;

/// Read the scroll position of the rig container and update the targets
///
/// Skips the frame when the container is gone or is not a scrollable UI node.
pub fn track_scroll(
    mut timeline: ResMut<ScrollTimeline>,
    containers: Query<(&ScrollPosition, &ComputedNode)>,
    mut section_changed: MessageWriter<SectionChanged>,
) {
    let container = timeline.container();
    let Ok((position, node)) = containers.get(container) else {
        debug!("Scroll container {:?} unavailable, skipping", container);
        return;
    };

    let sample = scroll_sample(position, node);
    // Unchanged progress leaves the resource untouched
    if timeline.progress() == sample.progress() {
        return;
    }

    let changes = timeline.update(sample);
    if let Some(index) = changes.camera {
        let label = section_label(timeline.camera_track().waypoint(index).map(|w| w.label.as_str()));
        debug!("Camera entered section {} ({})", index, label);
        section_changed.write(SectionChanged::new(TrackKind::Camera, index, label));
    }
    if let Some(index) = changes.avatar {
        let label = section_label(timeline.avatar_track().waypoint(index).map(|w| w.label.as_str()));
        debug!("Avatar entered section {} ({})", index, label);
        section_changed.write(SectionChanged::new(TrackKind::Avatar, index, label));
    }
}

/// Scroll offset and scrollable extent in logical pixels
///
/// The extent matches the maximum offset bevy_ui allows, which includes the
/// space taken by a visible scrollbar.
pub(crate) fn scroll_sample(position: &ScrollPosition, node: &ComputedNode) -> ScrollSample {
    let overflow = (node.content_size().y - node.size().y + node.scrollbar_size.y).max(0.0);
    ScrollSample::new(position.0.y, overflow * node.inverse_scale_factor())
}

fn section_label(label: Option<&str>) -> String {
    label.unwrap_or_default().to_owned()
}
