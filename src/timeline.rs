//! Scroll timeline: scroll progress -> target transform states
//!
//! A [`Track`] is an immutable, validated list of contiguous waypoints that
//! covers progress `[0, 1]`. [`ScrollTimeline`] owns one track per animated
//! entity and recomputes both target states whenever the scroll position of
//! the designated container changes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::types::{
    lerp, AvatarProperty, CameraProperty, TrackProperty, TransformState, Waypoint,
};

/// Largest gap/overlap between neighbouring waypoints still treated as contiguous
const CONTIGUITY_EPSILON: f32 = 1e-5;

/// Clamp progress into [0, 1], mapping NaN to 0
#[inline]
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Raw scroll reading of the designated container
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    /// Current scroll offset in pixels
    pub offset: f32,
    /// Scrollable extent in pixels (content height minus viewport height)
    pub extent: f32,
}

impl ScrollSample {
    pub fn new(offset: f32, extent: f32) -> Self {
        Self { offset, extent }
    }

    /// Normalized scroll progress
    ///
    /// A zero, negative or non-finite extent yields 0 instead of dividing.
    pub fn progress(&self) -> f32 {
        if !self.extent.is_finite() || self.extent <= 0.0 || !self.offset.is_finite() {
            return 0.0;
        }
        clamp_progress(self.offset / self.extent)
    }
}

/// One authored section of a track: how long it lasts relative to the
/// others and which properties it moves
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section<P: Ord> {
    #[serde(default)]
    pub label: String,
    /// Relative duration; progress ranges are proportional to it
    #[serde(default = "default_section_duration")]
    pub duration: f32,
    /// Properties this section animates towards. Omitted ones carry forward.
    pub to: TransformState<P>,
}

fn default_section_duration() -> f32 {
    1.0
}

impl<P: TrackProperty> Section<P> {
    pub fn new(label: impl Into<String>, to: TransformState<P>) -> Self {
        Self {
            label: label.into(),
            duration: default_section_duration(),
            to,
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }
}

/// Validated, immutable waypoint sequence for one property set
#[derive(Clone, Debug, PartialEq)]
pub struct Track<P: Ord> {
    waypoints: Vec<Waypoint<P>>,
}

impl<P: TrackProperty> Track<P> {
    /// Validate a waypoint list
    ///
    /// Rejects empty lists, ranges outside [0, 1] or inverted, gaps and
    /// overlaps between neighbours, coverage that does not span [0, 1],
    /// zero-length first or last waypoints, `from`/`to` pairs with different
    /// property sets and non-finite values.
    pub fn new(mut waypoints: Vec<Waypoint<P>>) -> Result<Self, RigError> {
        let track = P::TRACK;
        if waypoints.is_empty() {
            return Err(RigError::EmptyTrack { track });
        }

        for (index, waypoint) in waypoints.iter().enumerate() {
            let (start, end) = (waypoint.progress_start, waypoint.progress_end);
            if !start.is_finite() || !end.is_finite() || start < 0.0 || end > 1.0 || end < start {
                return Err(RigError::InvalidRange {
                    track,
                    index,
                    start,
                    end,
                });
            }
            if !waypoint.from.same_properties(&waypoint.to) {
                return Err(RigError::MismatchedProperties { track, index });
            }
            if let Some((property, _)) = waypoint
                .from
                .iter()
                .chain(waypoint.to.iter())
                .find(|(_, value)| !value.is_finite())
            {
                return Err(RigError::NonFiniteValue {
                    track,
                    index,
                    property: property.name(),
                });
            }
        }

        let last = waypoints.len() - 1;
        let start = waypoints[0].progress_start;
        let end = waypoints[last].progress_end;
        if start > CONTIGUITY_EPSILON || end < 1.0 - CONTIGUITY_EPSILON {
            return Err(RigError::IncompleteCoverage { track, start, end });
        }
        waypoints[0].progress_start = 0.0;
        waypoints[last].progress_end = 1.0;

        // Progress 0 and 1 must resolve to the first and last waypoint
        for index in [0, last] {
            if waypoints[index].span() <= 0.0 {
                return Err(RigError::ZeroLengthEnd { track, index });
            }
        }

        for index in 1..waypoints.len() {
            let previous_end = waypoints[index - 1].progress_end;
            let waypoint = &mut waypoints[index];
            if (waypoint.progress_start - previous_end).abs() > CONTIGUITY_EPSILON {
                return Err(RigError::NonContiguous {
                    track,
                    index,
                    start: waypoint.progress_start,
                    previous_end,
                });
            }
            // Shared boundaries must be bit-identical for the tie-break rule
            waypoint.progress_start = previous_end;
            waypoint.progress_end = waypoint.progress_end.max(previous_end);
        }

        Ok(Self { waypoints })
    }

    /// A single waypoint spanning the whole scroll range
    pub fn single(from: TransformState<P>, to: TransformState<P>) -> Result<Self, RigError> {
        Self::new(vec![Waypoint::new(0.0, 1.0, from, to)])
    }

    /// Build waypoints from sequential sections
    ///
    /// Each section starts where the previous one ended (the first one starts
    /// at `initial`), and its progress range is proportional to its duration.
    pub fn from_sections(
        initial: &TransformState<P>,
        sections: &[Section<P>],
    ) -> Result<Self, RigError> {
        let track = P::TRACK;
        if sections.is_empty() {
            return Err(RigError::EmptyTrack { track });
        }

        let mut total = 0.0;
        for (index, section) in sections.iter().enumerate() {
            if !section.duration.is_finite() || section.duration <= 0.0 {
                return Err(RigError::InvalidDuration {
                    track,
                    index,
                    duration: section.duration,
                });
            }
            if section.to.iter().any(|(property, _)| !initial.contains(property)) {
                return Err(RigError::MismatchedProperties { track, index });
            }
            total += section.duration;
        }

        let last = sections.len() - 1;
        let mut waypoints = Vec::with_capacity(sections.len());
        let mut state = initial.clone();
        let mut elapsed = 0.0;
        let mut start = 0.0;
        for (index, section) in sections.iter().enumerate() {
            elapsed += section.duration;
            let end = if index == last { 1.0 } else { elapsed / total };

            let mut to = state.clone();
            to.merge(&section.to);
            waypoints.push(
                Waypoint::new(start, end, std::mem::replace(&mut state, to.clone()), to)
                    .labeled(section.label.clone()),
            );
            start = end;
        }

        Self::new(waypoints)
    }

    pub fn waypoints(&self) -> &[Waypoint<P>] {
        &self.waypoints
    }

    pub fn waypoint(&self, index: usize) -> Option<&Waypoint<P>> {
        self.waypoints.get(index)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Index of the active waypoint
    ///
    /// At a boundary shared by two waypoints the later one wins, so the
    /// result is unique for every progress value. Zero-length waypoints
    /// inside the track are therefore never active.
    pub fn locate(&self, progress: f32) -> usize {
        let progress = clamp_progress(progress);
        self.waypoints
            .partition_point(|waypoint| waypoint.progress_start <= progress)
            .saturating_sub(1)
    }

    /// Target state at the given progress
    pub fn sample(&self, progress: f32) -> TransformState<P> {
        self.sample_at(self.locate(progress), progress)
    }

    /// Interpolate inside a known waypoint
    ///
    /// `t <= 0` and `t >= 1` return the endpoint states exactly.
    fn sample_at(&self, index: usize, progress: f32) -> TransformState<P> {
        let Some(waypoint) = self.waypoints.get(index) else {
            return TransformState::default();
        };

        let t = local_t(waypoint, clamp_progress(progress));
        if t <= 0.0 {
            return waypoint.from.clone();
        }
        if t >= 1.0 {
            return waypoint.to.clone();
        }

        waypoint
            .from
            .iter()
            .filter_map(|(property, a)| waypoint.to.get(property).map(|b| (property, lerp(a, b, t))))
            .collect()
    }
}

/// Position inside a waypoint; zero-length waypoints always report 0
fn local_t<P: TrackProperty>(waypoint: &Waypoint<P>, progress: f32) -> f32 {
    let span = waypoint.span();
    if span <= 0.0 {
        return 0.0;
    }
    ((progress - waypoint.progress_start) / span).clamp(0.0, 1.0)
}

/// Which tracks moved into a new waypoint during an update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionChanges {
    pub camera: Option<usize>,
    pub avatar: Option<usize>,
}

impl SectionChanges {
    pub fn is_empty(&self) -> bool {
        self.camera.is_none() && self.avatar.is_none()
    }
}

/// Scroll listener state: the container being watched, both tracks and the
/// target states they currently prescribe
///
/// Present as a resource only while the rig is mounted; removing it stops the
/// scroll system.
#[derive(Resource, Clone, Debug)]
pub struct ScrollTimeline {
    container: Entity,
    camera: Track<CameraProperty>,
    avatar: Track<AvatarProperty>,
    progress: f32,
    camera_section: usize,
    avatar_section: usize,
    camera_target: TransformState<CameraProperty>,
    avatar_target: TransformState<AvatarProperty>,
}

impl ScrollTimeline {
    /// Create a timeline with targets at progress 0
    pub fn new(
        container: Entity,
        camera: Track<CameraProperty>,
        avatar: Track<AvatarProperty>,
    ) -> Self {
        let camera_section = camera.locate(0.0);
        let avatar_section = avatar.locate(0.0);
        let camera_target = camera.sample_at(camera_section, 0.0);
        let avatar_target = avatar.sample_at(avatar_section, 0.0);
        Self {
            container,
            camera,
            avatar,
            progress: 0.0,
            camera_section,
            avatar_section,
            camera_target,
            avatar_target,
        }
    }

    /// Recompute targets from a scroll reading
    pub fn update(&mut self, sample: ScrollSample) -> SectionChanges {
        self.set_progress(sample.progress())
    }

    /// Recompute targets from a normalized progress value
    pub fn set_progress(&mut self, progress: f32) -> SectionChanges {
        let progress = clamp_progress(progress);
        let camera_section = self.camera.locate(progress);
        let avatar_section = self.avatar.locate(progress);

        let changes = SectionChanges {
            camera: (camera_section != self.camera_section).then_some(camera_section),
            avatar: (avatar_section != self.avatar_section).then_some(avatar_section),
        };

        self.progress = progress;
        self.camera_section = camera_section;
        self.avatar_section = avatar_section;
        self.camera_target = self.camera.sample_at(camera_section, progress);
        self.avatar_target = self.avatar.sample_at(avatar_section, progress);
        changes
    }

    pub fn container(&self) -> Entity {
        self.container
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn camera_track(&self) -> &Track<CameraProperty> {
        &self.camera
    }

    pub fn avatar_track(&self) -> &Track<AvatarProperty> {
        &self.avatar
    }

    pub fn camera_section(&self) -> usize {
        self.camera_section
    }

    pub fn avatar_section(&self) -> usize {
        self.avatar_section
    }

    pub fn camera_target(&self) -> &TransformState<CameraProperty> {
        &self.camera_target
    }

    pub fn avatar_target(&self) -> &TransformState<AvatarProperty> {
        &self.avatar_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrackKind;

    fn fov(value: f32) -> TransformState<CameraProperty> {
        TransformState::new().with(CameraProperty::Fov, value)
    }

    /// Two waypoints: fov 45 -> 55 -> 70
    fn fov_track() -> Track<CameraProperty> {
        Track::new(vec![
            Waypoint::new(0.0, 0.5, fov(45.0), fov(55.0)),
            Waypoint::new(0.5, 1.0, fov(55.0), fov(70.0)),
        ])
        .unwrap()
    }

    fn avatar_track() -> Track<AvatarProperty> {
        Track::single(
            TransformState::new().with(AvatarProperty::PosZ, 10.0),
            TransformState::new().with(AvatarProperty::PosZ, 22.0),
        )
        .unwrap()
    }

    #[test]
    fn test_fov_midpoints() {
        let track = fov_track();
        assert_eq!(track.sample(0.25).get(CameraProperty::Fov), Some(50.0));
        assert_eq!(track.sample(0.75).get(CameraProperty::Fov), Some(62.5));
    }

    #[test]
    fn test_endpoints_are_exact() {
        let track = fov_track();
        assert_eq!(track.sample(0.0), fov(45.0));
        assert_eq!(track.sample(1.0), fov(70.0));
        // Out-of-range progress clamps onto the endpoints
        assert_eq!(track.sample(-3.0), fov(45.0));
        assert_eq!(track.sample(7.0), fov(70.0));
    }

    #[test]
    fn test_boundary_picks_later_waypoint() {
        let track = fov_track();
        assert_eq!(track.locate(0.0), 0);
        assert_eq!(track.locate(0.4999), 0);
        assert_eq!(track.locate(0.5), 1);
        assert_eq!(track.locate(1.0), 1);
        assert_eq!(track.sample(0.5), fov(55.0));
    }

    #[test]
    fn test_target_stays_on_segment() {
        let track = fov_track();
        for step in 0..=200 {
            let progress = step as f32 / 200.0;
            let index = track.locate(progress);
            let waypoint = track.waypoint(index).unwrap();
            assert!(waypoint.progress_start <= progress && progress <= waypoint.progress_end);

            let a = waypoint.from.get(CameraProperty::Fov).unwrap();
            let b = waypoint.to.get(CameraProperty::Fov).unwrap();
            let value = track.sample(progress).get(CameraProperty::Fov).unwrap();
            assert!(value >= a.min(b) - 1e-4 && value <= a.max(b) + 1e-4);
        }
    }

    #[test]
    fn test_zero_length_waypoints() {
        let track = Track::new(vec![
            Waypoint::new(0.0, 0.5, fov(45.0), fov(55.0)),
            Waypoint::new(0.5, 0.5, fov(90.0), fov(10.0)),
            Waypoint::new(0.5, 1.0, fov(55.0), fov(70.0)),
        ])
        .unwrap();
        // Later waypoint wins at the shared boundary, skipping the empty one
        assert_eq!(track.locate(0.5), 2);
        // Sampled directly, a zero-length waypoint has t = 0
        assert_eq!(local_t(&track.waypoints()[1], 0.5), 0.0);
        assert_eq!(track.sample_at(1, 0.5), fov(90.0));
        assert_eq!(track.sample(0.5), fov(55.0));
    }

    #[test]
    fn test_rejects_zero_length_ends() {
        let leading = Track::new(vec![
            Waypoint::new(0.0, 0.0, fov(10.0), fov(20.0)),
            Waypoint::new(0.0, 1.0, fov(45.0), fov(55.0)),
        ]);
        assert!(matches!(leading, Err(RigError::ZeroLengthEnd { index: 0, .. })));

        let trailing = Track::new(vec![
            Waypoint::new(0.0, 1.0, fov(45.0), fov(55.0)),
            Waypoint::new(1.0, 1.0, fov(60.0), fov(65.0)),
        ]);
        assert!(matches!(trailing, Err(RigError::ZeroLengthEnd { index: 1, .. })));
    }

    #[test]
    fn test_section_and_target_agree_at_ends() {
        let track = Track::new(vec![
            Waypoint::new(0.0, 0.5, fov(45.0), fov(55.0)),
            Waypoint::new(0.5, 0.5, fov(90.0), fov(10.0)),
            Waypoint::new(0.5, 1.0, fov(55.0), fov(70.0)),
        ])
        .unwrap();

        assert_eq!(track.locate(0.0), 0);
        assert_eq!(track.sample(0.0), track.waypoints()[0].from);
        assert_eq!(track.locate(1.0), 2);
        assert_eq!(track.sample(1.0), track.waypoints()[2].to);
    }

    #[test]
    fn test_rejects_empty_track() {
        let err = Track::<CameraProperty>::new(Vec::new()).unwrap_err();
        assert!(matches!(err, RigError::EmptyTrack { track: TrackKind::Camera }));
    }

    #[test]
    fn test_rejects_gap_and_overlap() {
        let gap = Track::new(vec![
            Waypoint::new(0.0, 0.4, fov(45.0), fov(55.0)),
            Waypoint::new(0.5, 1.0, fov(55.0), fov(70.0)),
        ]);
        assert!(matches!(gap, Err(RigError::NonContiguous { index: 1, .. })));

        let overlap = Track::new(vec![
            Waypoint::new(0.0, 0.6, fov(45.0), fov(55.0)),
            Waypoint::new(0.5, 1.0, fov(55.0), fov(70.0)),
        ]);
        assert!(matches!(overlap, Err(RigError::NonContiguous { index: 1, .. })));
    }

    #[test]
    fn test_rejects_inverted_and_out_of_range() {
        let inverted = Track::new(vec![Waypoint::new(0.8, 0.2, fov(45.0), fov(55.0))]);
        assert!(matches!(inverted, Err(RigError::InvalidRange { index: 0, .. })));

        let negative = Track::new(vec![Waypoint::new(-0.1, 1.0, fov(45.0), fov(55.0))]);
        assert!(matches!(negative, Err(RigError::InvalidRange { .. })));

        let nan = Track::new(vec![Waypoint::new(0.0, f32::NAN, fov(45.0), fov(55.0))]);
        assert!(matches!(nan, Err(RigError::InvalidRange { .. })));
    }

    #[test]
    fn test_rejects_incomplete_coverage() {
        let short = Track::new(vec![Waypoint::new(0.0, 0.9, fov(45.0), fov(55.0))]);
        assert!(matches!(short, Err(RigError::IncompleteCoverage { .. })));

        let late = Track::new(vec![Waypoint::new(0.1, 1.0, fov(45.0), fov(55.0))]);
        assert!(matches!(late, Err(RigError::IncompleteCoverage { .. })));
    }

    #[test]
    fn test_rejects_mismatched_and_non_finite() {
        let mismatched = Track::new(vec![Waypoint::new(
            0.0,
            1.0,
            fov(45.0),
            fov(55.0).with(CameraProperty::Z, 3.0),
        )]);
        assert!(matches!(mismatched, Err(RigError::MismatchedProperties { index: 0, .. })));

        let infinite = Track::new(vec![Waypoint::new(0.0, 1.0, fov(45.0), fov(f32::INFINITY))]);
        assert!(matches!(
            infinite,
            Err(RigError::NonFiniteValue { property: "fov", .. })
        ));
    }

    #[test]
    fn test_tolerates_float_noise_at_boundaries() {
        let track = Track::new(vec![
            Waypoint::new(0.0, 1.0 / 3.0, fov(45.0), fov(50.0)),
            Waypoint::new(0.333_333_4, 1.0, fov(50.0), fov(70.0)),
        ])
        .unwrap();
        assert_eq!(
            track.waypoints()[1].progress_start,
            track.waypoints()[0].progress_end
        );
    }

    #[test]
    fn test_sections_are_proportional_and_carry_forward() {
        let initial = TransformState::new()
            .with(CameraProperty::Z, 15.0)
            .with(CameraProperty::Fov, 50.0);
        let sections = vec![
            Section::new("Home", TransformState::new().with(CameraProperty::Z, 12.0)),
            Section::new("About", TransformState::new().with(CameraProperty::Fov, 60.0))
                .with_duration(3.0),
        ];
        let track = Track::from_sections(&initial, &sections).unwrap();

        assert_eq!(track.len(), 2);
        let home = track.waypoint(0).unwrap();
        let about = track.waypoint(1).unwrap();
        assert_eq!(home.label, "Home");
        assert_eq!((home.progress_start, home.progress_end), (0.0, 0.25));
        assert_eq!((about.progress_start, about.progress_end), (0.25, 1.0));

        // Home starts from the initial state, untouched fov carries forward
        assert_eq!(home.from, initial);
        assert_eq!(home.to.get(CameraProperty::Z), Some(12.0));
        assert_eq!(home.to.get(CameraProperty::Fov), Some(50.0));
        // About starts where Home ended
        assert_eq!(about.from, home.to);
        assert_eq!(about.to.get(CameraProperty::Z), Some(12.0));
        assert_eq!(about.to.get(CameraProperty::Fov), Some(60.0));
    }

    #[test]
    fn test_sections_validation() {
        let initial = fov(50.0);
        let unknown = vec![Section::new("Home", TransformState::new().with(CameraProperty::X, 1.0))];
        assert!(matches!(
            Track::from_sections(&initial, &unknown),
            Err(RigError::MismatchedProperties { index: 0, .. })
        ));

        let zero = vec![Section::new("Home", fov(45.0)).with_duration(0.0)];
        assert!(matches!(
            Track::from_sections(&initial, &zero),
            Err(RigError::InvalidDuration { index: 0, .. })
        ));

        assert!(matches!(
            Track::from_sections(&initial, &[]),
            Err(RigError::EmptyTrack { .. })
        ));
    }

    #[test]
    fn test_scroll_sample_progress() {
        assert_eq!(ScrollSample::new(300.0, 1200.0).progress(), 0.25);
        assert_eq!(ScrollSample::new(5000.0, 1200.0).progress(), 1.0);
        assert_eq!(ScrollSample::new(-20.0, 1200.0).progress(), 0.0);
    }

    #[test]
    fn test_zero_extent_gives_zero_progress() {
        assert_eq!(ScrollSample::new(480.0, 0.0).progress(), 0.0);
        assert_eq!(ScrollSample::new(480.0, -10.0).progress(), 0.0);
        assert_eq!(ScrollSample::new(480.0, f32::NAN).progress(), 0.0);
        assert_eq!(ScrollSample::new(f32::NAN, 100.0).progress(), 0.0);
    }

    #[test]
    fn test_timeline_starts_at_progress_zero() {
        let timeline = ScrollTimeline::new(Entity::PLACEHOLDER, fov_track(), avatar_track());
        assert_eq!(timeline.progress(), 0.0);
        assert_eq!(timeline.camera_target(), &fov(45.0));
        assert_eq!(timeline.avatar_target().get(AvatarProperty::PosZ), Some(10.0));
    }

    #[test]
    fn test_timeline_update_is_idempotent() {
        let mut timeline = ScrollTimeline::new(Entity::PLACEHOLDER, fov_track(), avatar_track());
        timeline.update(ScrollSample::new(900.0, 1200.0));
        let first = (timeline.camera_target().clone(), timeline.avatar_target().clone());

        let changes = timeline.update(ScrollSample::new(900.0, 1200.0));
        assert!(changes.is_empty());
        assert_eq!(timeline.camera_target(), &first.0);
        assert_eq!(timeline.avatar_target(), &first.1);
        assert_eq!(timeline.camera_target().get(CameraProperty::Fov), Some(62.5));
        assert_eq!(timeline.avatar_target().get(AvatarProperty::PosZ), Some(19.0));
    }

    #[test]
    fn test_timeline_reports_section_changes() {
        let mut timeline = ScrollTimeline::new(Entity::PLACEHOLDER, fov_track(), avatar_track());
        let changes = timeline.set_progress(0.6);
        assert_eq!(changes.camera, Some(1));
        assert_eq!(changes.avatar, None);
        assert_eq!(timeline.camera_section(), 1);

        let changes = timeline.set_progress(0.1);
        assert_eq!(changes.camera, Some(0));
    }

    #[test]
    fn test_timeline_target_is_pure_function_of_progress() {
        let mut timeline = ScrollTimeline::new(Entity::PLACEHOLDER, fov_track(), avatar_track());
        timeline.set_progress(0.25);
        let direct = timeline.camera_target().clone();

        timeline.set_progress(0.9);
        timeline.set_progress(0.0);
        timeline.set_progress(0.25);
        assert_eq!(timeline.camera_target(), &direct);
    }
}
