//! Core data types shared by the timeline and the smoother

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Standard linear interpolation: `a + (b - a) * t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Which animated entity a property set belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    Camera,
    Avatar,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Camera => f.write_str("camera"),
            TrackKind::Avatar => f.write_str("avatar"),
        }
    }
}

/// A closed set of scalar properties animated on one entity
///
/// Implemented by [`CameraProperty`] and [`AvatarProperty`]; the timeline and
/// the smoother are generic over it so both tracks run through the same code.
pub trait TrackProperty: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// The entity this property set animates
    const TRACK: TrackKind;

    /// Every property in the set, in application order
    const ALL: &'static [Self];

    /// Name used in configuration files and error messages
    fn name(self) -> &'static str;
}

/// Camera properties. Rotation is Euler XYZ in radians, `Fov` is the
/// vertical field of view in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CameraProperty {
    X,
    Y,
    Z,
    RotX,
    RotY,
    RotZ,
    Fov,
}

impl TrackProperty for CameraProperty {
    const TRACK: TrackKind = TrackKind::Camera;

    const ALL: &'static [Self] = &[
        CameraProperty::X,
        CameraProperty::Y,
        CameraProperty::Z,
        CameraProperty::RotX,
        CameraProperty::RotY,
        CameraProperty::RotZ,
        CameraProperty::Fov,
    ];

    fn name(self) -> &'static str {
        match self {
            CameraProperty::X => "x",
            CameraProperty::Y => "y",
            CameraProperty::Z => "z",
            CameraProperty::RotX => "rotX",
            CameraProperty::RotY => "rotY",
            CameraProperty::RotZ => "rotZ",
            CameraProperty::Fov => "fov",
        }
    }
}

/// Avatar properties. Only yaw is animated; `RotY` is in radians.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AvatarProperty {
    PosX,
    PosY,
    PosZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    RotY,
}

impl TrackProperty for AvatarProperty {
    const TRACK: TrackKind = TrackKind::Avatar;

    const ALL: &'static [Self] = &[
        AvatarProperty::PosX,
        AvatarProperty::PosY,
        AvatarProperty::PosZ,
        AvatarProperty::ScaleX,
        AvatarProperty::ScaleY,
        AvatarProperty::ScaleZ,
        AvatarProperty::RotY,
    ];

    fn name(self) -> &'static str {
        match self {
            AvatarProperty::PosX => "posX",
            AvatarProperty::PosY => "posY",
            AvatarProperty::PosZ => "posZ",
            AvatarProperty::ScaleX => "scaleX",
            AvatarProperty::ScaleY => "scaleY",
            AvatarProperty::ScaleZ => "scaleZ",
            AvatarProperty::RotY => "rotY",
        }
    }
}

/// Property -> value mapping for one entity
///
/// Properties may be absent: a target without a property means "no opinion",
/// and the smoother leaves the live value where it is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformState<P: Ord> {
    values: BTreeMap<P, f32>,
}

impl<P: Ord> Default for TransformState<P> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<P: TrackProperty> TransformState<P> {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, property: P, value: f32) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: P) -> Option<f32> {
        self.values.get(&property).copied()
    }

    pub fn set(&mut self, property: P, value: f32) {
        self.values.insert(property, value);
    }

    pub fn remove(&mut self, property: P) -> Option<f32> {
        self.values.remove(&property)
    }

    pub fn contains(&self, property: P) -> bool {
        self.values.contains_key(&property)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over present properties in property order
    pub fn iter(&self) -> impl Iterator<Item = (P, f32)> + '_ {
        self.values.iter().map(|(property, value)| (*property, *value))
    }

    /// True when both states hold exactly the same set of properties
    pub fn same_properties(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self.values.keys().all(|property| other.values.contains_key(property))
    }

    /// Overwrite every property present in `other`, keeping the rest
    pub fn merge(&mut self, other: &Self) {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
    }
}

impl<P: TrackProperty> FromIterator<(P, f32)> for TransformState<P> {
    fn from_iter<I: IntoIterator<Item = (P, f32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// One segment of a track: a progress sub-range mapped onto a pair of states
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint<P: Ord> {
    /// Page section this segment belongs to ("About", "Skills", ...)
    #[serde(default)]
    pub label: String,
    pub progress_start: f32,
    pub progress_end: f32,
    pub from: TransformState<P>,
    pub to: TransformState<P>,
}

impl<P: TrackProperty> Waypoint<P> {
    pub fn new(
        progress_start: f32,
        progress_end: f32,
        from: TransformState<P>,
        to: TransformState<P>,
    ) -> Self {
        Self {
            label: String::new(),
            progress_start,
            progress_end,
            from,
            to,
        }
    }

    /// Attach a section label
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Length of the progress range
    pub fn span(&self) -> f32 {
        self.progress_end - self.progress_start
    }
}
