// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Named keypoints extracted from raw indexed landmarks.
//!
//! The upstream pose model identifies landmarks by numeric index. The
//! classifier works with a fixed set of 13 semantically named keypoints;
//! this module owns the id-to-name table and the extraction step that
//! applies it to one frame's raw landmarks.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::landmarks::Landmark;

/// The 13 keypoints consumed by the classifier, named per body site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keypoint {
    /// Nose tip.
    Nose,
    /// Left shoulder.
    ShoulderL,
    /// Right shoulder.
    ShoulderR,
    /// Left elbow.
    ElbowL,
    /// Right elbow.
    ElbowR,
    /// Left wrist.
    WristL,
    /// Right wrist.
    WristR,
    /// Left hip.
    HipL,
    /// Right hip.
    HipR,
    /// Left knee.
    KneeL,
    /// Right knee.
    KneeR,
    /// Left ankle.
    AnkleL,
    /// Right ankle.
    AnkleR,
}

/// All classifier keypoints, in schema-id order.
pub const KEYPOINTS: [Keypoint; 13] = [
    Keypoint::Nose,
    Keypoint::ShoulderL,
    Keypoint::ShoulderR,
    Keypoint::ElbowL,
    Keypoint::ElbowR,
    Keypoint::WristL,
    Keypoint::WristR,
    Keypoint::HipL,
    Keypoint::HipR,
    Keypoint::KneeL,
    Keypoint::KneeR,
    Keypoint::AnkleL,
    Keypoint::AnkleR,
];

impl Keypoint {
    /// Landmark index of this keypoint in the upstream 33-landmark schema.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Nose => 0,
            Self::ShoulderL => 11,
            Self::ShoulderR => 12,
            Self::ElbowL => 13,
            Self::ElbowR => 14,
            Self::WristL => 15,
            Self::WristR => 16,
            Self::HipL => 23,
            Self::HipR => 24,
            Self::KneeL => 25,
            Self::KneeR => 26,
            Self::AnkleL => 27,
            Self::AnkleR => 28,
        }
    }

    /// Resolve a raw landmark index to a classifier keypoint, if it maps.
    #[must_use]
    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::Nose),
            11 => Some(Self::ShoulderL),
            12 => Some(Self::ShoulderR),
            13 => Some(Self::ElbowL),
            14 => Some(Self::ElbowR),
            15 => Some(Self::WristL),
            16 => Some(Self::WristR),
            23 => Some(Self::HipL),
            24 => Some(Self::HipR),
            25 => Some(Self::KneeL),
            26 => Some(Self::KneeR),
            27 => Some(Self::AnkleL),
            28 => Some(Self::AnkleR),
            _ => None,
        }
    }

    /// Returns the snake_case name used in logs and landmark tooling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::ShoulderL => "shoulder_l",
            Self::ShoulderR => "shoulder_r",
            Self::ElbowL => "elbow_l",
            Self::ElbowR => "elbow_r",
            Self::WristL => "wrist_l",
            Self::WristR => "wrist_r",
            Self::HipL => "hip_l",
            Self::HipR => "hip_r",
            Self::KneeL => "knee_l",
            Self::KneeR => "knee_r",
            Self::AnkleL => "ankle_l",
            Self::AnkleR => "ankle_r",
        }
    }
}

impl fmt::Display for Keypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Keypoint {
    type Err = KeypointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nose" => Ok(Self::Nose),
            "shoulder_l" => Ok(Self::ShoulderL),
            "shoulder_r" => Ok(Self::ShoulderR),
            "elbow_l" => Ok(Self::ElbowL),
            "elbow_r" => Ok(Self::ElbowR),
            "wrist_l" => Ok(Self::WristL),
            "wrist_r" => Ok(Self::WristR),
            "hip_l" => Ok(Self::HipL),
            "hip_r" => Ok(Self::HipR),
            "knee_l" => Ok(Self::KneeL),
            "knee_r" => Ok(Self::KneeR),
            "ankle_l" => Ok(Self::AnkleL),
            "ankle_r" => Ok(Self::AnkleR),
            _ => Err(KeypointParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid keypoint name.
#[derive(Debug, Clone)]
pub struct KeypointParseError(String);

impl fmt::Display for KeypointParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid keypoint '{}'", self.0)
    }
}

impl std::error::Error for KeypointParseError {}

/// A 2D position in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Normalized horizontal position.
    pub x: f32,
    /// Normalized vertical position (downward).
    pub y: f32,
}

/// Named keypoint positions for one frame.
///
/// The mapping may be partial: a keypoint is present only if the raw
/// landmark set carried its id. Downstream consumers decide whether a
/// missing keypoint matters for the formula they evaluate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedKeypoints {
    points: HashMap<Keypoint, Point>,
}

impl NamedKeypoints {
    /// Get the position of a keypoint, if it was detected.
    #[must_use]
    pub fn get(&self, keypoint: Keypoint) -> Option<Point> {
        self.points.get(&keypoint).copied()
    }

    /// Number of keypoints present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no keypoint is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether every one of the 13 classifier keypoints is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.points.len() == KEYPOINTS.len()
    }

    /// Iterate over the present keypoints.
    pub fn iter(&self) -> impl Iterator<Item = (Keypoint, Point)> + '_ {
        self.points.iter().map(|(k, p)| (*k, *p))
    }
}

/// Map one frame's raw landmarks to named keypoints.
///
/// Returns `None` when the raw set is empty or none of its records carries
/// a classifier keypoint id — i.e. no usable detection. Otherwise returns
/// the (possibly partial) named mapping; ids outside the 13-entry table
/// are skipped. The first record wins when an id repeats.
///
/// # Arguments
///
/// * `landmarks` - Raw landmark records for one frame.
///
/// # Returns
///
/// * `Some(NamedKeypoints)` with one entry per matched id, or `None`.
#[must_use]
pub fn extract_keypoints(landmarks: &[Landmark]) -> Option<NamedKeypoints> {
    let mut named = NamedKeypoints::default();

    for lm in landmarks {
        debug_assert!(
            lm.is_in_schema(),
            "landmark id {} outside the {}-landmark schema",
            lm.id,
            crate::landmarks::POSE_LANDMARK_COUNT
        );
        if let Some(keypoint) = Keypoint::from_id(lm.id) {
            named
                .points
                .entry(keypoint)
                .or_insert(Point { x: lm.x, y: lm.y });
        }
    }

    if named.is_empty() { None } else { Some(named) }
}
