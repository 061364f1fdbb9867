// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Stroke-phase classification.
//!
//! Once a frame has passed the posture gate, two joint-flexion comparisons
//! place it within the stroke cycle. Each frame is classified on its own;
//! there is no memory of previous frames and no transition constraint
//! between consecutive results.

use std::fmt;
use std::str::FromStr;

use crate::classify::IndeterminateReason;
use crate::keypoints::{Keypoint, NamedKeypoints, Point};

/// Phases of the rowing stroke cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokePhase {
    /// Knees bent, body compressed forward over the slide.
    Catch,
    /// Legs extended, arms drawn in to the body.
    Finish,
    /// Neither catch nor finish — the drive or the recovery.
    Between,
}

impl StrokePhase {
    /// Returns the string representation used in logs and summaries.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Catch => "catch",
            Self::Finish => "finish",
            Self::Between => "between",
        }
    }
}

impl fmt::Display for StrokePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StrokePhase {
    type Err = PhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "catch" => Ok(Self::Catch),
            "finish" => Ok(Self::Finish),
            "between" | "in-between" => Ok(Self::Between),
            _ => Err(PhaseParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid phase string.
#[derive(Debug, Clone)]
pub struct PhaseParseError(String);

impl fmt::Display for PhaseParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid stroke phase '{}', expected one of: catch, finish, between",
            self.0
        )
    }
}

impl std::error::Error for PhaseParseError {}

fn require(
    keypoints: &NamedKeypoints,
    keypoint: Keypoint,
) -> Result<Point, IndeterminateReason> {
    keypoints
        .get(keypoint)
        .ok_or(IndeterminateReason::MissingKeypoint(keypoint))
}

/// Whether the knees are bent: the knee sits closer to the nose in y than
/// the hip does.
fn knee_bent(keypoints: &NamedKeypoints) -> Result<bool, IndeterminateReason> {
    let nose = require(keypoints, Keypoint::Nose)?;
    let knee_r = require(keypoints, Keypoint::KneeR)?;
    let hip_r = require(keypoints, Keypoint::HipR)?;

    Ok((nose.y - knee_r.y).abs() < (nose.y - hip_r.y).abs())
}

/// Whether the arms are bent: the wrist sits closer to the shoulder in y
/// than the elbow does.
fn arms_bent(keypoints: &NamedKeypoints) -> Result<bool, IndeterminateReason> {
    let shoulder_r = require(keypoints, Keypoint::ShoulderR)?;
    let wrist_r = require(keypoints, Keypoint::WristR)?;
    let elbow_r = require(keypoints, Keypoint::ElbowR)?;

    Ok((shoulder_r.y - wrist_r.y).abs() < (shoulder_r.y - elbow_r.y).abs())
}

/// Place a rowing frame within the stroke cycle.
///
/// Decision table, evaluated in order: bent knees mean the catch; failing
/// that, bent arms mean the finish; otherwise the frame is between the
/// two. The arm comparison — and its keypoints — are only consulted when
/// the knee comparison does not already decide.
///
/// # Arguments
///
/// * `keypoints` - Named keypoints of a frame that classified as rowing.
///
/// # Errors
///
/// Returns `IndeterminateReason` if a keypoint required by a reached
/// comparison is missing.
pub fn classify_phase(
    keypoints: &NamedKeypoints,
) -> Result<StrokePhase, IndeterminateReason> {
    if knee_bent(keypoints)? {
        return Ok(StrokePhase::Catch);
    }
    if arms_bent(keypoints)? {
        return Ok(StrokePhase::Finish);
    }
    Ok(StrokePhase::Between)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypoints::extract_keypoints;
    use crate::landmarks::Landmark;

    fn keypoints(entries: &[(u32, f32, f32)]) -> NamedKeypoints {
        let landmarks: Vec<Landmark> = entries
            .iter()
            .map(|&(id, x, y)| Landmark {
                id,
                x,
                y,
                z: 0.0,
                visibility: 1.0,
            })
            .collect();
        extract_keypoints(&landmarks).unwrap()
    }

    #[test]
    fn test_catch_when_knee_near_nose() {
        // |nose.y - knee.y| = 0.15 < |nose.y - hip.y| = 0.37
        let pose = keypoints(&[
            (0, 0.60, 0.35),  // nose
            (26, 0.58, 0.50), // knee_r
            (24, 0.45, 0.72), // hip_r
        ]);
        assert_eq!(classify_phase(&pose), Ok(StrokePhase::Catch));
    }

    #[test]
    fn test_finish_when_wrist_near_shoulder() {
        let pose = keypoints(&[
            (0, 0.40, 0.30),  // nose
            (26, 0.70, 0.62), // knee_r, further from the nose than the hip
            (24, 0.55, 0.60), // hip_r
            (12, 0.45, 0.40), // shoulder_r
            (16, 0.48, 0.42), // wrist_r
            (14, 0.50, 0.52), // elbow_r
        ]);
        assert_eq!(classify_phase(&pose), Ok(StrokePhase::Finish));
    }

    #[test]
    fn test_between_when_neither_bent() {
        let pose = keypoints(&[
            (0, 0.40, 0.30),
            (26, 0.70, 0.62),
            (24, 0.55, 0.60),
            (12, 0.45, 0.40),
            (16, 0.60, 0.55), // wrist extended past the elbow
            (14, 0.50, 0.52),
        ]);
        assert_eq!(classify_phase(&pose), Ok(StrokePhase::Between));
    }

    #[test]
    fn test_catch_does_not_require_arms() {
        // No wrist or elbow at all; knee comparison already decides.
        let pose = keypoints(&[(0, 0.60, 0.35), (26, 0.58, 0.50), (24, 0.45, 0.72)]);
        assert_eq!(classify_phase(&pose), Ok(StrokePhase::Catch));
    }

    #[test]
    fn test_missing_wrist_after_straight_knees() {
        let pose = keypoints(&[
            (0, 0.40, 0.30),
            (26, 0.70, 0.62),
            (24, 0.55, 0.60),
            (12, 0.45, 0.40),
            (14, 0.50, 0.52),
        ]);
        assert_eq!(
            classify_phase(&pose),
            Err(IndeterminateReason::MissingKeypoint(Keypoint::WristR))
        );
    }

    #[test]
    fn test_phase_parse_and_display() {
        assert_eq!("catch".parse::<StrokePhase>().unwrap(), StrokePhase::Catch);
        assert_eq!("FINISH".parse::<StrokePhase>().unwrap(), StrokePhase::Finish);
        assert_eq!(
            "in-between".parse::<StrokePhase>().unwrap(),
            StrokePhase::Between
        );
        assert!("drive".parse::<StrokePhase>().is_err());
        assert_eq!(StrokePhase::Catch.to_string(), "catch");
    }
}
