// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Classification results and the per-frame pipeline.
//!
//! [`classify`] runs one frame of raw landmarks through extraction, posture
//! evaluation, and phase classification. Every outcome — including the
//! data-shape failures — is a [`Classification`] value; nothing in the
//! pipeline panics or returns an error for missing or degenerate input.

use std::fmt;

use crate::config::ClassifierConfig;
use crate::keypoints::{extract_keypoints, Keypoint};
use crate::landmarks::Landmark;
use crate::phase::{classify_phase, StrokePhase};
use crate::posture::is_rowing;

/// Why a posture or phase formula could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndeterminateReason {
    /// A keypoint required by the formula being evaluated was absent from
    /// the (partial) extraction.
    MissingKeypoint(Keypoint),
    /// A formula denominator was (near-)zero; the named measurement
    /// collapsed to a point.
    DegenerateGeometry(&'static str),
}

impl fmt::Display for IndeterminateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKeypoint(kp) => write!(f, "missing keypoint '{kp}'"),
            Self::DegenerateGeometry(measure) => {
                write!(f, "degenerate geometry: {measure} is zero")
            }
        }
    }
}

/// Outcome of classifying one frame.
///
/// Created fresh per frame, never mutated, and carries no state beyond the
/// call that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    /// The raw landmark set was empty or carried none of the classifier
    /// keypoint ids.
    NoDetection,
    /// A posture or phase formula was undefined for this frame.
    Indeterminate(IndeterminateReason),
    /// A person was detected but their posture is not a rowing posture.
    NotRowing,
    /// The person is rowing, in the given stroke phase.
    Rowing(StrokePhase),
}

impl Classification {
    /// Whether this frame classified as rowing.
    #[must_use]
    pub const fn is_rowing(&self) -> bool {
        matches!(self, Self::Rowing(_))
    }

    /// The stroke phase, if the frame classified as rowing.
    #[must_use]
    pub const fn phase(&self) -> Option<StrokePhase> {
        match self {
            Self::Rowing(phase) => Some(*phase),
            _ => None,
        }
    }

    /// Generate a one-line summary string describing the result.
    ///
    /// # Returns
    ///
    /// * A short lowercase summary (e.g., "rowing, at the catch").
    #[must_use]
    pub fn verbose(&self) -> String {
        match self {
            Self::NoDetection => "no people detected".to_string(),
            Self::Indeterminate(_) => "unable to determine posture".to_string(),
            Self::NotRowing => "not rowing".to_string(),
            Self::Rowing(StrokePhase::Catch) => "rowing, at the catch".to_string(),
            Self::Rowing(StrokePhase::Finish) => "rowing, at the finish".to_string(),
            Self::Rowing(StrokePhase::Between) => {
                "rowing, between catch and finish".to_string()
            }
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verbose())
    }
}

/// Classify one frame of raw landmarks.
///
/// Pipeline: extract named keypoints, evaluate the rowing-posture
/// predicates, then classify the stroke phase. Each stage short-circuits
/// into the corresponding [`Classification`] variant. Pure: the same input
/// always yields the same result.
///
/// # Arguments
///
/// * `landmarks` - Raw landmark records for one frame.
/// * `config` - Threshold configuration.
///
/// # Returns
///
/// * The frame's `Classification`.
#[must_use]
pub fn classify(landmarks: &[Landmark], config: &ClassifierConfig) -> Classification {
    let Some(keypoints) = extract_keypoints(landmarks) else {
        return Classification::NoDetection;
    };

    match is_rowing(&keypoints, config) {
        Err(reason) => Classification::Indeterminate(reason),
        Ok(false) => Classification::NotRowing,
        Ok(true) => match classify_phase(&keypoints) {
            Err(reason) => Classification::Indeterminate(reason),
            Ok(phase) => Classification::Rowing(phase),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    fn landmark(id: u32, x: f32, y: f32) -> Landmark {
        Landmark {
            id,
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    /// Frame at the catch: compressed legs, knee close to the nose in y.
    fn catch_frame() -> Vec<Landmark> {
        vec![
            landmark(0, 0.60, 0.35),  // nose
            landmark(11, 0.55, 0.45), // shoulder_l
            landmark(12, 0.55, 0.45), // shoulder_r
            landmark(13, 0.62, 0.50), // elbow_l
            landmark(14, 0.62, 0.50), // elbow_r
            landmark(15, 0.70, 0.52), // wrist_l
            landmark(16, 0.70, 0.52), // wrist_r
            landmark(23, 0.45, 0.72), // hip_l
            landmark(24, 0.45, 0.72), // hip_r
            landmark(25, 0.58, 0.50), // knee_l
            landmark(26, 0.58, 0.50), // knee_r
            landmark(27, 0.70, 0.80), // ankle_l
            landmark(28, 0.70, 0.80), // ankle_r
        ]
    }

    /// Frame at the finish: legs extended, wrists drawn to the shoulders.
    fn finish_frame() -> Vec<Landmark> {
        vec![
            landmark(0, 0.40, 0.30),  // nose
            landmark(11, 0.45, 0.40), // shoulder_l
            landmark(12, 0.45, 0.40), // shoulder_r
            landmark(13, 0.50, 0.52), // elbow_l
            landmark(14, 0.50, 0.52), // elbow_r
            landmark(15, 0.48, 0.42), // wrist_l
            landmark(16, 0.48, 0.42), // wrist_r
            landmark(23, 0.55, 0.60), // hip_l
            landmark(24, 0.55, 0.60), // hip_r
            landmark(25, 0.70, 0.62), // knee_l
            landmark(26, 0.70, 0.62), // knee_r
            landmark(27, 0.85, 0.65), // ankle_l
            landmark(28, 0.85, 0.65), // ankle_r
        ]
    }

    /// Upright standing pose: torso shorter than the lower leg in y.
    fn standing_frame() -> Vec<Landmark> {
        vec![
            landmark(0, 0.50, 0.10),  // nose
            landmark(11, 0.45, 0.20), // shoulder_l
            landmark(12, 0.55, 0.20), // shoulder_r
            landmark(13, 0.45, 0.35), // elbow_l
            landmark(14, 0.55, 0.35), // elbow_r
            landmark(15, 0.45, 0.45), // wrist_l
            landmark(16, 0.55, 0.45), // wrist_r
            landmark(23, 0.50, 0.50), // hip_l
            landmark(24, 0.50, 0.50), // hip_r
            landmark(25, 0.50, 0.70), // knee_l
            landmark(26, 0.50, 0.70), // knee_r
            landmark(27, 0.50, 0.90), // ankle_l
            landmark(28, 0.50, 0.90), // ankle_r
        ]
    }

    #[test]
    fn test_empty_frame_is_no_detection() {
        let config = ClassifierConfig::default();
        assert_eq!(classify(&[], &config), Classification::NoDetection);
    }

    #[test]
    fn test_unmatched_ids_are_no_detection() {
        let config = ClassifierConfig::default();
        let landmarks = vec![landmark(3, 0.1, 0.1), landmark(4, 0.2, 0.2)];
        assert_eq!(classify(&landmarks, &config), Classification::NoDetection);
    }

    #[test]
    fn test_standing_is_not_rowing() {
        let config = ClassifierConfig::default();
        assert_eq!(
            classify(&standing_frame(), &config),
            Classification::NotRowing
        );
    }

    #[test]
    fn test_catch() {
        let config = ClassifierConfig::default();
        assert_eq!(
            classify(&catch_frame(), &config),
            Classification::Rowing(StrokePhase::Catch)
        );
    }

    #[test]
    fn test_finish() {
        let config = ClassifierConfig::default();
        assert_eq!(
            classify(&finish_frame(), &config),
            Classification::Rowing(StrokePhase::Finish)
        );
    }

    #[test]
    fn test_between() {
        // Finish pose with the wrist extended past the elbow: arms no
        // longer bent, knees still not bent.
        let mut landmarks = finish_frame();
        for lm in &mut landmarks {
            if lm.id == 15 || lm.id == 16 {
                lm.x = 0.60;
                lm.y = 0.55;
            }
        }
        let config = ClassifierConfig::default();
        assert_eq!(
            classify(&landmarks, &config),
            Classification::Rowing(StrokePhase::Between)
        );
    }

    #[test]
    fn test_missing_hip_is_indeterminate() {
        let config = ClassifierConfig::default();
        let landmarks: Vec<Landmark> = catch_frame()
            .into_iter()
            .filter(|lm| lm.id != 24)
            .collect();
        assert_eq!(
            classify(&landmarks, &config),
            Classification::Indeterminate(IndeterminateReason::MissingKeypoint(
                Keypoint::HipR
            ))
        );
    }

    #[test]
    fn test_degenerate_leg_extent_is_indeterminate() {
        let config = ClassifierConfig::default();
        let mut landmarks = catch_frame();
        for lm in &mut landmarks {
            if lm.id == 28 {
                lm.y = 0.72; // same y as hip_r
            }
        }
        assert!(matches!(
            classify(&landmarks, &config),
            Classification::Indeterminate(IndeterminateReason::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_classify_is_idempotent() {
        let config = ClassifierConfig::default();
        let frame = catch_frame();
        assert_eq!(classify(&frame, &config), classify(&frame, &config));
    }

    #[test]
    fn test_verbose_lines() {
        assert_eq!(Classification::NoDetection.verbose(), "no people detected");
        assert_eq!(
            Classification::Indeterminate(IndeterminateReason::MissingKeypoint(
                Keypoint::Nose
            ))
            .verbose(),
            "unable to determine posture"
        );
        assert_eq!(Classification::NotRowing.verbose(), "not rowing");
        assert_eq!(
            Classification::Rowing(StrokePhase::Catch).verbose(),
            "rowing, at the catch"
        );
        assert_eq!(
            Classification::Rowing(StrokePhase::Between).to_string(),
            "rowing, between catch and finish"
        );
    }

    #[test]
    fn test_accessors() {
        let rowing = Classification::Rowing(StrokePhase::Finish);
        assert!(rowing.is_rowing());
        assert_eq!(rowing.phase(), Some(StrokePhase::Finish));
        assert!(!Classification::NotRowing.is_rowing());
        assert_eq!(Classification::NoDetection.phase(), None);
    }
}
