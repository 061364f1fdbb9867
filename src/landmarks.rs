// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose landmark records as emitted by the upstream detector.
//!
//! The detector writes one JSON array per frame, each element carrying an
//! indexed landmark with normalized coordinates and a visibility score.
//! This module defines that wire shape and the load/save helpers around it;
//! it performs no interpretation of the coordinates.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// Number of landmarks in the upstream pose model's schema.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// One detected body point for a single frame.
///
/// Coordinates are normalized to the image: `x` and `y` in `[0, 1]` with the
/// origin at the top-left and `y` increasing downward. `z` is a normalized
/// depth estimate and `visibility` a tracking confidence in `[0, 1]`; neither
/// is consumed by the classification core today, but both are part of the
/// detector's record shape and survive round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Landmark index in the upstream schema (0 to 32).
    pub id: u32,
    /// Normalized horizontal position.
    pub x: f32,
    /// Normalized vertical position (downward).
    pub y: f32,
    /// Normalized depth (unused by the core).
    pub z: f32,
    /// Tracking confidence (unused by the core).
    pub visibility: f32,
}

impl Landmark {
    /// Whether the id fits the upstream schema.
    #[must_use]
    pub const fn is_in_schema(&self) -> bool {
        (self.id as usize) < POSE_LANDMARK_COUNT
    }
}

/// Load one frame's landmarks from a JSON file.
///
/// The file is a JSON array of landmark records; an empty array (no person
/// detected) is valid and loads as an empty vector.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn load_landmarks<P: AsRef<Path>>(path: P) -> Result<Vec<Landmark>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        ClassifierError::IoError(format!("Failed to read {}: {e}", path.display()))
    })?;
    let landmarks: Vec<Landmark> = serde_json::from_str(&contents).map_err(|e| {
        ClassifierError::JsonError(format!("Failed to parse {}: {e}", path.display()))
    })?;
    Ok(landmarks)
}

/// Save one frame's landmarks as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_landmarks<P: AsRef<Path>>(path: P, landmarks: &[Landmark]) -> Result<()> {
    let path = path.as_ref();
    let contents = serde_json::to_string_pretty(landmarks)?;
    fs::write(path, contents).map_err(|e| {
        ClassifierError::IoError(format!("Failed to write {}: {e}", path.display()))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Landmark> {
        vec![
            Landmark {
                id: 0,
                x: 0.5,
                y: 0.1,
                z: -0.2,
                visibility: 0.99,
            },
            Landmark {
                id: 24,
                x: 0.48,
                y: 0.55,
                z: 0.0,
                visibility: 0.87,
            },
        ]
    }

    #[test]
    fn test_schema_bounds() {
        let mut lm = sample()[0];
        assert!(lm.is_in_schema());
        lm.id = 32;
        assert!(lm.is_in_schema());
        lm.id = 33;
        assert!(!lm.is_in_schema());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("rowing_classifier_landmarks_test.json");
        let landmarks = sample();

        save_landmarks(&path, &landmarks).unwrap();
        let loaded = load_landmarks(&path).unwrap();
        assert_eq!(loaded, landmarks);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_detector_output_shape() {
        // Field names exactly as the detector writes them.
        let json = r#"[{"id": 0, "x": 0.5, "y": 0.1, "z": -0.2, "visibility": 0.99}]"#;
        let landmarks: Vec<Landmark> = serde_json::from_str(json).unwrap();
        assert_eq!(landmarks.len(), 1);
        assert_eq!(landmarks[0].id, 0);
        assert!((landmarks[0].visibility - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_empty_frame_loads() {
        let landmarks: Vec<Landmark> = serde_json::from_str("[]").unwrap();
        assert!(landmarks.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_landmarks("definitely/not/a/file.json").unwrap_err();
        assert!(err.to_string().contains("IO error"));
    }
}
