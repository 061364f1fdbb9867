// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]

//! # Rowing Stroke-Phase Classification Library
//!
//! Classifies a detected human pose, expressed as 2D body-landmark
//! coordinates, into a rowing-stroke phase: not rowing, catch, finish, or
//! in-between. The crate is a post-processing stage downstream of a pose
//! estimation model: it consumes the per-frame landmark JSON the detector
//! emits and never runs a model itself.
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use rowing_classifier::{classify, load_landmarks, Classification, ClassifierConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let landmarks = load_landmarks("jsons/frame01.json")?;
//!     let config = ClassifierConfig::default();
//!
//!     match classify(&landmarks, &config) {
//!         Classification::Rowing(phase) => println!("rowing: {phase}"),
//!         other => println!("{other}"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Classify every landmark file in a folder
//! rowing-classifier classify --source jsons/
//!
//! # Single frame
//! rowing-classifier classify --source frame.json
//!
//! # Save annotated images next to their source images
//! rowing-classifier classify --source jsons/ --images upload/ --save
//! ```
//!
//! ## Pipeline
//!
//! Raw landmarks → [`extract_keypoints`] → named keypoints →
//! [`posture::is_rowing`] → [`phase::classify_phase`] →
//! [`Classification`]. Each stage is a pure function of its input; frames
//! may be classified concurrently with no coordination.
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`landmarks`] | Landmark wire records and JSON load/save |
//! | [`keypoints`] | Named keypoints and the id-to-name extraction table |
//! | [`posture`] | Rowing-posture predicates |
//! | [`phase`] | Stroke-phase decision table |
//! | [`classify`] | Per-frame pipeline and [`Classification`] results |
//! | [`config`] | [`ClassifierConfig`] threshold configuration |
//! | [`source`] | Input source handling over landmark files |
//! | [`annotate`] | Skeleton drawing and annotated-image output |
//! | [`error`] | Error types ([`ClassifierError`], [`Result`]) |

// Modules
pub mod annotate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod keypoints;
pub mod landmarks;
pub mod phase;
pub mod posture;
pub mod source;

// Re-export main types for convenience
pub use classify::{classify, Classification, IndeterminateReason};
pub use config::ClassifierConfig;
pub use error::{ClassifierError, Result};
pub use keypoints::{extract_keypoints, Keypoint, NamedKeypoints, Point, KEYPOINTS};
pub use landmarks::{load_landmarks, save_landmarks, Landmark, POSE_LANDMARK_COUNT};
pub use phase::StrokePhase;
pub use source::{Source, SourceIterator, SourceMeta};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
