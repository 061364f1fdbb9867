// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Rowing-posture predicates.
//!
//! Three boolean predicates over the named keypoints decide whether the
//! subject is in a rowing posture at all. The formulas read the right-side
//! keypoints, except for the raised-arm check which accepts either side.
//! Coordinates are normalized with y increasing downward, so "above" means
//! a smaller y.

use crate::classify::IndeterminateReason;
use crate::config::ClassifierConfig;
use crate::keypoints::{Keypoint, NamedKeypoints, Point};

/// Denominators below this are treated as degenerate rather than divided by.
const GEOMETRY_EPS: f32 = 1e-6;

fn require(
    keypoints: &NamedKeypoints,
    keypoint: Keypoint,
) -> Result<Point, IndeterminateReason> {
    keypoints
        .get(keypoint)
        .ok_or(IndeterminateReason::MissingKeypoint(keypoint))
}

/// Whether the subject is NOT standing upright.
///
/// Compares the torso's vertical extent (shoulder to hip) against the
/// lower body's (hip to ankle); a standing person measures at or below the
/// configured ratio.
///
/// # Errors
///
/// Returns `IndeterminateReason` if a required keypoint is missing or the
/// hip-to-ankle extent is (near-)zero.
pub fn not_standing(
    keypoints: &NamedKeypoints,
    config: &ClassifierConfig,
) -> Result<bool, IndeterminateReason> {
    let shoulder_r = require(keypoints, Keypoint::ShoulderR)?;
    let hip_r = require(keypoints, Keypoint::HipR)?;
    let ankle_r = require(keypoints, Keypoint::AnkleR)?;

    let torso_extent = (shoulder_r.y - hip_r.y).abs();
    let leg_extent = (hip_r.y - ankle_r.y).abs();
    if leg_extent < GEOMETRY_EPS {
        return Err(IndeterminateReason::DegenerateGeometry(
            "hip-to-ankle vertical extent",
        ));
    }

    Ok(torso_extent / leg_extent > config.standing_ratio)
}

/// Whether either elbow sits above that side's hip and ankle.
///
/// A proxy for the seated rowing arm position: with the subject upright and
/// arms down, neither elbow clears its hip. Also rejects an upside-down
/// detection, where both elbows fall below the hips in image coordinates.
///
/// # Errors
///
/// Returns `IndeterminateReason` if any of the six keypoints is missing.
pub fn raised_orientation(
    keypoints: &NamedKeypoints,
) -> Result<bool, IndeterminateReason> {
    let elbow_r = require(keypoints, Keypoint::ElbowR)?;
    let hip_r = require(keypoints, Keypoint::HipR)?;
    let ankle_r = require(keypoints, Keypoint::AnkleR)?;
    let elbow_l = require(keypoints, Keypoint::ElbowL)?;
    let hip_l = require(keypoints, Keypoint::HipL)?;
    let ankle_l = require(keypoints, Keypoint::AnkleL)?;

    Ok((elbow_r.y < hip_r.y && elbow_r.y < ankle_r.y)
        || (elbow_l.y < hip_l.y && elbow_l.y < ankle_l.y))
}

/// Whether the subject is NOT lying flat.
///
/// Normalizes the head-to-knee vertical spread by the knee-to-hip
/// horizontal offset; a body oriented vertically scores high, a body flat
/// on the ground scores low.
///
/// # Errors
///
/// Returns `IndeterminateReason` if a required keypoint is missing or the
/// knee-to-hip horizontal offset is (near-)zero.
pub fn not_lying(
    keypoints: &NamedKeypoints,
    config: &ClassifierConfig,
) -> Result<bool, IndeterminateReason> {
    let nose = require(keypoints, Keypoint::Nose)?;
    let knee_r = require(keypoints, Keypoint::KneeR)?;
    let hip_r = require(keypoints, Keypoint::HipR)?;

    let vertical_spread = (nose.y - knee_r.y).abs();
    let horizontal_offset = (knee_r.x - hip_r.x).abs();
    if horizontal_offset < GEOMETRY_EPS {
        return Err(IndeterminateReason::DegenerateGeometry(
            "knee-to-hip horizontal offset",
        ));
    }

    Ok(vertical_spread / horizontal_offset > config.lying_ratio)
}

/// Whether the subject is in a rowing posture.
///
/// All three predicates must hold. Evaluation short-circuits left to
/// right, so keypoints and denominators are only required by the
/// predicates actually reached: an upright subject classifies as not
/// rowing even when the lying check would be undefined for that frame.
///
/// # Errors
///
/// Returns `IndeterminateReason` from the first reached predicate that
/// cannot be evaluated.
pub fn is_rowing(
    keypoints: &NamedKeypoints,
    config: &ClassifierConfig,
) -> Result<bool, IndeterminateReason> {
    if !not_standing(keypoints, config)? {
        return Ok(false);
    }
    if !raised_orientation(keypoints)? {
        return Ok(false);
    }
    not_lying(keypoints, config)
}
