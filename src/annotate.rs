// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Annotated-image output.
//!
//! Draws the detected skeleton and the classification verdict onto the
//! source image the landmarks were detected in. Landmark coordinates are
//! normalized, so drawing only needs the image's own dimensions.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use ab_glyph::{FontRef, PxScale};
use image::{DynamicImage, Rgb};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};

use crate::classify::Classification;
use crate::keypoints::{Keypoint, KEYPOINTS};
use crate::landmarks::Landmark;

/// Assets URL for downloading fonts
const ASSETS_URL: &str = "https://github.com/ultralytics/assets/releases/download/v0.0.0";

/// Ultralytics Pose Color Palette
pub const POSE_COLORS: [[u8; 3]; 20] = [
    [255, 128, 0],   // #ff8000
    [255, 153, 51],  // #ff9933
    [255, 178, 102], // #ffb266
    [230, 230, 0],   // #e6e600
    [255, 153, 255], // #ff99ff
    [153, 204, 255], // #99ccff
    [255, 102, 255], // #ff66ff
    [255, 51, 255],  // #ff33ff
    [102, 178, 255], // #66b2ff
    [51, 153, 255],  // #3399ff
    [255, 153, 153], // #ff9999
    [255, 102, 102], // #ff6666
    [255, 51, 51],   // #ff3333
    [153, 255, 153], // #99ff99
    [102, 255, 102], // #66ff66
    [51, 255, 51],   // #33ff33
    [0, 255, 0],     // #00ff00
    [0, 0, 255],     // #0000ff
    [255, 0, 0],     // #ff0000
    [255, 255, 255], // #ffffff
];

/// Skeleton structure over the classifier keypoints (pairs of landmark ids)
/// Defines which keypoints connect to form the body skeleton
pub const SKELETON: [[u32; 2]; 12] = [
    [11, 12], // left shoulder to right shoulder
    [11, 13], // left shoulder to left elbow
    [13, 15], // left elbow to left wrist
    [12, 14], // right shoulder to right elbow
    [14, 16], // right elbow to right wrist
    [11, 23], // left shoulder to left hip
    [12, 24], // right shoulder to right hip
    [23, 24], // left hip to right hip
    [23, 25], // left hip to left knee
    [25, 27], // left knee to left ankle
    [24, 26], // right hip to right knee
    [26, 28], // right knee to right ankle
];

/// Limb color indices mapping to `POSE_COLORS`
/// Mapping: arms=blue, torso=magenta, legs=orange
pub const LIMB_COLOR_INDICES: [usize; 12] = [7, 9, 9, 9, 9, 7, 7, 7, 0, 0, 0, 0];

/// Keypoint color indices mapping to `POSE_COLORS`, in `KEYPOINTS` order
/// Mapping: face=green, arms=blue, legs=orange
pub const KPT_COLOR_INDICES: [usize; 13] = [16, 9, 9, 9, 9, 9, 9, 0, 0, 0, 0, 0, 0];

/// Find the next available run directory (predict, predict2, predict3, etc.)
#[must_use]
pub fn find_next_run_dir(base: &str, prefix: &str) -> String {
    let base_path = Path::new(base);

    // First try without number
    let first = base_path.join(prefix);
    if !first.exists() {
        return first.to_string_lossy().to_string();
    }

    // Try with incrementing numbers
    for i in 2.. {
        let numbered = base_path.join(format!("{prefix}{i}"));
        if !numbered.exists() {
            return numbered.to_string_lossy().to_string();
        }
    }

    // Fallback (should never reach here)
    base_path.join(prefix).to_string_lossy().to_string()
}

/// Check if the label font exists locally or download it
#[must_use]
pub fn check_font(font: &str) -> Option<PathBuf> {
    let font_name = Path::new(font).file_name()?.to_string_lossy();
    let config_dir = dirs::config_dir()?.join("RowingClassifier");
    let font_path = config_dir.join(font_name.as_ref());

    if font_path.exists() {
        return Some(font_path);
    }

    if let Err(e) = fs::create_dir_all(&config_dir) {
        eprintln!("Failed to create config directory: {e}");
        return None;
    }

    // Download font
    let url = format!("{ASSETS_URL}/{font_name}");
    println!("Downloading {url} to {}", font_path.display());

    match ureq::get(&url).call() {
        Ok(response) => {
            let mut file = match File::create(&font_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Failed to create font file: {e}");
                    return None;
                }
            };

            let mut reader = response.into_body().into_reader();
            if let Err(e) = io::copy(&mut reader, &mut file) {
                eprintln!("Failed to download font: {e}");
                // Try to remove partial file
                let _ = fs::remove_file(&font_path);
                return None;
            }

            Some(font_path)
        }
        Err(e) => {
            eprintln!("Failed to download font from {url}: {e}");
            None
        }
    }
}

/// Pixel position of a landmark id, if present in the frame.
#[allow(clippy::cast_precision_loss)]
fn landmark_pixel(landmarks: &[Landmark], id: u32, width: u32, height: u32) -> Option<(f32, f32)> {
    landmarks
        .iter()
        .find(|lm| lm.id == id)
        .map(|lm| (lm.x * width as f32, lm.y * height as f32))
}

/// Annotate an image with the detected skeleton and classification label.
///
/// # Arguments
///
/// * `image` - The source image the landmarks were detected in.
/// * `landmarks` - Raw landmark records for the frame.
/// * `classification` - The frame's classification, drawn as a label.
///
/// # Returns
///
/// * A new annotated image; the input is not modified.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn annotate_image(
    image: &DynamicImage,
    landmarks: &[Landmark],
    classification: &Classification,
) -> DynamicImage {
    let mut img = image.to_rgb8();
    let (width, height) = img.dimensions();

    // Limb lines first so keypoint dots render on top of them.
    for (limb, &color_idx) in SKELETON.iter().zip(LIMB_COLOR_INDICES.iter()) {
        let start = landmark_pixel(landmarks, limb[0], width, height);
        let end = landmark_pixel(landmarks, limb[1], width, height);
        if let (Some(start), Some(end)) = (start, end) {
            let color = Rgb(POSE_COLORS[color_idx]);
            draw_line_segment_mut(&mut img, start, end, color);
        }
    }

    let radius = (width.min(height) / 160).max(3) as i32;
    for (keypoint, &color_idx) in KEYPOINTS.iter().zip(KPT_COLOR_INDICES.iter()) {
        if let Some((x, y)) = landmark_pixel(landmarks, keypoint.id(), width, height) {
            let color = Rgb(POSE_COLORS[color_idx]);
            draw_filled_circle_mut(&mut img, (x as i32, y as i32), radius, color);
        }
    }

    // Classification label in the top-left corner.
    let font_data = check_font("Arial.ttf").and_then(|path| {
        let mut file = File::open(path).ok()?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer).ok()?;
        Some(buffer)
    });
    let font = font_data
        .as_ref()
        .and_then(|data| FontRef::try_from_slice(data).ok());

    if let Some(ref f) = font {
        let scale = PxScale::from(24.0);
        let label = classification.verbose();
        draw_text_mut(&mut img, Rgb([255, 255, 255]), 10, 10, scale, f, &label);
    }

    DynamicImage::ImageRgb8(img)
}

/// Keypoint color helper for external renderers.
#[must_use]
pub fn keypoint_color(keypoint: Keypoint) -> Rgb<u8> {
    let idx = KEYPOINTS
        .iter()
        .position(|k| *k == keypoint)
        .map_or(0, |i| KPT_COLOR_INDICES[i]);
    Rgb(POSE_COLORS[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_tables_align() {
        assert_eq!(SKELETON.len(), LIMB_COLOR_INDICES.len());
        assert_eq!(KEYPOINTS.len(), KPT_COLOR_INDICES.len());
        for idx in LIMB_COLOR_INDICES.iter().chain(KPT_COLOR_INDICES.iter()) {
            assert!(*idx < POSE_COLORS.len());
        }
        // Every skeleton endpoint must be a classifier keypoint id.
        for limb in &SKELETON {
            for id in limb {
                assert!(Keypoint::from_id(*id).is_some(), "unknown id {id}");
            }
        }
    }

    #[test]
    fn test_annotate_marks_landmark_pixels() {
        let image = DynamicImage::new_rgb8(100, 100);
        let landmarks = vec![Landmark {
            id: 24,
            x: 0.5,
            y: 0.5,
            z: 0.0,
            visibility: 1.0,
        }];

        let annotated = annotate_image(&image, &landmarks, &Classification::NotRowing);
        let rgb = annotated.to_rgb8();
        // hip_r is a leg keypoint: orange dot at the center.
        assert_eq!(rgb.get_pixel(50, 50), &Rgb(POSE_COLORS[0]));
        // Far corner untouched.
        assert_eq!(rgb.get_pixel(99, 99), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_annotate_empty_frame_is_clean() {
        let image = DynamicImage::new_rgb8(100, 100);
        let annotated = annotate_image(&image, &[], &Classification::NoDetection);
        // No landmarks, no skeleton; pixels outside the label area untouched.
        assert_eq!(annotated.to_rgb8().get_pixel(99, 99), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_keypoint_color_groups() {
        assert_eq!(keypoint_color(Keypoint::Nose), Rgb(POSE_COLORS[16]));
        assert_eq!(keypoint_color(Keypoint::WristL), Rgb(POSE_COLORS[9]));
        assert_eq!(keypoint_color(Keypoint::AnkleR), Rgb(POSE_COLORS[0]));
    }

    #[test]
    fn test_find_next_run_dir() {
        let base = std::env::temp_dir().join("rowing_classifier_runs_test");
        let _ = std::fs::remove_dir_all(&base);
        let base_str = base.to_string_lossy().to_string();

        let first = find_next_run_dir(&base_str, "predict");
        assert!(first.ends_with("predict"));

        std::fs::create_dir_all(&first).unwrap();
        let second = find_next_run_dir(&base_str, "predict");
        assert!(second.ends_with("predict2"));

        let _ = std::fs::remove_dir_all(&base);
    }
}
