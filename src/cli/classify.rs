// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::{Path, PathBuf};
use std::process;

use crate::annotate::{annotate_image, find_next_run_dir};
use crate::classify::{classify, Classification};
use crate::cli::args::ClassifyArgs;
use crate::config::ClassifierConfig;
use crate::phase::StrokePhase;
use crate::source::{Source, SourceIterator};
use crate::{error, info, success, verbose, warn};

/// Run stroke-phase classification over a landmark source.
pub fn run_classification(args: &ClassifyArgs) {
    crate::cli::logging::set_verbose(args.verbose);

    let config = ClassifierConfig::new()
        .with_standing_ratio(args.standing_ratio)
        .with_lying_ratio(args.lying_ratio);

    let source = Source::from(args.source.as_str());
    let iter = match SourceIterator::new(source) {
        Ok(iter) => iter,
        Err(e) => {
            error!("Error reading source: {e}");
            process::exit(1);
        }
    };

    if iter.is_empty() {
        warn!("No landmark files found in '{}'", args.source);
        return;
    }

    let images_dir = args.images.as_ref().map(PathBuf::from);
    let save_dir = if args.save {
        if images_dir.is_none() {
            warn!(
                "--save needs --images to locate the frames' source images; nothing will be written"
            );
            None
        } else {
            let dir = find_next_run_dir("runs/classify", "predict");
            if let Err(e) = std::fs::create_dir_all(&dir) {
                error!("Failed to create save directory {dir}: {e}");
                process::exit(1);
            }
            Some(PathBuf::from(dir))
        }
    } else {
        None
    };

    info!(
        "Rowing Classifier {} 🚀 stroke-phase classification",
        crate::VERSION
    );

    let mut counts = ClassificationCounts::default();
    for item in iter {
        let (landmarks, meta) = match item {
            Ok(val) => val,
            Err(e) => {
                error!("Error reading source: {e}");
                continue;
            }
        };

        let result = classify(&landmarks, &config);
        counts.add(&result);

        verbose!(
            "json {}/{} {}: {}, {} landmarks",
            meta.frame_idx + 1,
            meta.total_frames,
            meta.path,
            result.verbose(),
            landmarks.len()
        );

        if let (Some(save_dir), Some(images_dir)) = (&save_dir, &images_dir) {
            save_annotated(save_dir, images_dir, &meta.path, &landmarks, &result);
        }
    }

    success!("{} frames: {}", counts.total(), counts.summary());
    if let Some(ref dir) = save_dir {
        verbose!("Results saved to {}", dir.display());
    }
}

/// Annotate and save the image paired with one landmark file.
fn save_annotated(
    save_dir: &Path,
    images_dir: &Path,
    landmark_path: &str,
    landmarks: &[crate::landmarks::Landmark],
    result: &Classification,
) {
    let Some(image_path) = find_paired_image(images_dir, landmark_path) else {
        warn!(
            "No image matching '{landmark_path}' in {}",
            images_dir.display()
        );
        return;
    };

    let img = match image::open(&image_path) {
        Ok(img) => img,
        Err(e) => {
            error!("Failed to load {}: {e}", image_path.display());
            return;
        }
    };

    let annotated = annotate_image(&img, landmarks, result);
    let file_name = image_path
        .file_stem()
        .map_or_else(|| "frame".into(), |s| s.to_string_lossy().to_string());
    let out_path = save_dir.join(format!("{file_name}.jpg"));
    if let Err(e) = annotated.save(&out_path) {
        error!("Failed to save {}: {e}", out_path.display());
    }
}

/// Locate the image a landmark file was generated from, by file stem.
fn find_paired_image(images_dir: &Path, landmark_path: &str) -> Option<PathBuf> {
    let stem = Path::new(landmark_path).file_stem()?;
    for ext in ["jpg", "jpeg", "png"] {
        let candidate = images_dir.join(stem).with_extension(ext);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Tally of classification outcomes across a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationCounts {
    /// Frames with no usable detection.
    pub no_detection: usize,
    /// Frames whose posture could not be determined.
    pub indeterminate: usize,
    /// Frames classified as not rowing.
    pub not_rowing: usize,
    /// Frames at the catch.
    pub catch: usize,
    /// Frames at the finish.
    pub finish: usize,
    /// Frames between catch and finish.
    pub between: usize,
}

impl ClassificationCounts {
    /// Record one classification.
    pub fn add(&mut self, result: &Classification) {
        match result {
            Classification::NoDetection => self.no_detection += 1,
            Classification::Indeterminate(_) => self.indeterminate += 1,
            Classification::NotRowing => self.not_rowing += 1,
            Classification::Rowing(StrokePhase::Catch) => self.catch += 1,
            Classification::Rowing(StrokePhase::Finish) => self.finish += 1,
            Classification::Rowing(StrokePhase::Between) => self.between += 1,
        }
    }

    /// Total frames recorded.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.no_detection
            + self.indeterminate
            + self.not_rowing
            + self.catch
            + self.finish
            + self.between
    }

    /// Format the non-zero tallies as a summary string
    /// (e.g., "2 at the catch, 1 not rowing").
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        for (count, label) in [
            (self.catch, "at the catch"),
            (self.finish, "at the finish"),
            (self.between, "between catch and finish"),
            (self.not_rowing, "not rowing"),
            (self.indeterminate, "indeterminate"),
            (self.no_detection, "no detection"),
        ] {
            if count > 0 {
                parts.push(format!("{count} {label}"));
            }
        }

        if parts.is_empty() {
            "(no frames)".to_string()
        } else {
            parts.join(", ")
        }
    }
}
