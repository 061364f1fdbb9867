// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Input source handling for landmark files.
//!
//! The classifier core is a pure per-frame function; iteration over frames
//! lives here. A source resolves to an ordered list of landmark JSON files
//! (one frame each) and the iterator yields the parsed landmarks of every
//! file in turn — each frame processed, no file skipped.

use std::path::{Path, PathBuf};

use crate::error::{ClassifierError, Result};
use crate::landmarks::{load_landmarks, Landmark};

/// Represents different input sources for classification.
#[derive(Debug, Clone)]
pub enum Source {
    /// Path to a single landmark JSON file.
    Json(PathBuf),
    /// List of landmark JSON paths.
    JsonList(Vec<PathBuf>),
    /// Directory containing landmark JSON files.
    Directory(PathBuf),
    /// Glob pattern for landmark JSON files.
    Glob(String),
}

impl Source {
    /// Check if this source is a single frame.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Check if this source is a directory, glob, or list of frames.
    #[must_use]
    pub const fn is_batch(&self) -> bool {
        matches!(self, Self::Directory(_) | Self::Glob(_) | Self::JsonList(_))
    }

    /// Get the path if this source has one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Json(p) | Self::Directory(p) => Some(p),
            _ => None,
        }
    }
}

/// Convert from a string path to Source.
impl From<&str> for Source {
    fn from(s: &str) -> Self {
        // Check for glob pattern
        if s.contains('*') {
            return Self::Glob(s.to_string());
        }

        let path = PathBuf::from(s);
        if path.is_dir() {
            return Self::Directory(path);
        }

        // Default to a single landmark file
        Self::Json(path)
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Self::from(path.to_string_lossy().as_ref())
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Self::from(path.to_string_lossy().as_ref())
    }
}

impl From<Vec<PathBuf>> for Source {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self::JsonList(paths)
    }
}

/// Metadata about a source frame.
#[derive(Debug, Clone)]
pub struct SourceMeta {
    /// Frame index within the source.
    pub frame_idx: usize,
    /// Total frames in the source.
    pub total_frames: usize,
    /// Path of the landmark file.
    pub path: String,
}

/// Iterator over frames from a source.
///
/// Yields one parsed landmark set per file. A file that fails to read or
/// parse yields an `Err` item; iteration continues with the next file.
pub struct SourceIterator {
    frame_paths: Vec<PathBuf>,
    current_frame: usize,
}

impl SourceIterator {
    /// Create a new source iterator.
    ///
    /// # Arguments
    ///
    /// * `source` - The source to resolve into an ordered file list.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved (e.g., the
    /// directory does not exist).
    pub fn new(source: Source) -> Result<Self> {
        let frame_paths = match source {
            Source::Json(path) => vec![path],
            Source::JsonList(paths) => paths,
            Source::Directory(path) => Self::collect_json_from_dir(&path)?,
            Source::Glob(pattern) => Self::collect_json_from_glob(&pattern)?,
        };

        Ok(Self {
            frame_paths,
            current_frame: 0,
        })
    }

    /// Number of frames this source resolves to.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frame_paths.len()
    }

    /// Whether the source resolved to no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame_paths.is_empty()
    }

    /// Collect landmark file paths from a directory, sorted by name.
    fn collect_json_from_dir(dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(ClassifierError::LandmarkError(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| ClassifierError::IoError(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| Self::is_landmark_file(path))
            .collect();

        paths.sort();
        Ok(paths)
    }

    /// Collect landmark file paths from a glob pattern.
    ///
    /// Note: This is a simplified glob that only supports patterns like
    /// "dir/*.json". For more complex patterns, consider the `glob` crate.
    fn collect_json_from_glob(pattern: &str) -> Result<Vec<PathBuf>> {
        if let Some(star_pos) = pattern.find('*') {
            let dir_part = &pattern[..star_pos];
            let dir = if dir_part.is_empty() {
                Path::new(".")
            } else {
                Path::new(dir_part.trim_end_matches('/').trim_end_matches('\\'))
            };

            let ext_filter: Option<String> = pattern[star_pos..]
                .strip_prefix("*.")
                .map(str::to_lowercase);

            if !dir.is_dir() {
                return Err(ClassifierError::LandmarkError(format!(
                    "Directory not found: {}",
                    dir.display()
                )));
            }

            let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
                .map_err(|e| ClassifierError::IoError(e.to_string()))?
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.path())
                .filter(|path| {
                    ext_filter.as_ref().map_or_else(
                        || Self::is_landmark_file(path),
                        |ext| {
                            path.extension()
                                .is_some_and(|e| e.to_string_lossy().to_lowercase() == *ext)
                        },
                    )
                })
                .collect();

            paths.sort();
            Ok(paths)
        } else {
            // No glob pattern, treat as single file
            Ok(vec![PathBuf::from(pattern)])
        }
    }

    /// Check if a path is a landmark file based on extension.
    fn is_landmark_file(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy().to_lowercase() == "json")
    }
}

impl Iterator for SourceIterator {
    type Item = Result<(Vec<Landmark>, SourceMeta)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_frame >= self.frame_paths.len() {
            return None;
        }

        let path = &self.frame_paths[self.current_frame];
        let meta = SourceMeta {
            frame_idx: self.current_frame,
            total_frames: self.frame_paths.len(),
            path: path.to_string_lossy().to_string(),
        };

        self.current_frame += 1;

        match load_landmarks(path) {
            Ok(landmarks) => Some(Ok((landmarks, meta))),
            Err(e) => Some(Err(e)),
        }
    }
}
