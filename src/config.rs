// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Classifier configuration.
//!
//! This module defines the [`ClassifierConfig`] struct, which controls the
//! geometric thresholds of the posture predicates. The defaults reproduce
//! the tuned constants of the deployed classifier; override them only when
//! recalibrating against new footage.

/// Configuration for stroke-phase classification.
///
/// Uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use rowing_classifier::ClassifierConfig;
///
/// let config = ClassifierConfig::new()
///     .with_standing_ratio(1.2)
///     .with_lying_ratio(0.5);
/// ```
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Torso-to-lower-leg vertical extent ratio above which the subject is
    /// considered NOT standing. A standing person measures at or below 1.0.
    pub standing_ratio: f32,
    /// Head-to-knee vertical spread over knee-to-hip horizontal offset,
    /// above which the subject is considered NOT lying down.
    pub lying_ratio: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            standing_ratio: 1.0,
            lying_ratio: 0.6,
        }
    }
}

impl ClassifierConfig {
    /// Create a new configuration with default thresholds.
    ///
    /// # Returns
    ///
    /// * A new `ClassifierConfig` instance with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the standing-detection ratio threshold.
    ///
    /// # Arguments
    ///
    /// * `ratio` - The torso/lower-leg extent ratio that must be exceeded.
    ///
    /// # Returns
    ///
    /// * The modified `ClassifierConfig`.
    #[must_use]
    pub const fn with_standing_ratio(mut self, ratio: f32) -> Self {
        self.standing_ratio = ratio;
        self
    }

    /// Set the lying-detection ratio threshold.
    ///
    /// # Arguments
    ///
    /// * `ratio` - The vertical-spread/horizontal-offset ratio that must be
    ///   exceeded.
    ///
    /// # Returns
    ///
    /// * The modified `ClassifierConfig`.
    #[must_use]
    pub const fn with_lying_ratio(mut self, ratio: f32) -> Self {
        self.lying_ratio = ratio;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_deployed_constants() {
        let config = ClassifierConfig::default();
        assert!((config.standing_ratio - 1.0).abs() < f32::EPSILON);
        assert!((config.lying_ratio - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_builder() {
        let config = ClassifierConfig::new()
            .with_standing_ratio(1.5)
            .with_lying_ratio(0.4);
        assert!((config.standing_ratio - 1.5).abs() < f32::EPSILON);
        assert!((config.lying_ratio - 0.4).abs() < f32::EPSILON);
    }
}
