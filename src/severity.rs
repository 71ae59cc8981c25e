//! Pluggable severity classification.
//!
//! Severity is deliberately kept out of the comparers: thresholds live in
//! caller policy, so they can change without touching the comparison
//! algorithms. The report layer may apply a classifier to magnitudes it
//! picks off the records (changed pixel counts, hash distances, cell
//! counts); the core never does.

use serde::{Deserialize, Serialize};

use crate::model::Modality;

/// Severity label for a single difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Below noticing threshold
    Info,
    /// Minor, likely cosmetic
    Low,
    /// Worth review
    Medium,
    /// Probably a real content change
    High,
    /// Must be reviewed
    Critical,
}

/// Maps a difference magnitude to a severity label.
pub trait SeverityClassifier: Send + Sync {
    /// Classify one difference by its modality and magnitude.
    ///
    /// The meaning of `magnitude` is modality-specific: changed pixel
    /// ratio times 100 for images, differing cell count for tables,
    /// changed line count for text.
    fn classify(&self, modality: Modality, magnitude: f64) -> Severity;
}

/// Default classifier: a configurable numeric ladder applied uniformly.
#[derive(Debug, Clone)]
pub struct ThresholdClassifier {
    /// Magnitudes at or below this are `Info`
    pub info_max: f64,
    /// Magnitudes at or below this are `Low`
    pub low_max: f64,
    /// Magnitudes at or below this are `Medium`
    pub medium_max: f64,
    /// Magnitudes at or below this are `High`; above is `Critical`
    pub high_max: f64,
}

impl ThresholdClassifier {
    /// Create a classifier with the default ladder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ladder cutoffs.
    pub fn with_cutoffs(mut self, info_max: f64, low_max: f64, medium_max: f64, high_max: f64) -> Self {
        self.info_max = info_max;
        self.low_max = low_max;
        self.medium_max = medium_max;
        self.high_max = high_max;
        self
    }
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self {
            info_max: 10.0,
            low_max: 40.0,
            medium_max: 100.0,
            high_max: 1000.0,
        }
    }
}

impl SeverityClassifier for ThresholdClassifier {
    fn classify(&self, _modality: Modality, magnitude: f64) -> Severity {
        if magnitude <= self.info_max {
            Severity::Info
        } else if magnitude <= self.low_max {
            Severity::Low
        } else if magnitude <= self.medium_max {
            Severity::Medium
        } else if magnitude <= self.high_max {
            Severity::High
        } else {
            Severity::Critical
        }
    }
}
