//! # docdiff
//!
//! Multi-modal document comparison library for Rust.
//!
//! Takes two parallel extractions of the same document (text lines per
//! page, table rows, rendered page images) and produces a structured,
//! reproducible difference report across three modalities: textual
//! content, tabular content, and visual page appearance.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docdiff::{compare_artifact_dirs, CompareOptions, write_report, ReportOptions};
//! use std::path::Path;
//!
//! fn main() -> docdiff::Result<()> {
//!     // Each directory holds extraction.json + pages/p{n}.png
//!     let report = compare_artifact_dirs(
//!         Path::new("./src_doc"),
//!         Path::new("./trg_doc"),
//!         &CompareOptions::default(),
//!     )?;
//!
//!     println!("text diffs: {}", report.summary.text_diffs);
//!     write_report(&report, Path::new("./out"), &ReportOptions::default(), None)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Text diffs**: page-by-page LCS line alignment with exact opcode
//!   ranges (`replace`/`insert`/`delete`)
//! - **Table diffs**: order-insensitive multiset comparison or
//!   position-aligned cell-by-cell comparison
//! - **Visual diffs**: perceptual hash distance, thresholded pixel change
//!   mask, and a highlighted overlay image per page
//! - **Parallel processing**: page pairs compared with Rayon
//! - **Reports**: JSON and self-contained HTML with persisted PNG assets
//!
//! Extraction, rasterization, and OCR are external collaborators consumed
//! through the traits in [`provider`].

pub mod compare;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;
pub mod severity;

// Re-export commonly used types
pub use compare::{
    compare_extractions, CompareOptions, ComparisonReport, Normalizer, Summary,
    SummaryAggregator, TableComparer, TableComparison, TableMode, TextComparer, VisualComparer,
};
pub use error::{Error, Result};
pub use model::{
    CellDiff, DiffRecord, ExtractedTable, Extraction, ImageDiff, ImageDiffKind, Modality,
    PageArtifacts, TableDiff, TableDiffKind, TextDiff, TextOp,
};
pub use provider::{ArtifactProvider, ExtractionProvider, OcrEngine, Rasterizer};
pub use report::{write_report, JsonFormat, PageAssets, ReportOptions, ReportPaths, ReportView};
pub use severity::{Severity, SeverityClassifier, ThresholdClassifier};

use std::path::Path;

/// Compare two pre-extracted artifact directories.
///
/// Each directory must contain `extraction.json` and optionally a
/// `pages/` directory of rendered page PNGs (see [`ArtifactProvider`]).
pub fn compare_artifact_dirs(
    source_dir: &Path,
    target_dir: &Path,
    options: &CompareOptions,
) -> Result<ComparisonReport> {
    let provider = ArtifactProvider::new();
    let source = provider.load_dir(source_dir)?;
    let target = provider.load_dir(target_dir)?;
    Ok(compare_extractions(&source, &target, options))
}

/// Builder for configuring and running a comparison.
///
/// # Example
///
/// ```no_run
/// use docdiff::DocDiff;
/// use std::path::Path;
///
/// let result = DocDiff::new()
///     .with_pixel_threshold(40)
///     .aligned_tables()
///     .compare_dirs(Path::new("./a"), Path::new("./b"))?;
/// result.write_to(Path::new("./out"))?;
/// # Ok::<(), docdiff::Error>(())
/// ```
pub struct DocDiff {
    compare_options: CompareOptions,
    report_options: ReportOptions,
}

impl DocDiff {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            compare_options: CompareOptions::default(),
            report_options: ReportOptions::default(),
        }
    }

    /// Set the pixel intensity threshold for the change mask.
    pub fn with_pixel_threshold(mut self, threshold: u8) -> Self {
        self.compare_options = self.compare_options.with_pixel_threshold(threshold);
        self
    }

    /// Use position-aligned table comparison.
    pub fn aligned_tables(mut self) -> Self {
        self.compare_options = self.compare_options.aligned_tables();
        self
    }

    /// Disable parallel page comparison.
    pub fn sequential(mut self) -> Self {
        self.compare_options = self.compare_options.sequential();
        self
    }

    /// Skip keeping derived page images on the records.
    pub fn without_artifacts(mut self) -> Self {
        self.compare_options = self.compare_options.with_artifacts(false);
        self.report_options = self.report_options.with_assets(false);
        self
    }

    /// Set report output options.
    pub fn with_report_options(mut self, options: ReportOptions) -> Self {
        self.report_options = options;
        self
    }

    /// Compare two already-loaded extractions.
    pub fn compare(self, source: &Extraction, target: &Extraction) -> DocDiffResult {
        let report = compare_extractions(source, target, &self.compare_options);
        DocDiffResult {
            report,
            report_options: self.report_options,
        }
    }

    /// Compare two artifact directories.
    pub fn compare_dirs(self, source_dir: &Path, target_dir: &Path) -> Result<DocDiffResult> {
        let provider = ArtifactProvider::new();
        let source = provider.load_dir(source_dir)?;
        let target = provider.load_dir(target_dir)?;
        Ok(self.compare(&source, &target))
    }
}

impl Default for DocDiff {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a comparison run, ready for report output.
pub struct DocDiffResult {
    /// The comparison result
    pub report: ComparisonReport,
    report_options: ReportOptions,
}

impl DocDiffResult {
    /// Serialize the report (without asset resolution) to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let json = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(&self.report)?,
            JsonFormat::Compact => serde_json::to_string(&self.report)?,
        };
        Ok(json)
    }

    /// Write report files (JSON, HTML, assets) into a directory.
    pub fn write_to(&self, out_dir: &Path) -> Result<ReportPaths> {
        write_report(&self.report, out_dir, &self.report_options, None)
    }

    /// Write report files with OCR text for human review.
    pub fn write_to_with_ocr(&self, out_dir: &Path, ocr: &dyn OcrEngine) -> Result<ReportPaths> {
        write_report(&self.report, out_dir, &self.report_options, Some(ocr))
    }

    /// Get the comparison report.
    pub fn report(&self) -> &ComparisonReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docdiff_builder() {
        let diff = DocDiff::new()
            .with_pixel_threshold(50)
            .aligned_tables()
            .sequential();

        assert_eq!(diff.compare_options.pixel_threshold, 50);
        assert_eq!(diff.compare_options.table_mode, TableMode::Aligned);
        assert!(!diff.compare_options.parallel);
    }

    #[test]
    fn test_docdiff_without_artifacts() {
        let diff = DocDiff::new().without_artifacts();
        assert!(!diff.compare_options.keep_artifacts);
        assert!(!diff.report_options.write_assets);
    }

    #[test]
    fn test_compare_empty_extractions() {
        let ex = Extraction::new();
        let result = DocDiff::new().compare(&ex, &ex);
        assert!(!result.report().has_differences());
    }
}
