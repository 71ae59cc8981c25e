//! Comparison engine: three independent comparers plus the aggregator.
//!
//! No comparer depends on another's output; each is a pure function of
//! the two extractions. [`compare_extractions`] runs all three and
//! tallies the summary.

mod normalize;
mod options;
mod phash;
mod summary;
mod table;
mod text;
mod visual;

pub use normalize::Normalizer;
pub use options::{CompareOptions, TableMode};
pub use phash::{hamming, phash};
pub use summary::{Summary, SummaryAggregator};
pub use table::{RowCount, TableComparer, TableComparison};
pub use text::{align_lines, OpTag, Opcode, TextComparer};
pub use visual::VisualComparer;

use serde::{Deserialize, Serialize};

use crate::model::{DiffRecord, Extraction, ImageDiff, TableDiff, TextDiff};

/// Complete result of a comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Per-modality record lists, each ordered as produced
    pub text_diffs: Vec<TextDiff>,

    /// Tabular records (aligned-mode table records or multiset row records)
    pub table_diffs: Vec<TableDiff>,

    /// Visual records, one per page index up to the longer document
    pub image_diffs: Vec<ImageDiff>,

    /// Multiset comparison detail, present in multiset table mode
    pub table_multiset: Option<TableComparison>,

    /// Aggregated counts
    pub summary: Summary,
}

impl ComparisonReport {
    /// All records as one polymorphic list, text then table then image.
    pub fn records(&self) -> Vec<DiffRecord> {
        let mut records = Vec::with_capacity(
            self.text_diffs.len() + self.table_diffs.len() + self.image_diffs.len(),
        );
        records.extend(self.text_diffs.iter().cloned().map(DiffRecord::Text));
        records.extend(self.table_diffs.iter().cloned().map(DiffRecord::Table));
        records.extend(self.image_diffs.iter().cloned().map(DiffRecord::Image));
        records
    }

    /// Whether any modality reported a difference.
    pub fn has_differences(&self) -> bool {
        self.summary.has_differences()
    }
}

/// Run all three comparers over a pair of extractions and aggregate the
/// summary.
pub fn compare_extractions(
    source: &Extraction,
    target: &Extraction,
    options: &CompareOptions,
) -> ComparisonReport {
    let text_comparer = TextComparer::new();
    let table_comparer = TableComparer::new();
    let visual_comparer = VisualComparer::from_options(options);

    let text_diffs = text_comparer.compare(&source.pages_text, &target.pages_text);

    let (table_diffs, table_multiset) = match options.table_mode {
        TableMode::Multiset => {
            let comparison = table_comparer.compare_multiset(source, target);
            (comparison.to_records(), Some(comparison))
        }
        TableMode::Aligned => (table_comparer.compare_aligned(source, target), None),
    };

    let image_diffs = visual_comparer.compare(&source.page_images, &target.page_images);

    let summary = SummaryAggregator::new().tally(
        source,
        target,
        &text_diffs,
        &table_diffs,
        &image_diffs,
    );

    log::info!(
        "comparison complete: {} text, {} table, {} image diffs",
        summary.text_diffs,
        summary.table_diffs,
        summary.image_diffs
    );

    ComparisonReport {
        text_diffs,
        table_diffs,
        image_diffs,
        table_multiset,
        summary,
    }
}
