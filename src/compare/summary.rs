//! Summary aggregation over diff record lists.

use serde::{Deserialize, Serialize};

use crate::model::{Extraction, ImageDiff, ImageDiffKind, TableDiff, TextDiff};

/// De-duplicated counts for reporting: page counts per document and diff
/// record counts per modality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Page count of the source document
    pub pages_source: usize,

    /// Page count of the target document
    pub pages_target: usize,

    /// Number of textual diff records
    pub text_diffs: usize,

    /// Number of tabular diff records
    pub table_diffs: usize,

    /// Number of visually differing pages (inserted, deleted, or with
    /// changed pixels)
    pub image_diffs: usize,

    /// Number of page pairs that received visual metrics
    pub pages_compared: usize,

    /// Pages present only in the target
    pub pages_inserted: usize,

    /// Pages present only in the source
    pub pages_deleted: usize,

    /// Whether the table row multisets (or aligned tables) matched
    pub tables_equal: bool,
}

impl Summary {
    /// Whether any modality reported a difference.
    pub fn has_differences(&self) -> bool {
        self.text_diffs > 0 || self.table_diffs > 0 || self.image_diffs > 0
    }
}

/// Pure tally over already-produced diff record lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryAggregator;

impl SummaryAggregator {
    /// Create a new aggregator.
    pub fn new() -> Self {
        Self
    }

    /// Count records and page totals into a summary.
    pub fn tally(
        &self,
        source: &Extraction,
        target: &Extraction,
        text_diffs: &[TextDiff],
        table_diffs: &[TableDiff],
        image_diffs: &[ImageDiff],
    ) -> Summary {
        let mut pages_compared = 0;
        let mut pages_inserted = 0;
        let mut pages_deleted = 0;
        let mut changed_pages = 0;

        for diff in image_diffs {
            match diff.kind {
                ImageDiffKind::PageCompared => {
                    pages_compared += 1;
                    if diff.changed_pixels.unwrap_or(0) > 0 {
                        changed_pages += 1;
                    }
                }
                ImageDiffKind::PageInserted => pages_inserted += 1,
                ImageDiffKind::PageDeleted => pages_deleted += 1,
            }
        }

        Summary {
            pages_source: source.page_count().max(source.page_images.len()),
            pages_target: target.page_count().max(target.page_images.len()),
            text_diffs: text_diffs.len(),
            table_diffs: table_diffs.len(),
            image_diffs: changed_pages + pages_inserted + pages_deleted,
            pages_compared,
            pages_inserted,
            pages_deleted,
            tables_equal: table_diffs.is_empty(),
        }
    }
}
