//! Table row and cell comparison.
//!
//! Two modes: an order-insensitive multiset comparison over all rows
//! (robust to re-sorted tables and pagination differences), and a
//! position-aligned comparison pairing the i-th table on each side
//! (for documents known to be paginated identically).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::compare::normalize::Normalizer;
use crate::model::{CellDiff, Extraction, TableDiff, TableDiffKind};

/// Compares table content between two documents.
///
/// Owns its normalizer; every cell passes through it before any equality
/// check, so ragged or noisy extractions never produce spurious diffs.
#[derive(Debug, Clone, Default)]
pub struct TableComparer {
    normalizer: Normalizer,
}

impl TableComparer {
    /// Create a new table comparer with a fresh normalizer.
    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::new(),
        }
    }

    /// Order-insensitive comparison of the row multisets.
    ///
    /// Rows are flattened across all tables (table and page provenance is
    /// discarded), normalized, and counted per distinct row tuple. The
    /// result reports exactly how many occurrences of each row are
    /// unaccounted for on each side; both lists empty means the multisets
    /// are identical, independent of row order.
    pub fn compare_multiset(&self, source: &Extraction, target: &Extraction) -> TableComparison {
        let src_counts = self.count_rows(source);
        let trg_counts = self.count_rows(target);

        let mut missing_in_target = Vec::new();
        for (row, &src_count) in &src_counts {
            let trg_count = trg_counts.get(row).copied().unwrap_or(0);
            if src_count > trg_count {
                missing_in_target.push(RowCount {
                    row: row.clone(),
                    count: src_count - trg_count,
                });
            }
        }

        let mut missing_in_source = Vec::new();
        for (row, &trg_count) in &trg_counts {
            let src_count = src_counts.get(row).copied().unwrap_or(0);
            if trg_count > src_count {
                missing_in_source.push(RowCount {
                    row: row.clone(),
                    count: trg_count - src_count,
                });
            }
        }

        // Hash map order is arbitrary; sort for reproducible records
        missing_in_target.sort_by(|a, b| a.row.cmp(&b.row));
        missing_in_source.sort_by(|a, b| a.row.cmp(&b.row));

        log::debug!(
            "table multiset comparison: {} distinct rows vs {}, {} missing in target, {} missing in source",
            src_counts.len(),
            trg_counts.len(),
            missing_in_target.len(),
            missing_in_source.len()
        );

        TableComparison {
            equal: missing_in_target.is_empty() && missing_in_source.is_empty(),
            missing_in_target,
            missing_in_source,
        }
    }

    /// Position-sensitive comparison pairing tables by sequential index.
    ///
    /// A missing counterpart yields a `table_added`/`table_deleted`
    /// record. For a pair present on both sides, cells are compared over
    /// the union of row/column extents, treating any out-of-range cell as
    /// an empty string; all differing cells for a pair are collected into
    /// a single `table_modified` record.
    pub fn compare_aligned(&self, source: &Extraction, target: &Extraction) -> Vec<TableDiff> {
        let max_tables = source.tables.len().max(target.tables.len());
        let mut diffs = Vec::new();

        for idx in 0..max_tables {
            let src = source.tables.get(idx);
            let trg = target.tables.get(idx);

            match (src, trg) {
                (None, Some(t)) => diffs.push(TableDiff {
                    page: Some(t.page),
                    kind: TableDiffKind::TableAdded,
                }),
                (Some(s), None) => diffs.push(TableDiff {
                    page: Some(s.page),
                    kind: TableDiffKind::TableDeleted,
                }),
                (Some(s), Some(t)) => {
                    let cells = self.diff_cells(&s.rows, &t.rows);
                    if !cells.is_empty() {
                        diffs.push(TableDiff {
                            page: Some(s.page),
                            kind: TableDiffKind::TableModified { cells },
                        });
                    }
                }
                (None, None) => unreachable!(),
            }
        }

        diffs
    }

    /// Frequency count per distinct normalized row, with fully empty rows
    /// dropped.
    fn count_rows(&self, extraction: &Extraction) -> HashMap<Vec<String>, u64> {
        let mut counts: HashMap<Vec<String>, u64> = HashMap::new();
        for row in extraction.all_rows() {
            let normalized = self.normalizer.row(row);
            if normalized.iter().all(|c| c.is_empty()) {
                continue;
            }
            *counts.entry(normalized).or_insert(0) += 1;
        }
        counts
    }

    fn diff_cells(&self, src_rows: &[Vec<String>], trg_rows: &[Vec<String>]) -> Vec<CellDiff> {
        let rows = src_rows.len().max(trg_rows.len());
        let cols = src_rows
            .iter()
            .chain(trg_rows.iter())
            .map(|r| r.len())
            .max()
            .unwrap_or(0);

        let mut cells = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let a = self.cell_at(src_rows, r, c);
                let b = self.cell_at(trg_rows, r, c);
                if a != b {
                    cells.push(CellDiff { row: r, col: c, a, b });
                }
            }
        }
        cells
    }

    /// Normalized cell value, or `""` past either extent.
    fn cell_at(&self, rows: &[Vec<String>], r: usize, c: usize) -> String {
        rows.get(r)
            .and_then(|row| row.get(c))
            .map(|cell| self.normalizer.cell(cell))
            .unwrap_or_default()
    }
}

/// Result of a multiset table comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableComparison {
    /// True iff the two row multisets are identical
    pub equal: bool,

    /// Rows occurring more often in the source than in the target
    pub missing_in_target: Vec<RowCount>,

    /// Rows occurring more often in the target than in the source
    pub missing_in_source: Vec<RowCount>,
}

impl TableComparison {
    /// Convert to document-level diff records (one per missing row kind).
    pub fn to_records(&self) -> Vec<TableDiff> {
        let mut records = Vec::new();
        for rc in &self.missing_in_target {
            records.push(TableDiff {
                page: None,
                kind: TableDiffKind::RowMissingInTarget {
                    row: rc.row.clone(),
                    count: rc.count,
                },
            });
        }
        for rc in &self.missing_in_source {
            records.push(TableDiff {
                page: None,
                kind: TableDiffKind::RowMissingInSource {
                    row: rc.row.clone(),
                    count: rc.count,
                },
            });
        }
        records
    }
}

/// A row and the number of unmatched occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCount {
    /// The normalized row tuple
    pub row: Vec<String>,
    /// Unmatched occurrence count (always >= 1)
    pub count: u64,
}
