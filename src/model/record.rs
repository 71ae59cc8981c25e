//! Difference record types.
//!
//! One variant per modality, joined by a common `{page, modality}` header.
//! Records are immutable once constructed; the aggregator and the report
//! layer only read them.

use image::{GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Which comparer produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Page/line text comparison
    Text,
    /// Table row/cell comparison
    Table,
    /// Rendered page appearance comparison
    Image,
}

/// One detected difference between two documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "modality", rename_all = "lowercase")]
pub enum DiffRecord {
    /// Textual difference at page/line granularity
    Text(TextDiff),
    /// Tabular difference (rows or cells)
    Table(TableDiff),
    /// Visual difference between rendered pages
    Image(ImageDiff),
}

impl DiffRecord {
    /// 1-based page number, or `None` for document-level records.
    pub fn page(&self) -> Option<u32> {
        match self {
            DiffRecord::Text(d) => Some(d.page),
            DiffRecord::Table(d) => d.page,
            DiffRecord::Image(d) => Some(d.page),
        }
    }

    /// The modality tag.
    pub fn modality(&self) -> Modality {
        match self {
            DiffRecord::Text(_) => Modality::Text,
            DiffRecord::Table(_) => Modality::Table,
            DiffRecord::Image(_) => Modality::Image,
        }
    }

    /// Short machine-readable kind tag for the record.
    pub fn kind(&self) -> &'static str {
        match self {
            DiffRecord::Text(d) => d.op.as_str(),
            DiffRecord::Table(d) => d.kind.as_str(),
            DiffRecord::Image(d) => d.kind.as_str(),
        }
    }
}

/// A non-equal alignment opcode over two page line lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDiff {
    /// 1-based page number
    pub page: u32,

    /// Operation that turns the source range into the target range
    pub op: TextOp,

    /// Half-open line index range into the source page
    pub src_range: (usize, usize),

    /// Half-open line index range into the target page
    pub trg_range: (usize, usize),

    /// Source lines covered by `src_range`
    pub src_lines: Vec<String>,

    /// Target lines covered by `trg_range`
    pub trg_lines: Vec<String>,
}

/// Non-equal text alignment operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextOp {
    /// Source range replaced by target range
    Replace,
    /// Target range inserted, source range empty
    Insert,
    /// Source range deleted, target range empty
    Delete,
}

impl TextOp {
    /// Tag string as it appears in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextOp::Replace => "replace",
            TextOp::Insert => "insert",
            TextOp::Delete => "delete",
        }
    }
}

/// A tabular difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDiff {
    /// 1-based page number, or `None` when table provenance was discarded
    /// (multiset mode flattens rows across the whole document).
    pub page: Option<u32>,

    /// What changed
    #[serde(flatten)]
    pub kind: TableDiffKind,
}

/// Kinds of tabular difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableDiffKind {
    /// A table exists in the target with no counterpart in the source
    TableAdded,

    /// A table exists in the source with no counterpart in the target
    TableDeleted,

    /// Both sides have the table; one or more cells differ
    TableModified {
        /// Every differing `(row, col)` pair
        cells: Vec<CellDiff>,
    },

    /// A row occurs more often in the source than in the target
    RowMissingInTarget {
        /// The normalized row
        row: Vec<String>,
        /// How many occurrences are unaccounted for
        count: u64,
    },

    /// A row occurs more often in the target than in the source
    RowMissingInSource {
        /// The normalized row
        row: Vec<String>,
        /// How many occurrences are unaccounted for
        count: u64,
    },
}

impl TableDiffKind {
    /// Tag string as it appears in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableDiffKind::TableAdded => "table_added",
            TableDiffKind::TableDeleted => "table_deleted",
            TableDiffKind::TableModified { .. } => "table_modified",
            TableDiffKind::RowMissingInTarget { .. } => "row_missing_in_target",
            TableDiffKind::RowMissingInSource { .. } => "row_missing_in_source",
        }
    }
}

/// One differing cell in an aligned table pair.
///
/// Out-of-range cells on either side are treated as empty strings, so a
/// shape mismatch shows up as diffs against `""` rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDiff {
    /// 0-based row index
    pub row: usize,
    /// 0-based column index
    pub col: usize,
    /// Source cell value
    pub a: String,
    /// Target cell value
    pub b: String,
}

/// A visual difference between two rendered pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDiff {
    /// 1-based page number
    pub page: u32,

    /// What happened to this page
    pub kind: ImageDiffKind,

    /// Hamming distance between the two perceptual hashes.
    /// `None` for inserted/deleted pages.
    pub phash_distance: Option<u32>,

    /// Number of pixels whose intensity difference exceeded the threshold.
    /// `None` for inserted/deleted pages.
    pub changed_pixels: Option<u64>,

    /// Derived images for the page pair, available by value.
    /// Persistence (paths vs inline encoding) is the report layer's job.
    #[serde(skip)]
    pub artifacts: Option<PageArtifacts>,
}

/// Kinds of visual page difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageDiffKind {
    /// Both sides have the page; metrics were computed
    PageCompared,
    /// Page exists only in the target
    PageInserted,
    /// Page exists only in the source
    PageDeleted,
}

impl ImageDiffKind {
    /// Tag string as it appears in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageDiffKind::PageCompared => "page_compared",
            ImageDiffKind::PageInserted => "page_inserted",
            ImageDiffKind::PageDeleted => "page_deleted",
        }
    }
}

/// The four derived images for one compared page pair.
#[derive(Debug, Clone)]
pub struct PageArtifacts {
    /// Copy of the source page image
    pub source: RgbImage,

    /// Copy of the target page image (size-matched to the source)
    pub target: RgbImage,

    /// Per-pixel absolute difference, as grayscale intensity
    pub diff: GrayImage,

    /// Target with changed regions highlighted in semi-transparent red
    pub overlay: RgbaImage,
}
