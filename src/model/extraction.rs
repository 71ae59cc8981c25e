//! Extraction bundle types.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Per-document bundle produced by the external extraction layer.
///
/// Holds everything the comparers need: text lines per page, table rows,
/// and rendered page images. An extraction is built once per comparison
/// run and never mutated afterwards; comparers only borrow it.
///
/// Page indices are 1-based in the outside world; the vectors here are
/// positional, so `pages_text[0]` is page 1. The textual parts serialize
/// to JSON; page images travel separately as PNG files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    /// Text lines per page, in reading order. Lines are already
    /// whitespace-normalized by the extraction layer.
    pub pages_text: Vec<Vec<String>>,

    /// Tables in document order, each tagged with its source page.
    pub tables: Vec<ExtractedTable>,

    /// Rendered page images, one per page, at a consistent DPI.
    #[serde(skip)]
    pub page_images: Vec<RgbImage>,
}

impl Extraction {
    /// Create a new empty extraction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of text pages.
    pub fn page_count(&self) -> usize {
        self.pages_text.len()
    }

    /// Lines for a 0-based page index, or an empty slice past the end.
    ///
    /// The empty-slice fallback is what lets a shorter document degrade
    /// into per-line insert/delete diffs instead of a special case.
    pub fn lines_for_page(&self, index: usize) -> &[String] {
        self.pages_text
            .get(index)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Rendered image for a 0-based page index, if present.
    pub fn image_for_page(&self, index: usize) -> Option<&RgbImage> {
        self.page_images.get(index)
    }

    /// Iterate over every table row across all tables, in document order.
    pub fn all_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.tables.iter().flat_map(|t| t.rows.iter())
    }

    /// Total number of text lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages_text.iter().map(|p| p.len()).sum()
    }

    /// Total number of table rows across all tables.
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }

    /// Whether any text was extracted.
    pub fn has_text(&self) -> bool {
        self.pages_text.iter().any(|p| !p.is_empty())
    }

    /// Whether any tables were extracted.
    pub fn has_tables(&self) -> bool {
        self.tables.iter().any(|t| !t.rows.is_empty())
    }

    /// Whether any page images are present.
    pub fn has_images(&self) -> bool {
        !self.page_images.is_empty()
    }

    /// Whether the extraction carries no content at all.
    ///
    /// Callers that need to tell "no differences" apart from "nothing was
    /// compared" should check this before running a comparison.
    pub fn is_empty(&self) -> bool {
        !self.has_text() && !self.has_tables() && !self.has_images()
    }
}

/// One extracted table: its source page and raw rows.
///
/// Rows may be ragged (merged or missing cells); the comparers tolerate
/// that by padding with empty strings, never by failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedTable {
    /// 1-based page number the table was found on.
    pub page: u32,

    /// Rows of raw cell strings, top to bottom.
    pub rows: Vec<Vec<String>>,
}

impl ExtractedTable {
    /// Create a table from rows.
    pub fn new(page: u32, rows: Vec<Vec<String>>) -> Self {
        Self { page, rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row in the table.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }
}
