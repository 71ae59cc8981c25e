//! Comparison options and configuration.

/// Options for a comparison run.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Intensity threshold (0-255) above which a pixel counts as changed
    pub pixel_threshold: u8,

    /// How tables are compared
    pub table_mode: TableMode,

    /// Whether to compare page images in parallel
    pub parallel: bool,

    /// Whether to keep the derived page images on each visual record.
    /// Disable to save memory when only the scalar metrics matter.
    pub keep_artifacts: bool,
}

impl CompareOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pixel intensity threshold.
    pub fn with_pixel_threshold(mut self, threshold: u8) -> Self {
        self.pixel_threshold = threshold;
        self
    }

    /// Set the table comparison mode.
    pub fn with_table_mode(mut self, mode: TableMode) -> Self {
        self.table_mode = mode;
        self
    }

    /// Use position-aligned table comparison.
    pub fn aligned_tables(mut self) -> Self {
        self.table_mode = TableMode::Aligned;
        self
    }

    /// Enable or disable parallel page comparison.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel page comparison.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable keeping derived images on visual records.
    pub fn with_artifacts(mut self, keep: bool) -> Self {
        self.keep_artifacts = keep;
        self
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            pixel_threshold: 30,
            table_mode: TableMode::Multiset,
            parallel: true,
            keep_artifacts: true,
        }
    }
}

/// How table rows are matched between the two documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableMode {
    /// Order-insensitive multiset comparison over all rows.
    /// Robust to re-sorted tables and pagination differences.
    #[default]
    Multiset,

    /// Position-sensitive comparison pairing the i-th table on each side.
    /// Use when documents are known to be paginated identically.
    Aligned,
}
