//! Report generation: JSON, HTML, and persisted visual assets.
//!
//! The comparers produce records; this layer decides how they reach
//! humans. Asset persistence and serialization format live here, not in
//! the comparison engine.

mod assets;
mod html;
mod json;

pub use assets::{AssetWriter, PageAssets};
pub use html::to_html;
pub use json::{to_json, JsonFormat};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compare::{ComparisonReport, Summary, TableComparison};
use crate::error::Result;
use crate::model::{ImageDiffKind, TableDiff, TextDiff};
use crate::provider::OcrEngine;

/// Options for writing a report to disk.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Write `report.json`
    pub json: bool,

    /// Write `report.html`
    pub html: bool,

    /// JSON formatting
    pub json_format: JsonFormat,

    /// Persist per-page visual assets under `assets/`
    pub write_assets: bool,
}

impl ReportOptions {
    /// Create new report options with defaults (everything on).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the JSON report.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Enable or disable the HTML report.
    pub fn with_html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    /// Set the JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Enable or disable asset persistence.
    pub fn with_assets(mut self, write: bool) -> Self {
        self.write_assets = write;
        self
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            json: true,
            html: true,
            json_format: JsonFormat::Pretty,
            write_assets: true,
        }
    }
}

/// Serializable view of a comparison, with asset references and OCR text
/// resolved for the image pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportView {
    /// Aggregated counts
    pub summary: Summary,
    /// Textual records
    pub text_diffs: Vec<TextDiff>,
    /// Tabular records
    pub table_diffs: Vec<TableDiff>,
    /// Multiset detail when tables were compared order-insensitively
    pub table_multiset: Option<TableComparison>,
    /// One entry per visual page record
    pub image_pages: Vec<ImagePageView>,
}

/// One visual page record with resolved asset names and OCR text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePageView {
    /// 1-based page number
    pub page: u32,
    /// What happened to the page
    pub kind: ImageDiffKind,
    /// Perceptual hash distance, when compared
    pub phash_distance: Option<u32>,
    /// Changed pixel count, when compared
    pub changed_pixels: Option<u64>,
    /// Persisted asset file names, when written
    pub assets: Option<PageAssets>,
    /// OCR text of the source page, when an engine was supplied
    pub ocr_source: Option<String>,
    /// OCR text of the target page, when an engine was supplied
    pub ocr_target: Option<String>,
}

/// Paths of the files a report run produced.
#[derive(Debug, Clone, Default)]
pub struct ReportPaths {
    /// `report.json`, if written
    pub json: Option<PathBuf>,
    /// `report.html`, if written
    pub html: Option<PathBuf>,
    /// `assets/`, if any assets were written
    pub assets_dir: Option<PathBuf>,
}

/// Write a comparison report into `out_dir`.
///
/// Persists visual assets (when enabled and present on the records),
/// optionally runs OCR on each compared page pair for human review, and
/// writes the JSON/HTML outputs. An OCR failure degrades to a warning;
/// it never aborts the report.
pub fn write_report(
    report: &ComparisonReport,
    out_dir: &Path,
    options: &ReportOptions,
    ocr: Option<&dyn OcrEngine>,
) -> Result<ReportPaths> {
    std::fs::create_dir_all(out_dir)?;

    let assets_dir = out_dir.join("assets");
    let writer = if options.write_assets {
        let w = AssetWriter::new(&assets_dir);
        w.create()?;
        Some(w)
    } else {
        None
    };

    let mut image_pages = Vec::with_capacity(report.image_diffs.len());
    let mut wrote_assets = false;
    for diff in &report.image_diffs {
        let mut view = ImagePageView {
            page: diff.page,
            kind: diff.kind,
            phash_distance: diff.phash_distance,
            changed_pixels: diff.changed_pixels,
            assets: None,
            ocr_source: None,
            ocr_target: None,
        };

        if let Some(artifacts) = &diff.artifacts {
            if let Some(w) = &writer {
                view.assets = Some(w.write_page(diff.page, artifacts)?);
                wrote_assets = true;
            }
            if let Some(engine) = ocr {
                view.ocr_source = run_ocr(engine, &artifacts.source, diff.page, "source");
                view.ocr_target = run_ocr(engine, &artifacts.target, diff.page, "target");
            }
        }
        image_pages.push(view);
    }

    let view = ReportView {
        summary: report.summary.clone(),
        text_diffs: report.text_diffs.clone(),
        table_diffs: report.table_diffs.clone(),
        table_multiset: report.table_multiset.clone(),
        image_pages,
    };

    let mut paths = ReportPaths {
        assets_dir: wrote_assets.then_some(assets_dir),
        ..Default::default()
    };

    if options.json {
        let path = out_dir.join("report.json");
        std::fs::write(&path, to_json(&view, options.json_format)?)?;
        paths.json = Some(path);
    }
    if options.html {
        let path = out_dir.join("report.html");
        std::fs::write(&path, to_html(&view))?;
        paths.html = Some(path);
    }

    log::info!("report written to {}", out_dir.display());
    Ok(paths)
}

fn run_ocr(
    engine: &dyn OcrEngine,
    image: &image::RgbImage,
    page: u32,
    side: &str,
) -> Option<String> {
    match engine.recognize(image) {
        Ok(text) => Some(text),
        Err(e) => {
            log::warn!("OCR failed for page {} ({}): {}", page, side, e);
            None
        }
    }
}
