//! Collaborator seams and the artifact-directory provider.
//!
//! Extraction, rasterization, and OCR are external collaborators; this
//! crate only defines the traits it consumes them through. The bundled
//! [`ArtifactProvider`] loads pre-extracted artifacts (JSON + page PNGs)
//! produced by whatever tooling did the heavy lifting.

use std::path::Path;

use image::RgbImage;

use crate::error::{Error, Result};
use crate::model::Extraction;

/// Produces an [`Extraction`] from a document.
///
/// Implementations must guarantee 1-based contiguous page indices and
/// that whitespace normalization has already happened on every string
/// entering the text and table comparers.
pub trait ExtractionProvider {
    /// Extract text, tables, and page images from a document.
    fn extract(&self, document: &Path) -> Result<Extraction>;
}

/// Renders document pages to raster images.
///
/// The pixel scale must be consistent across calls for the same DPI so
/// two documents' pages are directly comparable.
pub trait Rasterizer {
    /// Render every page at the given DPI, in page order.
    fn render(&self, document: &Path, dpi: u32) -> Result<Vec<RgbImage>>;
}

/// Recognizes text in a raster image.
///
/// Consumed by the report layer for human review alongside visual
/// metrics; the comparers never require it.
pub trait OcrEngine: Send + Sync {
    /// Recognize text in an image.
    fn recognize(&self, image: &RgbImage) -> Result<String>;
}

/// Loads an extraction from a directory of pre-extracted artifacts.
///
/// Expected layout:
///
/// ```text
/// dir/
///   extraction.json     (pages_text + tables)
///   pages/p1.png        (rendered pages, 1-based, contiguous)
///   pages/p2.png
///   ...
/// ```
///
/// The `pages/` directory is optional; without it the visual comparer
/// simply has nothing to do.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactProvider;

impl ArtifactProvider {
    /// Create a new artifact provider.
    pub fn new() -> Self {
        Self
    }

    /// Load an extraction bundle from `dir`.
    pub fn load_dir(&self, dir: &Path) -> Result<Extraction> {
        let json_path = dir.join("extraction.json");
        let json = std::fs::read_to_string(&json_path).map_err(|e| {
            Error::InvalidExtraction(format!("{}: {}", json_path.display(), e))
        })?;
        let mut extraction: Extraction = serde_json::from_str(&json)?;

        let pages_dir = dir.join("pages");
        if pages_dir.is_dir() {
            extraction.page_images = self.load_pages(&pages_dir)?;
        }

        log::debug!(
            "loaded extraction from {}: {} pages, {} tables, {} images",
            dir.display(),
            extraction.page_count(),
            extraction.tables.len(),
            extraction.page_images.len()
        );
        Ok(extraction)
    }

    fn load_pages(&self, pages_dir: &Path) -> Result<Vec<RgbImage>> {
        let mut images = Vec::new();
        for n in 1u32.. {
            let path = pages_dir.join(format!("p{}.png", n));
            if !path.exists() {
                break;
            }
            images.push(image::open(&path)?.to_rgb8());
        }
        Ok(images)
    }
}

impl ExtractionProvider for ArtifactProvider {
    fn extract(&self, document: &Path) -> Result<Extraction> {
        self.load_dir(document)
    }
}
