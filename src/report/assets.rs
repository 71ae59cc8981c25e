//! Visual artifact persistence.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::PageArtifacts;

/// Writes per-page derived images into an assets directory.
///
/// File names are page-number-qualified so parallel page processing can
/// never produce a collision.
#[derive(Debug, Clone)]
pub struct AssetWriter {
    dir: PathBuf,
}

impl AssetWriter {
    /// Create a writer for the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Ensure the directory exists.
    pub fn create(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Persist the four images for one page pair as PNG, returning the
    /// file names for the report to reference.
    pub fn write_page(&self, page: u32, artifacts: &PageArtifacts) -> Result<PageAssets> {
        let assets = PageAssets::for_page(page);
        artifacts.source.save(self.dir.join(&assets.source))?;
        artifacts.target.save(self.dir.join(&assets.target))?;
        artifacts.diff.save(self.dir.join(&assets.diff))?;
        artifacts.overlay.save(self.dir.join(&assets.overlay))?;
        log::debug!("wrote visual assets for page {}", page);
        Ok(assets)
    }
}

/// Asset file names for one compared page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAssets {
    /// Source page copy
    pub source: String,
    /// Target page copy
    pub target: String,
    /// Binary change mask
    pub diff: String,
    /// Highlighted overlay
    pub overlay: String,
}

impl PageAssets {
    /// Canonical names for a 1-based page number.
    pub fn for_page(page: u32) -> Self {
        Self {
            source: format!("p{}_src.png", page),
            target: format!("p{}_trg.png", page),
            diff: format!("p{}_diff.png", page),
            overlay: format!("p{}_overlay.png", page),
        }
    }
}
