//! Error types for docdiff library.

use std::io;
use thiserror::Error;

/// Result type alias for docdiff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading extractions or writing reports.
///
/// The comparers themselves are pure and infallible; errors only arise at
/// the I/O edges of the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding or encoding a raster image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Extraction artifact is missing or structurally invalid.
    #[error("Invalid extraction: {0}")]
    InvalidExtraction(String),

    /// Error serializing or deserializing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error producing report output.
    #[error("Report rendering error: {0}")]
    Render(String),

    /// OCR collaborator failure.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
