//! Data model for document comparison.
//!
//! This module defines the input bundle ([`Extraction`]) produced by the
//! external extraction layer and the output records ([`DiffRecord`])
//! produced by the comparers. Both are plain immutable values; the
//! comparers are pure functions from two extractions to record lists.

mod extraction;
mod record;

pub use extraction::{ExtractedTable, Extraction};
pub use record::{
    CellDiff, DiffRecord, ImageDiff, ImageDiffKind, Modality, PageArtifacts, TableDiff,
    TableDiffKind, TextDiff, TextOp,
};
