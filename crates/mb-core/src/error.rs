//! Error taxonomy for the moodboard engine.
//!
//! `NotFound` and `NotText` are programmer-error class: a correct UI only
//! references ids taken from current store state. The remaining variants are
//! boundary failures that callers recover from locally.

use crate::id::ItemId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The operation referenced a stale or absent item id.
    #[error("item {0} not found")]
    NotFound(ItemId),

    /// A text-only operation was applied to an image item.
    #[error("item {0} is not a text item")]
    NotText(ItemId),

    /// Pixel sampling was blocked (typically a cross-origin image).
    #[error("color extraction unavailable: {0}")]
    ExtractionUnavailable(String),

    /// The rasterizer threw or produced unusable output.
    #[error("export failed: {0}")]
    ExportFailed(String),

    /// An export is already pending on the same region.
    #[error("an export is already in progress")]
    ExportInProgress,

    /// A search request was rejected or timed out.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// Board configuration could not be decoded or is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SceneResult<T> = Result<T, SceneError>;
