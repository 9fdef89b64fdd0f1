use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the segmentation engine.
///
/// Anything that would leave the output clip numbering sparse is fatal for
/// the whole run; there is no partial-success mode.
#[derive(Debug, Error)]
pub enum SegmentationError {
    /// The configuration cannot produce a valid analysis run. Raised before
    /// any audio is read.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The audio source could not be opened or decoded.
    #[error("failed to open audio source {path}: {source}")]
    SourceAccess {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// Reading samples from an already-open source failed mid-stream.
    #[error("failed to read samples from {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// Extracting or encoding a single output clip failed. `index` is the
    /// 1-based segment number that could not be written.
    #[error("failed to export segment {index} to {path}: {source}")]
    SegmentExport {
        index: usize,
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// Filesystem error outside of WAV encode/decode (e.g. creating the
    /// output directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
