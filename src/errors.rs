//! Error types and the crate-wide [`Result`] alias.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the codec and the staging orchestrator.
///
/// Every error is raised at the point of detection and propagates
/// synchronously to the caller; there is no retry or partial-success path.
#[derive(Debug, Error)]
pub enum WhiteboxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured temp directory is missing or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A header line without a `Key: value` delimiter.
    #[error("malformed header line (no colon): {line:?}")]
    MalformedHeader { line: String },

    /// A numeric header field whose value does not parse as its declared type.
    #[error("field '{field}' has unparseable value {value:?}")]
    FieldParse { field: String, value: String },

    /// One or more required attributes are absent after normalization.
    #[error("missing required attributes: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A data scale outside {continuous, categorical, boolean, rgb}.
    #[error("invalid data scale {0:?}, expected continuous, categorical, boolean or rgb")]
    InvalidDataScale(String),

    /// RGB data scales, non-2-D grids and multi-stack rasters.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A parameter value of a kind the parameter does not accept.
    #[error("usage error: {0}")]
    Usage(String),

    /// A referenced header or body file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Declared rows/cols disagree with the actual grid dimensions.
    #[error("shape mismatch: declared (rows, cols) = {expected:?}, grid is {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A body file whose byte count disagrees with `rows * cols * width`.
    #[error("body length mismatch: expected {expected} bytes, got {actual}")]
    BodyLength { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, WhiteboxError>;
