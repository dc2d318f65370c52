//! Error types for stack layout.

use crate::types::ContentId;
use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StackError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Misconfigured items or misuse of the item collection.
///
/// These are programmer errors: the offending call is rejected and nothing
/// is mutated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Content {content} is already in the stack")]
    DuplicateContent { content: ContentId },

    #[error("percent_size {value} is greater than 1")]
    PercentOutOfRange { value: f64 },

    #[error("weight {value} is negative")]
    NegativeWeight { value: f64 },

    #[error("{edge} margin {value} is negative")]
    NegativeMargin { edge: &'static str, value: f64 },

    #[error("Cross-axis percent {value} is outside [0, 1]")]
    CrossPercentOutOfRange { value: f64 },

    #[error("Cross-axis fit extent {value} is negative")]
    NegativeExtent { value: f64 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("Index {index} out of bounds for {len} items")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Errors during layout computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Layout cycle detected: a stack contains itself")]
    CycleDetected,

    #[error("Content {content} appears more than once in the item list")]
    DuplicateContent { content: ContentId },

    #[error("Invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("Measuring content {content} failed: {reason}")]
    Measurement { content: ContentId, reason: String },
}
