//! Rendering errors

use std::{fmt, io};
use thiserror::Error;

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a value
#[derive(Debug, Error)]
pub enum RenderError {
    /// The text sink refused a write
    #[error("Failed to write to output sink")]
    Sink(#[from] fmt::Error),

    /// The underlying writer of an I/O sink failed
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    /// A renderer was applied to a value of the wrong structural kind
    #[error("{renderer} renderer cannot render a value of kind {found}")]
    ShapeMismatch {
        renderer: &'static str,
        found: &'static str,
    },

    /// The date pattern setting could not be parsed
    #[error("Invalid date pattern '{pattern}': {message}")]
    InvalidDatePattern { pattern: String, message: String },
}

impl RenderError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(renderer: &'static str, found: &'static str) -> Self {
        Self::ShapeMismatch { renderer, found }
    }

    /// Create an invalid date pattern error
    pub fn invalid_date_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDatePattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Check if this error signals a caller bug rather than a runtime failure
    ///
    /// Shape mismatches only happen when a renderer is picked by hand for a
    /// value it was not resolved for.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }
}
