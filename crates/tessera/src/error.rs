//! Error types for Tessera operations.
//!
//! This module provides the main error type [`TesseraError`] which wraps
//! the error conditions that can occur while building and inspecting
//! diagrams.

use std::{io, ops::Range};

use thiserror::Error;

use crate::diagram::DiagramError;

/// The main error type for Tessera operations.
///
/// # Diagnostic Variants
///
/// The `Model` variant carries the source text of a model description and,
/// when known, the byte range the problem was found at. This is enough for
/// rich error reporting with a highlighted snippet.
#[derive(Debug, Error)]
pub enum TesseraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Diagram error: {0}")]
    Diagram(#[from] DiagramError),

    #[error("{message}")]
    Model {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },
}

impl TesseraError {
    /// Create a new `Model` error with the associated source text.
    pub fn new_model_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Model {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
