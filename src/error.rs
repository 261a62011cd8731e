// src/error.rs
//! Unified error types for the generation pipeline.

use crate::backend::BackendError;
use thiserror::Error;

/// The error type for every stage of document generation.
///
/// Generation is fail-fast and non-partial: the first error at any stage
/// aborts the whole run and no bytes are returned. Layout and render
/// variants carry the id of the element being processed so failures can be
/// traced without structured tracing.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("layout failed for element '{element}': {message}")]
    LayoutFailed { element: String, message: String },

    #[error("no renderer registered for kind '{kind}' (element '{element}')")]
    UnsupportedElementType { element: String, kind: String },

    #[error("render failed for element '{element}': {message}")]
    RenderFailed { element: String, message: String },

    #[error("drawing backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("generation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerationError {
    pub(crate) fn render(element: &str, message: impl Into<String>) -> Self {
        GenerationError::RenderFailed {
            element: element.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn layout(element: &str, message: impl Into<String>) -> Self {
        GenerationError::LayoutFailed {
            element: element.to_string(),
            message: message.into(),
        }
    }
}
