//! Error types for provtree operations.
//!
//! This module provides the main error type [`ProvtreeError`] which wraps
//! the error conditions of document loading, view building and export.

use std::io;

use thiserror::Error;

use crate::document::DocumentError;

/// The main error type for provtree operations.
///
/// # Diagnostic Variants
///
/// The `Document` variant keeps the document source next to the error so
/// front ends can point at the offending span.
#[derive(Debug, Error)]
pub enum ProvtreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Document { err: DocumentError, src: String },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for ProvtreeError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ProvtreeError {
    /// Create a new `Document` error with the associated source text.
    pub fn new_document_error(err: DocumentError, src: impl Into<String>) -> Self {
        Self::Document {
            err,
            src: src.into(),
        }
    }
}
