//! Error types for Canopy operations.
//!
//! This module provides the main error type [`CanopyError`] which wraps
//! the error conditions of every pipeline stage.

use std::io;

use thiserror::Error;

use canopy_data::DataError;

use crate::layout::LayoutError;

/// The main error type for Canopy operations.
///
/// # Diagnostic Variants
///
/// The `Data` variant keeps the document text next to the structured error,
/// so its labelled spans can be rendered against the source.
#[derive(Debug, Error)]
pub enum CanopyError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Data { err: DataError, src: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for CanopyError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl CanopyError {
    /// Create a new `Data` error with the associated source document.
    pub fn new_data_error(err: DataError, src: impl Into<String>) -> Self {
        Self::Data {
            err,
            src: src.into(),
        }
    }
}
