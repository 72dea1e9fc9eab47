//! Export functionality for Canopy layouts.
//!
//! This module provides the [`Exporter`] trait that turns finished layouts
//! into an output document. It sits outside the layout engines, which only
//! produce geometry.
//!
//! # Pipeline Position
//!
//! ```text
//! Document text
//!     ↓ parse (canopy-data)
//! Tree / GeneModel / Sequences
//!     ↓ layout
//! TreeLayout / IntervalLayout / AlignmentGrid
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]

/// SVG export backend.
pub mod svg;

use crate::layout::{alignment::AlignmentGrid, interval::IntervalLayout, tree::TreeLayout};

/// Abstraction for layout export backends.
pub trait Exporter {
    /// Exports a positioned tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format.
    fn export_tree_layout(&self, layout: &TreeLayout) -> Result<String, Error>;

    /// Exports a gene model viewport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format.
    fn export_interval_layout(&self, layout: &IntervalLayout) -> Result<String, Error>;

    /// Exports an alignment grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format.
    fn export_alignment_grid(&self, grid: &AlignmentGrid) -> Result<String, Error>;
}

/// Errors that can occur during export.
///
/// This type is converted into [`CanopyError::Export`] at the crate
/// boundary via the [`From`] implementation in `error.rs`.
///
/// [`CanopyError::Export`]: crate::CanopyError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
