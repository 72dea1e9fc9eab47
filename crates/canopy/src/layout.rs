//! Layout engines.
//!
//! Each engine is a pure function of its input model and options: calling it
//! twice with the same input yields identical geometry, and no engine keeps
//! state between calls.
//!
//! - [`tree`] - node positions and edge paths for a rooted tree
//! - [`interval`] - pan/zoom window over the intervals of a gene model
//! - [`alignment`] - residue grid for a multiple sequence alignment
//! - [`palette`] - residue colour schemes used by the grid

pub mod alignment;
pub mod interval;
pub mod palette;
pub mod tree;

use thiserror::Error;

use canopy_core::ModelError;

/// Errors reported by the layout engines.
///
/// Options that cannot describe a drawable canvas are rejected instead of
/// being corrected. Display parameters such as support values are clamped
/// by the engines and never show up here.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("invalid {option} `{value}`: expected a finite, non-negative number")]
    InvalidDimension { option: &'static str, value: f64 },

    #[error("invalid font size `{value}`: expected a finite, positive number")]
    InvalidFontSize { value: f64 },

    #[error("cumulative branch length from the root to node {node} is not finite")]
    BranchLengthOverflow { node: usize },

    #[error("invalid support range [{min}, {max}]: the minimum must be below the maximum")]
    InvalidSupportRange { min: f64, max: f64 },

    #[error("invalid pan window [{min}, {max}]: expected 0 <= min < max <= 100")]
    InvalidPanWindow { min: f64, max: f64 },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Checks that a dimension option is finite and not negative.
pub(crate) fn check_dimension(option: &'static str, value: f32) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidDimension {
            option,
            value: f64::from(value),
        })
    }
}

/// Checks that a font size is finite and positive; leaf rows are spaced by it.
pub(crate) fn check_font_size(value: f32) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidFontSize {
            value: f64::from(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimension() {
        assert!(check_dimension("width", 0.0).is_ok());
        assert!(check_dimension("width", 940.0).is_ok());
        assert_eq!(
            check_dimension("height", -1.0),
            Err(LayoutError::InvalidDimension {
                option: "height",
                value: -1.0
            })
        );
        assert!(check_dimension("font size", f32::NAN).is_err());
        assert!(check_dimension("font size", f32::INFINITY).is_err());
    }

    #[test]
    fn test_check_font_size() {
        assert!(check_font_size(11.0).is_ok());
        assert_eq!(
            check_font_size(0.0),
            Err(LayoutError::InvalidFontSize { value: 0.0 })
        );
        assert!(check_font_size(-2.0).is_err());
        assert!(check_font_size(f32::NAN).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = LayoutError::InvalidPanWindow {
            min: 60.0,
            max: 40.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid pan window [60, 40]: expected 0 <= min < max <= 100"
        );
    }
}
