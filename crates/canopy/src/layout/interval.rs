//! Gene model viewport.
//!
//! A [`PanWindow`] selects a percentage slice of the gene model's coordinate
//! domain. [`IntervalViewport`] maps that slice linearly onto `width` pixels
//! and clips every interval to it: narrowing the window zooms in, moving it
//! pans.
//!
//! The window is validated, never repaired. Keeping it inside `[0, 100]` is
//! the job of whoever moves it (see [`crate::state::ViewState`]).

use log::debug;
use serde::Serialize;

use canopy_core::gene_model::{GeneModel, IntervalKind};

use super::{LayoutError, check_dimension};

/// Visible slice of a coordinate domain, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanWindow {
    min: f64,
    max: f64,
}

impl PanWindow {
    /// The whole domain.
    pub const FULL: PanWindow = PanWindow {
        min: 0.0,
        max: 100.0,
    };

    /// Creates a window, requiring `0 <= min < max <= 100`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidPanWindow`] for inverted, empty,
    /// out-of-range or non-finite bounds.
    pub fn new(min: f64, max: f64) -> Result<Self, LayoutError> {
        if min.is_finite() && max.is_finite() && 0.0 <= min && min < max && max <= 100.0 {
            Ok(Self { min, max })
        } else {
            Err(LayoutError::InvalidPanWindow { min, max })
        }
    }

    /// Builds a window whose bounds the caller has already kept in range.
    pub(crate) fn new_unchecked(min: f64, max: f64) -> Self {
        debug_assert!(0.0 <= min && min < max && max <= 100.0);
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the window in percent points.
    pub fn len(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

impl Default for PanWindow {
    fn default() -> Self {
        Self::FULL
    }
}

/// The genomic coordinates currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibleSpan {
    start: f64,
    end: f64,
}

impl VisibleSpan {
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

/// An interval clipped to the window and mapped to pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedInterval {
    kind: IntervalKind,
    x_start: f32,
    x_end: f32,
    start: f64,
    end: f64,
}

impl PlacedInterval {
    pub fn kind(&self) -> &IntervalKind {
        &self.kind
    }

    pub fn x_start(&self) -> f32 {
        self.x_start
    }

    pub fn x_end(&self) -> f32 {
        self.x_end
    }

    /// Genomic start after clipping.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Genomic end after clipping.
    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn pixel_width(&self) -> f32 {
        self.x_end - self.x_start
    }
}

/// Geometry produced by [`IntervalViewport::calculate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalLayout {
    intervals: Vec<PlacedInterval>,
    visible: VisibleSpan,
    domain_span: i64,
    width: f32,
}

impl IntervalLayout {
    /// Visible intervals, in gene model order.
    pub fn intervals(&self) -> &[PlacedInterval] {
        &self.intervals
    }

    pub fn visible(&self) -> VisibleSpan {
        self.visible
    }

    /// Length of the full coordinate domain.
    pub fn domain_span(&self) -> i64 {
        self.domain_span
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Maps a window of a [`GeneModel`] onto a horizontal pixel range.
#[derive(Debug, Clone, Copy)]
pub struct IntervalViewport {
    width: f32,
}

impl IntervalViewport {
    pub fn new(width: f32) -> Self {
        Self { width }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Places the intervals visible through `window`.
    ///
    /// Intervals entirely outside the window, or touching it only at an
    /// edge, are dropped. Intervals crossing an edge are truncated there.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] for a negative or non-finite
    /// width.
    pub fn calculate(
        &self,
        model: &GeneModel,
        window: PanWindow,
    ) -> Result<IntervalLayout, LayoutError> {
        check_dimension("width", self.width)?;

        let domain_start = model.min() as f64;
        let domain_length = model.span() as f64;
        let visible_start = domain_start + window.min / 100.0 * domain_length;
        let visible_end = domain_start + window.max / 100.0 * domain_length;
        let scale = f64::from(self.width) / (visible_end - visible_start);
        let to_pixels = |coordinate: f64| ((coordinate - visible_start) * scale) as f32;

        let intervals: Vec<PlacedInterval> = model
            .intervals()
            .iter()
            .filter_map(|interval| {
                let start = interval.start() as f64;
                let end = interval.end() as f64;
                if end <= visible_start || start >= visible_end {
                    return None;
                }
                let start = start.max(visible_start);
                let end = end.min(visible_end);
                Some(PlacedInterval {
                    kind: interval.kind().clone(),
                    x_start: to_pixels(start),
                    x_end: to_pixels(end),
                    start,
                    end,
                })
            })
            .collect();

        debug!(
            visible_start,
            visible_end,
            visible = intervals.len(),
            total = model.intervals().len();
            "Gene model viewport calculated"
        );

        Ok(IntervalLayout {
            intervals,
            visible: VisibleSpan {
                start: visible_start,
                end: visible_end,
            },
            domain_span: model.span(),
            width: self.width,
        })
    }
}
