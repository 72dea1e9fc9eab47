//! Drawing primitives for the SVG surface.
//!
//! Layouts only describe geometry. These types turn that geometry into SVG
//! nodes: strokes and text styles are reusable definitions, and every element
//! is collected into a [`LayeredOutput`] so the z-order is fixed by
//! [`RenderLayer`] rather than by emission order.
mod layer;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// Something that can render itself into layered SVG output.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable anchored at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// The space this drawable occupies.
    fn size(&self) -> Size;
}
