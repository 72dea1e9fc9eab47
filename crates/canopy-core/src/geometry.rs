//! Basic geometric types used by every layout.
//!
//! All coordinates are in output pixels with the origin at the top-left
//! corner and y growing downwards.

use std::fmt::Write as _;

use serde::Serialize;

/// A position on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Same x, new y.
    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }
}

/// Width and height of a laid-out view or element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// True for the extent of an empty view.
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Axis-aligned box stored as its min and max corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Smallest box covering both `self` and `other`.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Pushes every edge outwards by the matching inset.
    pub fn expand(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left,
            min_y: self.min_y - insets.top,
            max_x: self.max_x + insets.right,
            max_y: self.max_y + insets.bottom,
        }
    }
}

/// Per-side spacing, in CSS order (top, right, bottom, left).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// An open polyline through an ordered list of points.
///
/// Tree edges are described as paths so a rendering surface can stroke them
/// without knowing whether they are elbows or diagonals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Straight segment, used for diagonal edges.
    pub fn line(from: Point, to: Point) -> Self {
        Self::new(vec![from, to])
    }

    /// A right-angled connector: vertical from `from`, then horizontal to `to`.
    pub fn elbow(from: Point, to: Point) -> Self {
        Self::new(vec![from, from.with_y(to.y), to])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Renders the path as SVG path data (`M x y L x y ...`).
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for (i, point) in self.points.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            if i > 0 {
                data.push(' ');
            }
            // Writing to a String cannot fail
            let _ = write!(data, "{command} {} {}", point.x, point.y);
        }
        data
    }
}
