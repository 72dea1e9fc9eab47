//! Stroke and line-style definitions.
//!
//! [`StrokeDefinition`] bundles color, width, dash pattern, cap and join, and
//! the [`apply_stroke!`](crate::apply_stroke!) macro writes all of them onto
//! an SVG element at once.
//!
//! ```
//! use canopy_core::draw::{StrokeCap, StrokeDefinition};
//! use canopy_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let mut stroke = StrokeDefinition::solid(Color::new("#333333").unwrap(), 1.5);
//! stroke.set_cap(StrokeCap::Round);
//!
//! let branch = svg_element::Path::new().set("d", "M 0 0 L 10 0");
//! let branch = canopy_core::apply_stroke!(branch, &stroke);
//! ```
//!
//! | Property | SVG attribute |
//! |----------|---------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width` |
//! | `style` | `stroke-dasharray` |
//! | `cap` | `stroke-linecap` |
//! | `join` | `stroke-linejoin` |

use std::{convert::Infallible, str::FromStr};

use crate::color::Color;

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// 5px dash, 5px gap
    Dashed,
    /// 2px dot, 3px gap
    Dotted,
    /// Raw SVG dasharray, e.g. `"10,5,2,5"`
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = Infallible;

    /// Unknown names are taken as a raw dasharray.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Ok(Self::Custom(s.to_string())),
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value, or `None` for solid lines.
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// How line endpoints are rendered (`stroke-linecap`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for StrokeCap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            _ => Err(format!(
                "invalid stroke cap `{s}`, valid values: butt, round, square"
            )),
        }
    }
}

/// How line corners are rendered (`stroke-linejoin`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// A complete stroke: color, width, dash pattern, cap and join.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a solid stroke with butt caps and miter joins.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    /// Returns a copy of this stroke drawn in `color`.
    pub fn with_color(&self, color: Color) -> Self {
        let mut stroke = self.clone();
        stroke.set_color(color);
        stroke
    }
}

impl Default for StrokeDefinition {
    /// Black, 1px, solid.
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }
}

/// Applies every attribute of a [`StrokeDefinition`] to an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "#000000");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Miter);
    }

    #[test]
    fn test_with_color_keeps_other_properties() {
        let mut base = StrokeDefinition::new(Color::new("blue").unwrap(), 3.0);
        base.set_cap(StrokeCap::Round);
        let shaded = base.with_color(Color::new("red").unwrap());
        assert_eq!(shaded.color().to_hex(), "#ff0000");
        assert_eq!(shaded.width(), 3.0);
        assert_eq!(shaded.cap(), StrokeCap::Round);
    }

    #[test]
    fn test_stroke_style_parse_and_dasharray() {
        assert_eq!("dashed".parse::<StrokeStyle>().unwrap(), StrokeStyle::Dashed);
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dotted.to_svg_value(), Some("2,3".to_string()));
        assert_eq!(
            "4,1".parse::<StrokeStyle>().unwrap().to_svg_value(),
            Some("4,1".to_string())
        );
    }

    #[test]
    fn test_cap_from_str() {
        assert_eq!("round".parse::<StrokeCap>().unwrap(), StrokeCap::Round);
        assert!(
            "pointy"
                .parse::<StrokeCap>()
                .unwrap_err()
                .contains("invalid stroke cap")
        );
    }

    #[test]
    fn test_apply_stroke_macro() {
        let mut stroke = StrokeDefinition::solid(Color::new("#336699").unwrap(), 2.0);
        stroke.set_style(StrokeStyle::Dashed);
        let line = crate::apply_stroke!(svg_element::Line::new(), &stroke);
        let rendered = line.to_string();
        assert!(rendered.contains("stroke=\"#336699\""));
        assert!(rendered.contains("stroke-width=\"2\""));
        assert!(rendered.contains("stroke-dasharray=\"5,5\""));
    }
}
