//! Color handling for branch shading, residue palettes and styles.
//!
//! [`Color`] wraps the `DynamicColor` type from the `color` crate so CSS color
//! strings can be used in configuration, while layouts emit colors with a
//! stable `#rrggbb` text form. [`Gradient`] samples a piecewise-linear ramp
//! interpolated in Oklab.

use std::{fmt, str::FromStr};

use color::{AlphaColor, DynamicColor, Oklab, Srgb};
use serde::{Serialize, Serializer};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Color { color }),
            Err(err) => Err(format!("Invalid color '{color_str}': {err}")),
        }
    }

    /// Create an opaque sRGB color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::from_rgb8(r, g, b)),
        }
    }

    /// Returns the color as a `#rrggbb` hex string.
    ///
    /// Alpha is dropped; out-of-gamut values are clamped by the conversion.
    pub fn to_hex(&self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }

    /// Returns the alpha component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Linearly interpolates towards `other` in Oklab space.
    ///
    /// `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        if t.is_nan() || t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        let a = self.color.to_alpha_color::<Oklab>().components;
        let b = other.color.to_alpha_color::<Oklab>().components;
        let mut mixed = [0.0; 4];
        for (i, channel) in mixed.iter_mut().enumerate() {
            *channel = a[i] + (b[i] - a[i]) * t;
        }
        Color {
            color: DynamicColor::from_alpha_color(AlphaColor::<Oklab>::new(mixed)),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb8(0, 0, 0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        svg::node::Value::from(color.to_hex())
    }
}

/// A color ramp made of ordered stops over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<(f32, Color)>,
}

impl Gradient {
    /// Creates a gradient from a first `(offset, color)` stop and any further
    /// stops.
    ///
    /// Stops are sorted by offset; offsets are clamped into `[0, 1]`.
    pub fn new(first: (f32, Color), rest: impl IntoIterator<Item = (f32, Color)>) -> Self {
        let mut stops: Vec<(f32, Color)> = std::iter::once(first)
            .chain(rest)
            .map(|(offset, color)| (offset.clamp(0.0, 1.0), color))
            .collect();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops }
    }

    /// Samples the gradient at `t` (clamped to `[0, 1]`).
    pub fn sample(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let (first_offset, first_color) = self.stops[0];
        if t <= first_offset {
            return first_color;
        }

        for pair in self.stops.windows(2) {
            let (lo, lo_color) = pair[0];
            let (hi, hi_color) = pair[1];
            if t <= hi {
                let span = hi - lo;
                if span <= f32::EPSILON {
                    return hi_color;
                }
                return lo_color.lerp(hi_color, (t - lo) / span);
            }
        }

        self.stops[self.stops.len() - 1].1
    }
}
