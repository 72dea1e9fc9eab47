//! Configuration types for Canopy views.
//!
//! All types implement [`serde::Deserialize`] with a default for every
//! field, so a configuration file only needs the keys it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`TreeOptions`] - Tree display options (`[tree]`).
//! - [`AlignmentOptions`] - Alignment grid options (`[alignment]`).
//! - [`GeneModelConfig`] - Gene model viewport options (`[gene_model]`).
//! - [`StyleConfig`] - Colours, stroke widths and fonts used by the SVG output (`[style]`).
//!
//! # Example
//!
//! ```
//! # use canopy::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert!(!config.tree().cladogram());
//! ```

use serde::Deserialize;

use canopy_core::{
    color::Color,
    draw::{StrokeCap, StrokeStyle},
};

pub use crate::layout::{alignment::AlignmentOptions, tree::TreeOptions};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Tree display section.
    #[serde(default)]
    tree: TreeOptions,

    /// Alignment grid section.
    #[serde(default)]
    alignment: AlignmentOptions,

    /// Gene model viewport section.
    #[serde(default)]
    gene_model: GeneModelConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        tree: TreeOptions,
        alignment: AlignmentOptions,
        gene_model: GeneModelConfig,
        style: StyleConfig,
    ) -> Self {
        Self {
            tree,
            alignment,
            gene_model,
            style,
        }
    }

    /// Returns the tree display options.
    pub fn tree(&self) -> &TreeOptions {
        &self.tree
    }

    /// Returns the alignment grid options.
    pub fn alignment(&self) -> &AlignmentOptions {
        &self.alignment
    }

    /// Returns the gene model viewport options.
    pub fn gene_model(&self) -> &GeneModelConfig {
        &self.gene_model
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replaces the alignment section.
    pub fn with_alignment(mut self, alignment: AlignmentOptions) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Gene model viewport configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneModelConfig {
    width: f32,
    track_height: f32,
}

impl Default for GeneModelConfig {
    fn default() -> Self {
        Self {
            width: 940.0,
            track_height: 20.0,
        }
    }
}

impl GeneModelConfig {
    pub fn new(width: f32, track_height: f32) -> Self {
        Self {
            width,
            track_height,
        }
    }

    /// Pixel width the visible window is mapped onto.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height of a full-height (exon) box.
    pub fn track_height(&self) -> f32 {
        self.track_height
    }
}

/// Visual styling for the SVG output.
///
/// Colour fields are CSS colour strings, parsed on access so a bad value
/// is reported with the key it came from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    branch_color: String,
    branch_width: f32,
    branch_cap: String,
    node_radius: f32,
    font_family: String,
    text_color: String,
    exon_color: String,
    utr_color: String,
    intron_color: String,
    intron_style: String,
    padding: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            branch_color: "#333333".to_string(),
            branch_width: 1.5,
            branch_cap: "square".to_string(),
            node_radius: 2.5,
            font_family: "sans-serif".to_string(),
            text_color: "#222222".to_string(),
            exon_color: "#2b6cb0".to_string(),
            utr_color: "#90cdf4".to_string(),
            intron_color: "#718096".to_string(),
            intron_style: "solid".to_string(),
            padding: 20.0,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Colour of branches that are not shaded by support.
    pub fn branch_color(&self) -> Result<Color, String> {
        parse_color("branch", &self.branch_color)
    }

    pub fn text_color(&self) -> Result<Color, String> {
        parse_color("text", &self.text_color)
    }

    pub fn exon_color(&self) -> Result<Color, String> {
        parse_color("exon", &self.exon_color)
    }

    /// Colour of UTR boxes and of interval kinds without a dedicated colour.
    pub fn utr_color(&self) -> Result<Color, String> {
        parse_color("utr", &self.utr_color)
    }

    pub fn intron_color(&self) -> Result<Color, String> {
        parse_color("intron", &self.intron_color)
    }

    /// Line cap of branches: `butt`, `round` or `square`.
    pub fn branch_cap(&self) -> Result<StrokeCap, String> {
        self.branch_cap
            .parse()
            .map_err(|err| format!("Invalid branch_cap in config: {err}"))
    }

    /// Dash pattern of intron lines: `solid`, `dashed`, `dotted` or a raw
    /// SVG dasharray.
    pub fn intron_style(&self) -> StrokeStyle {
        let Ok(style) = self.intron_style.parse();
        style
    }

    pub fn branch_width(&self) -> f32 {
        self.branch_width
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Blank margin around the content on every side.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Sets the background colour string.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}

fn parse_color(key: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {key} color in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_colors_parse() {
        let style = StyleConfig::default();
        assert_eq!(style.background_color(), Ok(None));
        assert_eq!(style.branch_color().unwrap().to_hex(), "#333333");
        assert!(style.text_color().is_ok());
        assert!(style.exon_color().is_ok());
        assert!(style.utr_color().is_ok());
        assert!(style.intron_color().is_ok());
    }

    #[test]
    fn test_background_color() {
        let style = StyleConfig::default().with_background_color("white");
        assert_eq!(style.background_color().unwrap().unwrap().to_hex(), "#ffffff");

        let style = StyleConfig::default().with_background_color("nope");
        assert!(
            style
                .background_color()
                .unwrap_err()
                .contains("Invalid background color")
        );
    }

    #[test]
    fn test_invalid_color_names_key() {
        let style = StyleConfig {
            exon_color: "blurple".to_string(),
            ..StyleConfig::default()
        };
        assert!(style.exon_color().unwrap_err().contains("exon"));
    }

    #[test]
    fn test_stroke_options() {
        let style = StyleConfig::default();
        assert_eq!(style.branch_cap(), Ok(StrokeCap::Square));
        assert_eq!(style.intron_style(), StrokeStyle::Solid);

        let style = StyleConfig {
            branch_cap: "pointy".to_string(),
            intron_style: "dashed".to_string(),
            ..StyleConfig::default()
        };
        assert!(style.branch_cap().unwrap_err().contains("branch_cap"));
        assert_eq!(style.intron_style(), StrokeStyle::Dashed);
    }

    #[test]
    fn test_gene_model_defaults() {
        let config = GeneModelConfig::default();
        assert_eq!(config.width(), 940.0);
        assert_eq!(config.track_height(), 20.0);
    }
}
