//! SVG export backend.
//!
//! [`SvgBuilder`] resolves the [`StyleConfig`] into concrete colours and
//! strokes once, producing an [`Svg`] exporter. Each view renders into a
//! [`LayeredOutput`] in content coordinates; [`Svg::render_document`] then
//! wraps the layers in a padded canvas with an optional background.

mod alignment;
mod gene_model;
mod tree;

use log::debug;
use svg::{Document, node::element as svg_element};

use canopy_core::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextAnchor, TextDefinition},
    geometry::{Bounds, Insets, Point, Size},
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    layout::{alignment::AlignmentGrid, interval::IntervalLayout, tree::TreeLayout},
};

/// Space around the content on every side.
const DEFAULT_PADDING: f32 = 20.0;

/// Builder for an [`Svg`] exporter.
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    style: StyleConfig,
    padding: Insets,
    track_height: f32,
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self {
            style: StyleConfig::default(),
            padding: Insets::uniform(DEFAULT_PADDING),
            track_height: 20.0,
        }
    }
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the colours, strokes and font of `style`.
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Height of full-height boxes in the gene model track.
    pub fn with_track_height(mut self, track_height: f32) -> Self {
        self.track_height = track_height;
        self
    }

    /// Resolves the style into an exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when a configured colour cannot be parsed.
    pub fn build(self) -> Result<Svg, Error> {
        let style = &self.style;
        let background_color = style.background_color().map_err(Error::Render)?;
        let branch_color = style.branch_color().map_err(Error::Render)?;
        let text_color = style.text_color().map_err(Error::Render)?;

        let mut text = TextDefinition::new();
        text.set_font_family(style.font_family());
        text.set_color(Some(text_color));

        let mut branch_stroke = StrokeDefinition::solid(branch_color, style.branch_width());
        branch_stroke.set_cap(style.branch_cap().map_err(Error::Render)?);

        let mut intron_stroke =
            StrokeDefinition::solid(style.intron_color().map_err(Error::Render)?, 1.0);
        intron_stroke.set_style(style.intron_style());

        Ok(Svg {
            background_color,
            branch_stroke,
            node_color: branch_color,
            node_radius: style.node_radius(),
            text,
            exon_color: style.exon_color().map_err(Error::Render)?,
            utr_color: style.utr_color().map_err(Error::Render)?,
            intron_stroke,
            track_height: self.track_height,
            padding: self.padding,
        })
    }
}

/// SVG exporter with a resolved style.
#[derive(Debug, Clone)]
pub struct Svg {
    background_color: Option<Color>,
    branch_stroke: StrokeDefinition,
    node_color: Color,
    node_radius: f32,
    text: TextDefinition,
    exon_color: Color,
    utr_color: Color,
    intron_stroke: StrokeDefinition,
    track_height: f32,
    padding: Insets,
}

impl Svg {
    /// Wraps rendered layers in a document sized to `content_bounds` plus padding.
    fn render_document(&self, content_bounds: Bounds, mut output: LayeredOutput) -> Document {
        let canvas = content_bounds.expand(self.padding);
        let svg_size = canvas.to_size();
        debug!(width = svg_size.width(), height = svg_size.height(); "Final SVG dimensions");

        if let Some(background) = self.background_color {
            let rect = svg_element::Rectangle::new()
                .set("x", canvas.min_x())
                .set("y", canvas.min_y())
                .set("width", svg_size.width())
                .set("height", svg_size.height())
                .set("fill", background.to_string())
                .set("fill-opacity", background.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(rect));
        }

        let doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        let main_group = output.render().into_iter().fold(
            svg_element::Group::new().set(
                "transform",
                format!(
                    "translate({}, {})",
                    -canvas.min_x(),
                    -canvas.min_y()
                ),
            ),
            |group, node| group.add(node),
        );

        doc.add(main_group)
    }

    /// Text drawn at `font_size`, sharing the configured family and colour.
    fn text_definition(&self, font_size: f32) -> TextDefinition {
        let mut definition = self.text.clone();
        definition.set_font_size(font_size);
        definition
    }
}

/// Estimated box a label occupies, given its anchor and a vertically centred baseline.
fn text_bounds(text: &Text<'_>, position: Point, anchor: TextAnchor) -> Bounds {
    let size = text.size();
    let left = match anchor {
        TextAnchor::Start => position.x(),
        TextAnchor::Middle => position.x() - size.width() / 2.0,
        TextAnchor::End => position.x() - size.width(),
    };
    Bounds::new_from_top_left(
        Point::new(left, position.y() - size.height() / 2.0),
        size,
    )
}

/// Bounds spanning the origin to `size`.
fn extent_bounds(size: Size) -> Bounds {
    Bounds::new_from_top_left(Point::default(), size)
}

impl Exporter for Svg {
    fn export_tree_layout(&self, layout: &TreeLayout) -> Result<String, Error> {
        let (bounds, output) = self.render_tree(layout);
        let doc = self.render_document(bounds, output);
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }

    fn export_interval_layout(&self, layout: &IntervalLayout) -> Result<String, Error> {
        let (bounds, output) = self.render_gene_model(layout);
        let doc = self.render_document(bounds, output);
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }

    fn export_alignment_grid(&self, grid: &AlignmentGrid) -> Result<String, Error> {
        let (bounds, output) = self.render_alignment(grid);
        let doc = self.render_document(bounds, output);
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_build_rejects_bad_colors() {
        let style = StyleConfig::default().with_background_color("not-a-colour");
        let err = SvgBuilder::new().with_style(&style).build().unwrap_err();
        assert!(err.to_string().contains("Invalid background color"));
    }

    #[test]
    fn test_document_is_padded_and_translated() {
        let svg = SvgBuilder::new()
            .with_padding(Insets::uniform(10.0))
            .build()
            .unwrap();
        let doc = svg
            .render_document(extent_bounds(Size::new(100.0, 50.0)), LayeredOutput::new())
            .to_string();
        assert!(doc.contains("viewBox=\"0 0 120 70\""));
        assert!(doc.contains("translate(10, 10)"));
        assert!(!doc.contains("data-layer=\"background\""));
    }

    #[test]
    fn test_background_is_drawn_first() {
        let style = StyleConfig::default().with_background_color("white");
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();

        let definition = TextDefinition::new();
        let output = Text::new(&definition, "A").render_to_layers(Point::new(5.0, 5.0));
        let doc = svg
            .render_document(extent_bounds(Size::new(10.0, 10.0)), output)
            .to_string();

        let background = doc.find("data-layer=\"background\"").unwrap();
        let text = doc.find("data-layer=\"text\"").unwrap();
        assert!(background < text);
        assert!(doc.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn test_text_bounds_follow_anchor() {
        let mut definition = TextDefinition::new();
        definition.set_font_size(10.0);
        let text = Text::new(&definition, "abcd");
        let at = Point::new(100.0, 50.0);

        let start = text_bounds(&text, at, TextAnchor::Start);
        assert_approx_eq!(f32, start.min_x(), 100.0);
        assert_approx_eq!(f32, start.max_x(), 124.0);
        assert_approx_eq!(f32, start.min_y(), 45.0);

        let end = text_bounds(&text, at, TextAnchor::End);
        assert_approx_eq!(f32, end.min_x(), 76.0);
        assert_approx_eq!(f32, end.max_x(), 100.0);

        let middle = text_bounds(&text, at, TextAnchor::Middle);
        assert_approx_eq!(f32, middle.min_x(), 88.0);
    }
}
