//! SVG rendering for tree layouts.

use svg::node::element as svg_element;

use canopy_core::{
    apply_stroke,
    draw::{Drawable, LayeredOutput, RenderLayer, Text},
    geometry::{Bounds, Insets},
};

use super::{Svg, extent_bounds, text_bounds};
use crate::layout::tree::{LabelKind, TreeLayout};

/// Support values are drawn smaller than leaf names.
const SUPPORT_FONT_SCALE: f32 = 0.8;

impl Svg {
    /// Renders branches, nodes and labels, returning the bounds they cover.
    pub(super) fn render_tree(&self, layout: &TreeLayout) -> (Bounds, LayeredOutput) {
        let mut output = LayeredOutput::new();

        for edge in layout.edges() {
            let stroke = match edge.shade() {
                Some(shade) => self.branch_stroke.with_color(shade),
                None => self.branch_stroke.clone(),
            };
            let path = svg_element::Path::new()
                .set("d", edge.path().to_svg_data())
                .set("fill", "none");
            output.add_to_layer(RenderLayer::Branch, Box::new(apply_stroke!(path, &stroke)));
        }

        if self.node_radius > 0.0 {
            for node in layout.nodes() {
                let circle = svg_element::Circle::new()
                    .set("cx", node.position().x())
                    .set("cy", node.position().y())
                    .set("r", self.node_radius)
                    .set("fill", self.node_color.to_string());
                output.add_to_layer(RenderLayer::Node, Box::new(circle));
            }
        }

        let name_text = self.text_definition(layout.font_size());
        let support_text = self.text_definition(layout.font_size() * SUPPORT_FONT_SCALE);

        let mut bounds = extent_bounds(layout.extent()).expand(Insets::uniform(self.node_radius));
        for label in layout.labels() {
            let definition = match label.kind() {
                LabelKind::Name => &name_text,
                LabelKind::Support => &support_text,
            };
            let text = Text::new(definition, label.text()).with_anchor(label.anchor());
            bounds = bounds.merge(&text_bounds(&text, label.position(), label.anchor()));
            output.merge(text.render_to_layers(label.position()));
        }

        (bounds, output)
    }
}
