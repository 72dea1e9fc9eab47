//! Layer-based z-ordering for SVG output.
//!
//! Each exporter pushes nodes tagged with a [`RenderLayer`]; [`LayeredOutput::render`]
//! then groups them so the background is painted first and text last, whatever
//! order the nodes were produced in.
//!
//! # Example
//!
//! ```
//! # use canopy_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Path, Text};
//!
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("taxon A")));
//! output.add_to_layer(RenderLayer::Branch, Box::new(Path::new()));
//!
//! // Branch group first, then text
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use std::collections::BTreeMap;

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas fill and row header backgrounds
    Background,
    /// Alignment cells
    Grid,
    /// Gene model backbone and interval boxes
    Interval,
    /// Tree edges
    Branch,
    /// Tree node markers
    Node,
    /// Labels, residue glyphs and row headers
    Text,
}

impl RenderLayer {
    /// Returns the name used in the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Interval => "interval",
            Self::Branch => "branch",
            Self::Node => "node",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected per rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    layers: BTreeMap<RenderLayer, Vec<SvgNode>>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to `layer`; nodes keep insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.layers.entry(layer).or_default().push(node);
    }

    /// Appends every node of `other` after this output's nodes, layer by layer.
    pub fn merge(&mut self, other: LayeredOutput) {
        for (layer, nodes) in other.layers {
            self.layers.entry(layer).or_default().extend(nodes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of collected nodes across all layers.
    pub fn len(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// Consumes the output into one `<g data-layer="...">` per non-empty
    /// layer, bottom layer first.
    pub fn render(self) -> Vec<SvgNode> {
        self.layers
            .into_iter()
            .map(|(layer, nodes)| {
                let group = nodes.into_iter().fold(
                    svg_element::Group::new().set("data-layer", layer.name()),
                    |group, node| group.add(node),
                );
                Box::new(group) as SvgNode
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Rectangle, Text};

    use super::*;

    #[test]
    fn test_layered_output_new() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_merge() {
        let mut cells = LayeredOutput::new();
        cells.add_to_layer(RenderLayer::Grid, Box::new(Rectangle::new()));

        let mut headers = LayeredOutput::new();
        headers.add_to_layer(RenderLayer::Text, Box::new(Text::new("seq1")));

        cells.merge(headers);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells.render().len(), 2);
    }

    #[test]
    fn test_same_layer_shares_group() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Grid, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Grid, Box::new(Rectangle::new()));
        assert_eq!(output.render().len(), 1);
    }

    #[test]
    fn test_render_orders_layers_bottom_up() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Text::new("label")));
        output.add_to_layer(RenderLayer::Branch, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));

        let document = output
            .render()
            .into_iter()
            .fold(svg::Document::new(), |doc, node| doc.add(node))
            .to_string();

        let background = document.find("data-layer=\"background\"").unwrap();
        let branch = document.find("data-layer=\"branch\"").unwrap();
        let text = document.find("data-layer=\"text\"").unwrap();
        assert!(background < branch);
        assert!(branch < text);
    }
}
