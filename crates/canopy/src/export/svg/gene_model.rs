//! SVG rendering for gene model viewports.

use svg::node::element as svg_element;

use canopy_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer},
    gene_model::IntervalKind,
    geometry::{Bounds, Size},
};

use super::{Svg, extent_bounds};
use crate::layout::interval::IntervalLayout;

/// UTR and unrecognised boxes are drawn at this fraction of the track height.
const REDUCED_BOX_SCALE: f32 = 0.5;

impl Svg {
    /// Renders a backbone line with one mark per visible interval.
    pub(super) fn render_gene_model(&self, layout: &IntervalLayout) -> (Bounds, LayeredOutput) {
        let mut output = LayeredOutput::new();
        let height = self.track_height;
        let middle = height / 2.0;

        let backbone = svg_element::Line::new()
            .set("x1", 0.0)
            .set("y1", middle)
            .set("x2", layout.width())
            .set("y2", middle);
        output.add_to_layer(
            RenderLayer::Grid,
            Box::new(apply_stroke!(backbone, &self.intron_stroke)),
        );

        for interval in layout.intervals() {
            let (x, width) = (interval.x_start(), interval.pixel_width());
            match interval.kind() {
                IntervalKind::Intron => {
                    let line = svg_element::Line::new()
                        .set("x1", x)
                        .set("y1", middle)
                        .set("x2", x + width)
                        .set("y2", middle)
                        .set("data-kind", interval.kind().as_str());
                    let line = apply_stroke!(line, &self.intron_stroke);
                    output.add_to_layer(RenderLayer::Interval, Box::new(line));
                }
                kind => {
                    let (box_height, color) = match kind {
                        IntervalKind::Exon | IntervalKind::Cds => (height, self.exon_color),
                        _ => (height * REDUCED_BOX_SCALE, self.utr_color),
                    };
                    let rect = svg_element::Rectangle::new()
                        .set("x", x)
                        .set("y", middle - box_height / 2.0)
                        .set("width", width)
                        .set("height", box_height)
                        .set("fill", color.to_string())
                        .set("data-kind", kind.as_str());
                    output.add_to_layer(RenderLayer::Interval, Box::new(rect));
                }
            }
        }

        (extent_bounds(Size::new(layout.width(), height)), output)
    }
}
