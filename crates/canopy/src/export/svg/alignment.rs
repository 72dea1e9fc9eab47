//! SVG rendering for alignment grids.

use svg::node::element as svg_element;

use canopy_core::{
    draw::{Drawable, LayeredOutput, RenderLayer, Text, TextAnchor},
    geometry::{Bounds, Point},
};

use super::{Svg, extent_bounds};
use crate::layout::alignment::AlignmentGrid;

/// Glyph size relative to the smaller cell edge.
const GLYPH_SCALE: f32 = 0.8;

/// Gap between a row header and the first column.
const HEADER_GAP: f32 = 4.0;

impl Svg {
    /// Renders one rectangle per cell, optional glyphs and row headers.
    pub(super) fn render_alignment(&self, grid: &AlignmentGrid) -> (Bounds, LayeredOutput) {
        let mut output = LayeredOutput::new();

        let mut glyph_text = self.text_definition(grid.col_width().min(grid.row_height()) * GLYPH_SCALE);
        glyph_text.set_font_family("monospace");
        let header_text = self.text_definition(grid.row_height() * GLYPH_SCALE);

        let mut glyph = [0_u8; 4];
        for (row_index, row) in grid.rows().iter().enumerate() {
            for cell in row.cells() {
                let bounds = grid.cell_bounds(row_index, cell.col());
                let rect = svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", cell.color().to_string());
                output.add_to_layer(RenderLayer::Grid, Box::new(rect));

                if let Some(residue) = cell.residue() {
                    let centre = Point::new(
                        bounds.min_x() + bounds.width() / 2.0,
                        bounds.min_y() + bounds.height() / 2.0,
                    );
                    let residue: &str = residue.encode_utf8(&mut glyph);
                    output.merge(
                        Text::new(&glyph_text, residue)
                            .with_anchor(TextAnchor::Middle)
                            .render_to_layers(centre),
                    );
                }
            }

            if grid.header_width() > 0.0 {
                let anchor = Point::new(
                    grid.header_width() - HEADER_GAP,
                    row.y() + grid.row_height() / 2.0,
                );
                output.merge(
                    Text::new(&header_text, row.id())
                        .with_anchor(TextAnchor::End)
                        .render_to_layers(anchor),
                );
            }
        }

        (extent_bounds(grid.viewport()), output)
    }
}
