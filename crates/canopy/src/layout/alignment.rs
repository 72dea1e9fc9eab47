//! Alignment grid layout.
//!
//! Row `i` is sequence `i` and column `j` is alignment position `j`; nothing
//! is re-sorted or re-aligned. Each cell is coloured by the configured
//! [`Palette`], and carries its residue only when text is enabled, so a
//! zoomed-out view emits plain colour blocks.
//!
//! Cell size resolution, first match wins:
//!
//! 1. an explicit `col_width` / `row_height`,
//! 2. the size derived from `width` (minus the row header) or `height`,
//! 3. [`DEFAULT_CELL_SIZE`].

use log::debug;
use serde::{Deserialize, Serialize};

use canopy_core::{
    alignment::{Alignment, Sequence},
    color::Color,
    geometry::{Bounds, Point, Size},
};

use super::{LayoutError, check_dimension, palette::Palette};

/// Cell edge used when neither an explicit size nor a canvas size is given.
pub const DEFAULT_CELL_SIZE: f32 = 12.0;

/// Options for [`AlignmentGridEngine`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlignmentOptions {
    col_width: Option<f32>,
    row_height: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    show_row_header: bool,
    row_header_width: f32,
    show_text: bool,
    palette: Palette,
}

impl Default for AlignmentOptions {
    fn default() -> Self {
        Self {
            col_width: None,
            row_height: None,
            width: None,
            height: None,
            show_row_header: true,
            row_header_width: 150.0,
            show_text: true,
            palette: Palette::Individual,
        }
    }
}

impl AlignmentOptions {
    /// Sets an explicit cell size.
    pub fn with_cell_size(mut self, col_width: f32, row_height: f32) -> Self {
        self.col_width = Some(col_width);
        self.row_height = Some(row_height);
        self
    }

    /// Sets the canvas width used to derive the column width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the canvas height used to derive the row height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_row_header(mut self, show: bool) -> Self {
        self.show_row_header = show;
        self
    }

    pub fn with_row_header_width(mut self, width: f32) -> Self {
        self.row_header_width = width;
        self
    }

    pub fn with_text(mut self, show: bool) -> Self {
        self.show_text = show;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn col_width(&self) -> Option<f32> {
        self.col_width
    }

    pub fn row_height(&self) -> Option<f32> {
        self.row_height
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    pub fn show_row_header(&self) -> bool {
        self.show_row_header
    }

    pub fn row_header_width(&self) -> f32 {
        self.row_header_width
    }

    pub fn show_text(&self) -> bool {
        self.show_text
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    fn validate(&self) -> Result<(), LayoutError> {
        let optional = [
            ("column width", self.col_width),
            ("row height", self.row_height),
            ("width", self.width),
            ("height", self.height),
        ];
        for (option, value) in optional {
            if let Some(value) = value {
                check_dimension(option, value)?;
            }
        }
        check_dimension("row header width", self.row_header_width)
    }
}

/// One residue position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    col: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    residue: Option<char>,
    color: Color,
}

impl Cell {
    pub fn col(&self) -> usize {
        self.col
    }

    /// The residue glyph, present only when text is shown.
    pub fn residue(&self) -> Option<char> {
        self.residue
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// One sequence of the alignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    id: String,
    y: f32,
    cells: Vec<Cell>,
}

impl GridRow {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Top edge of the row.
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Geometry produced by [`AlignmentGridEngine::calculate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentGrid {
    rows: Vec<GridRow>,
    columns: usize,
    col_width: f32,
    row_height: f32,
    header_width: f32,
    grid_width: f32,
    grid_height: f32,
    viewport: Size,
}

impl AlignmentGrid {
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn col_width(&self) -> f32 {
        self.col_width
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Pixels reserved on the left for sequence ids; zero when hidden.
    pub fn header_width(&self) -> f32 {
        self.header_width
    }

    /// Header plus all columns.
    pub fn grid_width(&self) -> f32 {
        self.grid_width
    }

    pub fn grid_height(&self) -> f32 {
        self.grid_height
    }

    /// The requested canvas, or the grid extent when none was given.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Pixel box of a cell.
    pub fn cell_bounds(&self, row: usize, col: usize) -> Bounds {
        Bounds::new_from_top_left(
            Point::new(
                self.header_width + col as f32 * self.col_width,
                row as f32 * self.row_height,
            ),
            Size::new(self.col_width, self.row_height),
        )
    }
}

/// Lays out aligned sequences as a grid of coloured cells.
#[derive(Debug, Clone, Default)]
pub struct AlignmentGridEngine {
    options: AlignmentOptions,
}

impl AlignmentGridEngine {
    pub fn new(options: AlignmentOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AlignmentOptions {
        &self.options
    }

    /// Lays out a validated [`Alignment`].
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] for negative or non-finite
    /// sizes.
    pub fn calculate_alignment(&self, alignment: &Alignment) -> Result<AlignmentGrid, LayoutError> {
        self.calculate(alignment.sequences())
    }

    /// Lays out a raw slice of sequences.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Model`] when sequences differ in length or ids
    /// are blank or repeated, and [`LayoutError::InvalidDimension`] for
    /// negative or non-finite sizes.
    pub fn calculate(&self, sequences: &[Sequence]) -> Result<AlignmentGrid, LayoutError> {
        self.options.validate()?;
        let options = &self.options;

        let columns = Alignment::width_of(sequences)?;
        let row_count = sequences.len();

        let header_width = if options.show_row_header {
            options.row_header_width
        } else {
            0.0
        };

        let col_width = options
            .col_width
            .or_else(|| {
                options
                    .width
                    .filter(|_| columns > 0)
                    .map(|width| (width - header_width).max(0.0) / columns as f32)
            })
            .unwrap_or(DEFAULT_CELL_SIZE);
        let row_height = options
            .row_height
            .or_else(|| {
                options
                    .height
                    .filter(|_| row_count > 0)
                    .map(|height| height / row_count as f32)
            })
            .unwrap_or(DEFAULT_CELL_SIZE);

        let (grid_width, grid_height) = if row_count == 0 {
            (0.0, 0.0)
        } else {
            (
                header_width + columns as f32 * col_width,
                row_count as f32 * row_height,
            )
        };

        let rows = sequences
            .iter()
            .enumerate()
            .map(|(index, sequence)| GridRow {
                id: sequence.id().to_string(),
                y: index as f32 * row_height,
                cells: sequence
                    .residues()
                    .chars()
                    .enumerate()
                    .map(|(col, residue)| Cell {
                        col,
                        residue: options.show_text.then_some(residue),
                        color: options.palette.color(residue),
                    })
                    .collect(),
            })
            .collect();

        let viewport = Size::new(
            options.width.unwrap_or(grid_width),
            options.height.unwrap_or(grid_height),
        );

        debug!(
            rows = row_count,
            columns,
            col_width,
            row_height,
            palette = options.palette.as_str();
            "Alignment grid calculated"
        );

        Ok(AlignmentGrid {
            rows,
            columns,
            col_width,
            row_height,
            header_width,
            grid_width,
            grid_height,
            viewport,
        })
    }
}
