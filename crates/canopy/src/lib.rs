//! Canopy - Layout engines for phylogenetic trees, gene models and sequence alignments
//!
//! This library turns biological data into positioned geometry. It provides
//! three independent engines:
//!
//! - **Tree layout** ([`layout::tree::TreeEngine`]): phylogram or cladogram
//!   coordinates, branch shading and labels for a rooted tree
//! - **Gene model viewport** ([`layout::interval::IntervalViewport`]): maps a
//!   percentage window of a genomic region onto pixels, clipping intervals
//! - **Alignment grid** ([`layout::alignment::AlignmentGridEngine`]): one
//!   coloured cell per residue, with optional glyphs and row headers
//!
//! Engines are pure: the same input always yields the same layout, and view
//! state such as pan and zoom lives with the caller ([`state::ViewState`]).
//! [`ViewBuilder`] ties document loading, layout and SVG export together.

pub mod config;
pub mod layout;
pub mod state;

mod error;
mod export;

pub use canopy_core::{alignment, color, draw, gene_model, geometry, tree};
pub use canopy_data::{AlignmentFormat, TreeFormat};

pub use error::CanopyError;

use log::{debug, info, trace};

use canopy_core::{alignment::Sequence, gene_model::GeneModel, geometry::Insets, tree::Tree};

use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use layout::{
    alignment::{AlignmentGrid, AlignmentGridEngine},
    interval::{IntervalLayout, IntervalViewport, PanWindow},
    tree::{TreeEngine, TreeLayout},
};
use state::ViewState;

/// Builder for loading, laying out and rendering Canopy views.
///
/// # Examples
///
/// ```rust,no_run
/// use canopy::{TreeFormat, ViewBuilder, config::AppConfig, state::ViewState};
///
/// let builder = ViewBuilder::new(AppConfig::default());
///
/// // Parse a document into a tree
/// let tree = builder
///     .parse_tree("((A:1,B:2)90:1,C:3);", TreeFormat::Newick)
///     .expect("Failed to parse");
///
/// // Lay it out with the default view state and render SVG
/// let layout = builder
///     .layout_tree(&tree, &ViewState::default())
///     .expect("Failed to lay out");
/// let svg = builder.render_tree_svg(&layout).expect("Failed to render");
///
/// // Or use default config
/// let builder = ViewBuilder::default();
/// ```
#[derive(Default)]
pub struct ViewBuilder {
    config: AppConfig,
}

impl ViewBuilder {
    /// Create a new view builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a tree document.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Data`] carrying `source`, so diagnostics can
    /// point into it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use canopy::{TreeFormat, ViewBuilder};
    ///
    /// let tree = ViewBuilder::default()
    ///     .parse_tree(r#"{"children": [{"name": "A"}, {"name": "B"}]}"#, TreeFormat::Json)
    ///     .expect("Failed to parse tree");
    /// assert_eq!(tree.leaf_count(), 2);
    /// ```
    pub fn parse_tree(&self, source: &str, format: TreeFormat) -> Result<Tree, CanopyError> {
        info!(format:%; "Parsing tree document");
        let tree = canopy_data::parse_tree(source, format)
            .map_err(|err| CanopyError::new_data_error(err, source))?;
        debug!(nodes = tree.len(), leaves = tree.leaf_count(); "Tree parsed");
        trace!(tree:?; "Parsed tree");
        Ok(tree)
    }

    /// Parse a gene model document.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Data`] for malformed documents or invalid
    /// intervals.
    pub fn parse_gene_model(&self, source: &str) -> Result<GeneModel, CanopyError> {
        info!("Parsing gene model document");
        let model = canopy_data::parse_gene_model(source)
            .map_err(|err| CanopyError::new_data_error(err, source))?;
        debug!(
            intervals = model.intervals().len(),
            min = model.min(),
            max = model.max();
            "Gene model parsed"
        );
        Ok(model)
    }

    /// Parse an alignment document into its sequences.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Data`] for malformed documents, unequal
    /// sequence lengths or bad ids.
    pub fn parse_alignment(
        &self,
        source: &str,
        format: AlignmentFormat,
    ) -> Result<Vec<Sequence>, CanopyError> {
        info!(format:%; "Parsing alignment document");
        let alignment = canopy_data::parse_alignment(source, format)
            .map_err(|err| CanopyError::new_data_error(err, source))?;
        debug!(sequences = alignment.len(), columns = alignment.width(); "Alignment parsed");
        Ok(alignment.into_sequences())
    }

    /// Lay out a tree with the configured options overlaid by `state`.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Layout`] for invalid dimensions or support ranges.
    pub fn layout_tree(&self, tree: &Tree, state: &ViewState) -> Result<TreeLayout, CanopyError> {
        let options = state.tree_options(self.config.tree());
        info!(cladogram = options.cladogram(); "Calculating tree layout");
        let layout = TreeEngine::new(options).calculate(tree)?;
        info!(edges = layout.edges().len(), labels = layout.labels().len(); "Tree layout calculated");
        Ok(layout)
    }

    /// Lay out the part of a gene model visible through `window`.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Layout`] for an invalid configured width.
    pub fn layout_gene_model(
        &self,
        model: &GeneModel,
        window: PanWindow,
    ) -> Result<IntervalLayout, CanopyError> {
        info!(min = window.min(), max = window.max(); "Calculating gene model viewport");
        let layout = IntervalViewport::new(self.config.gene_model().width()).calculate(model, window)?;
        info!(visible = layout.intervals().len(); "Gene model viewport calculated");
        Ok(layout)
    }

    /// Lay out aligned sequences as a grid.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Layout`] when the sequences are not a valid
    /// alignment or sizes are invalid.
    pub fn layout_alignment(&self, sequences: &[Sequence]) -> Result<AlignmentGrid, CanopyError> {
        info!(sequences = sequences.len(); "Calculating alignment grid");
        let grid = AlignmentGridEngine::new(self.config.alignment().clone()).calculate(sequences)?;
        info!(columns = grid.columns(); "Alignment grid calculated");
        Ok(grid)
    }

    /// Render a tree layout to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Export`] when the configured style is invalid.
    pub fn render_tree_svg(&self, layout: &TreeLayout) -> Result<String, CanopyError> {
        let svg = self.exporter()?.export_tree_layout(layout)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render a gene model viewport to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Export`] when the configured style is invalid.
    pub fn render_gene_model_svg(&self, layout: &IntervalLayout) -> Result<String, CanopyError> {
        let svg = self.exporter()?.export_interval_layout(layout)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render an alignment grid to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Export`] when the configured style is invalid.
    pub fn render_alignment_svg(&self, grid: &AlignmentGrid) -> Result<String, CanopyError> {
        let svg = self.exporter()?.export_alignment_grid(grid)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    fn exporter(&self) -> Result<export::svg::Svg, CanopyError> {
        let svg = SvgBuilder::new()
            .with_style(self.config.style())
            .with_padding(Insets::uniform(self.config.style().padding()))
            .with_track_height(self.config.gene_model().track_height())
            .build()?;
        Ok(svg)
    }
}
