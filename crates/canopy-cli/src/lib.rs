//! Canopy CLI library
//!
//! This module contains the core CLI logic for the Canopy view tool: it
//! loads a document, lays it out and writes SVG or the layout as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, Emit, GenesArgs, IoArgs, MsaArgs, TreeArgs};

use std::{fs, path::Path};

use log::info;
use serde::Serialize;

use canopy::{
    AlignmentFormat, CanopyError, TreeFormat, ViewBuilder,
    config::AppConfig,
    layout::interval::PanWindow,
    state::ViewState,
};

/// Run the Canopy CLI application
///
/// This function processes the input file through the Canopy pipeline
/// and writes the result to the output file.
///
/// # Errors
///
/// Returns `CanopyError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Document errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CanopyError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Tree(tree) => run_tree(app_config, tree),
        Command::Genes(genes) => run_genes(app_config, genes),
        Command::Msa(msa) => run_msa(app_config, msa),
    }
}

fn run_tree(config: AppConfig, args: &TreeArgs) -> Result<(), CanopyError> {
    info!(input_path = args.io.input, output_path = args.io.output; "Processing tree");
    let source = fs::read_to_string(&args.io.input)?;
    let format = args
        .format
        .unwrap_or_else(|| TreeFormat::detect(Some(Path::new(&args.io.input)), &source));

    let options = config
        .tree()
        .clone()
        .with_cladogram(config.tree().cladogram() || args.cladogram)
        .with_support_values(config.tree().show_support_values() || args.support_values)
        .with_shading(config.tree().shade_branch_by_support() || args.shade_by_support);
    let state = ViewState::from_tree_options(&options).apply_all(args.actions.iter().copied());

    let builder = ViewBuilder::new(config);
    let tree = builder.parse_tree(&source, format)?;
    let layout = builder.layout_tree(&tree, &state)?;

    match args.io.emit {
        Emit::Svg => write_output(&args.io, builder.render_tree_svg(&layout)?),
        Emit::Json => write_output(&args.io, to_json(&layout)?),
    }
}

fn run_genes(config: AppConfig, args: &GenesArgs) -> Result<(), CanopyError> {
    info!(input_path = args.io.input, output_path = args.io.output; "Processing gene model");
    let source = fs::read_to_string(&args.io.input)?;

    let window = PanWindow::new(args.pan_min, args.pan_max)?;
    let state = ViewState::default()
        .with_pan_window(window)
        .apply_all(args.actions.iter().copied());

    let builder = ViewBuilder::new(config);
    let model = builder.parse_gene_model(&source)?;
    let layout = builder.layout_gene_model(&model, state.pan())?;

    match args.io.emit {
        Emit::Svg => write_output(&args.io, builder.render_gene_model_svg(&layout)?),
        Emit::Json => write_output(&args.io, to_json(&layout)?),
    }
}

fn run_msa(config: AppConfig, args: &MsaArgs) -> Result<(), CanopyError> {
    info!(input_path = args.io.input, output_path = args.io.output; "Processing alignment");
    let source = fs::read_to_string(&args.io.input)?;
    let format = args
        .format
        .unwrap_or_else(|| AlignmentFormat::detect(Some(Path::new(&args.io.input)), &source));

    let mut options = config.alignment().clone();
    if let Some(palette) = args.palette {
        options = options.with_palette(palette);
    }
    if let Some(size) = args.cell_size {
        options = options.with_cell_size(size, size);
    }
    if args.no_text {
        options = options.with_text(false);
    }
    if args.no_header {
        options = options.with_row_header(false);
    }

    let builder = ViewBuilder::new(config.with_alignment(options));
    let sequences = builder.parse_alignment(&source, format)?;
    let grid = builder.layout_alignment(&sequences)?;

    match args.io.emit {
        Emit::Svg => write_output(&args.io, builder.render_alignment_svg(&grid)?),
        Emit::Json => write_output(&args.io, to_json(&grid)?),
    }
}

fn to_json(layout: &impl Serialize) -> Result<String, CanopyError> {
    serde_json::to_string_pretty(layout).map_err(|err| CanopyError::Export(Box::new(err)))
}

fn write_output(io: &IoArgs, content: String) -> Result<(), CanopyError> {
    fs::write(&io.output, content)?;
    info!(output_file = io.output, emit:? = io.emit; "Output written successfully");
    Ok(())
}
