//! Command-line argument definitions for the Canopy CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Each view has its own subcommand; configuration file
//! selection and logging verbosity are global.

use clap::{Parser, Subcommand, ValueEnum};

use canopy::{
    AlignmentFormat, TreeFormat, layout::palette::Palette, state::ViewAction,
};

/// Command-line arguments for the Canopy view tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// The view to produce.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay out a phylogenetic tree (JSON or Newick)
    Tree(TreeArgs),
    /// Lay out a window of a gene model (JSON)
    Genes(GenesArgs),
    /// Lay out a multiple sequence alignment (JSON or FASTA)
    Msa(MsaArgs),
}

/// What the CLI writes to the output file.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Emit {
    /// Rendered SVG document
    #[default]
    Svg,
    /// The layout geometry as JSON
    Json,
}

/// Input and output shared by every subcommand.
#[derive(clap::Args, Debug)]
pub struct IoArgs {
    /// Path to the input document
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output kind
    #[arg(long, value_enum, default_value_t = Emit::Svg)]
    pub emit: Emit,
}

#[derive(clap::Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Input format (json, newick); detected from the file when omitted
    #[arg(short, long)]
    pub format: Option<TreeFormat>,

    /// Draw every branch with unit length
    #[arg(long)]
    pub cladogram: bool,

    /// Label internal nodes with their support values
    #[arg(long)]
    pub support_values: bool,

    /// Colour branches by support
    #[arg(long)]
    pub shade_by_support: bool,

    /// View actions applied in order, e.g. `--action font-size=14`
    #[arg(short, long = "action", value_name = "ACTION")]
    pub actions: Vec<ViewAction>,
}

#[derive(clap::Args, Debug)]
pub struct GenesArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Left edge of the visible window, in percent of the region
    #[arg(long, default_value_t = 0.0)]
    pub pan_min: f64,

    /// Right edge of the visible window, in percent of the region
    #[arg(long, default_value_t = 100.0)]
    pub pan_max: f64,

    /// Pan and zoom actions applied after the window is set, e.g. `--action zoom-in`
    #[arg(short, long = "action", value_name = "ACTION")]
    pub actions: Vec<ViewAction>,
}

#[derive(clap::Args, Debug)]
pub struct MsaArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Input format (json, fasta); detected from the file when omitted
    #[arg(short, long)]
    pub format: Option<AlignmentFormat>,

    /// Residue colour scheme (individual, nucleotide, chemistry)
    #[arg(long)]
    pub palette: Option<Palette>,

    /// Cell edge in pixels, overriding any configured or derived size
    #[arg(long)]
    pub cell_size: Option<f32>,

    /// Draw colour blocks without residue glyphs
    #[arg(long)]
    pub no_text: bool,

    /// Hide the sequence id column
    #[arg(long)]
    pub no_header: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_subcommand() {
        let args = Args::try_parse_from([
            "canopy",
            "tree",
            "demo.nwk",
            "--cladogram",
            "--action",
            "font-size=14",
            "--action",
            "toggle-support-values",
            "--log-level",
            "off",
        ])
        .unwrap();

        assert_eq!(args.log_level, "off");
        let Command::Tree(tree) = args.command else {
            panic!("Expected tree subcommand");
        };
        assert_eq!(tree.io.input, "demo.nwk");
        assert_eq!(tree.io.output, "out.svg");
        assert_eq!(tree.io.emit, Emit::Svg);
        assert!(tree.cladogram);
        assert_eq!(
            tree.actions,
            [ViewAction::SetFontSize(14.0), ViewAction::ToggleSupportValues]
        );
    }

    #[test]
    fn test_genes_window() {
        let args = Args::try_parse_from([
            "canopy", "genes", "model.json", "--pan-min", "25", "--pan-max", "75", "--emit", "json",
        ])
        .unwrap();
        let Command::Genes(genes) = args.command else {
            panic!("Expected genes subcommand");
        };
        assert_eq!((genes.pan_min, genes.pan_max), (25.0, 75.0));
        assert_eq!(genes.io.emit, Emit::Json);
    }

    #[test]
    fn test_msa_options() {
        let args = Args::try_parse_from([
            "canopy",
            "--config",
            "canopy.toml",
            "msa",
            "aln.fa",
            "--format",
            "fasta",
            "--palette",
            "chemistry",
            "--no-text",
        ])
        .unwrap();
        assert_eq!(args.config.as_deref(), Some("canopy.toml"));
        let Command::Msa(msa) = args.command else {
            panic!("Expected msa subcommand");
        };
        assert_eq!(msa.format, Some(AlignmentFormat::Fasta));
        assert_eq!(msa.palette, Some(Palette::Chemistry));
        assert!(msa.no_text);
        assert!(!msa.no_header);
    }

    #[test]
    fn test_invalid_action_is_rejected() {
        assert!(Args::try_parse_from(["canopy", "tree", "t.nwk", "--action", "spin"]).is_err());
    }
}
