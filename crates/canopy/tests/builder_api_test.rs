//! Integration tests for the ViewBuilder API
//!
//! These tests drive each view from document text to SVG through the public API.

use canopy::{
    AlignmentFormat, CanopyError, TreeFormat, ViewBuilder,
    config::AppConfig,
    layout::interval::PanWindow,
    state::{ViewAction, ViewState},
};

const NEWICK: &str = "((Homo_sapiens:0.1,Pan_troglodytes:0.12)98:0.3,(Mus_musculus:0.4,Rattus:0.38)74:0.2,Gallus:1.1);";

#[test]
fn test_builder_api_exists() {
    let _builder = ViewBuilder::default();
}

#[test]
fn test_render_tree() {
    let builder = ViewBuilder::default();
    let tree = builder
        .parse_tree(NEWICK, TreeFormat::Newick)
        .expect("Failed to parse tree");
    let layout = builder
        .layout_tree(&tree, &ViewState::default())
        .expect("Failed to lay out tree");
    let svg = builder.render_tree_svg(&layout).expect("Failed to render tree");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Homo sapiens"));
    // supports are shown by default
    assert!(svg.contains(">98<"));
}

#[test]
fn test_view_state_changes_tree_layout() {
    let builder = ViewBuilder::default();
    let tree = builder.parse_tree(NEWICK, TreeFormat::Newick).unwrap();

    let phylogram = builder.layout_tree(&tree, &ViewState::default()).unwrap();
    let state = ViewState::default().apply(ViewAction::ToggleCladogram);
    let cladogram = builder.layout_tree(&tree, &state).unwrap();

    assert_ne!(phylogram, cladogram);
    assert_eq!(phylogram.nodes().len(), cladogram.nodes().len());
}

#[test]
fn test_render_gene_model() {
    let source = r#"{"intervals": [
        {"kind": "5'UTR", "start": 0, "end": 120},
        {"kind": "exon", "start": 120, "end": 400},
        {"kind": "intron", "start": 400, "end": 900},
        {"kind": "exon", "start": 900, "end": 1200}
    ]}"#;

    let builder = ViewBuilder::default();
    let model = builder.parse_gene_model(source).expect("Failed to parse gene model");

    let full = builder.layout_gene_model(&model, PanWindow::FULL).unwrap();
    assert_eq!(full.intervals().len(), 4);

    let window = PanWindow::new(40.0, 60.0).unwrap();
    let zoomed = builder.layout_gene_model(&model, window).unwrap();
    assert_eq!(zoomed.intervals().len(), 1);

    let svg = builder.render_gene_model_svg(&zoomed).unwrap();
    assert!(svg.contains("data-kind=\"intron\""));
}

#[test]
fn test_render_alignment_from_fasta() {
    let source = ">human\nMKV-LA\n>mouse\nMKVQLA\n";

    let builder = ViewBuilder::default();
    let sequences = builder
        .parse_alignment(source, AlignmentFormat::Fasta)
        .expect("Failed to parse alignment");
    let grid = builder.layout_alignment(&sequences).unwrap();
    assert_eq!(grid.columns(), 6);

    let svg = builder.render_alignment_svg(&grid).unwrap();
    assert!(svg.contains(">mouse<"));
}

#[test]
fn test_parse_error_keeps_source() {
    let source = "((A,B);";
    let err = ViewBuilder::default()
        .parse_tree(source, TreeFormat::Newick)
        .unwrap_err();

    match err {
        CanopyError::Data { src, .. } => assert_eq!(src, source),
        other => panic!("Expected data error, got {other:?}"),
    }
}

#[test]
fn test_unequal_sequences_are_rejected() {
    let builder = ViewBuilder::default();
    let err = builder
        .parse_alignment(">a\nACGT\n>b\nACG\n", AlignmentFormat::Fasta)
        .unwrap_err();
    assert!(matches!(err, CanopyError::Data { .. }));
}

#[test]
fn test_builder_reusability() {
    let builder = ViewBuilder::new(AppConfig::default());

    let first = builder.parse_tree("(A,B);", TreeFormat::Newick).unwrap();
    let second = builder.parse_tree("(C,(D,E));", TreeFormat::Newick).unwrap();

    let state = ViewState::default();
    let svg1 = builder
        .render_tree_svg(&builder.layout_tree(&first, &state).unwrap())
        .unwrap();
    let svg2 = builder
        .render_tree_svg(&builder.layout_tree(&second, &state).unwrap())
        .unwrap();

    assert!(svg1.contains("<svg"), "First SVG should be valid");
    assert!(svg2.contains("<svg"), "Second SVG should be valid");
}
