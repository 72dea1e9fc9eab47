use canopy_core::gene_model::IntervalKind;
use canopy_data::{
    AlignmentFormat, ErrorCode, TreeFormat, parse_alignment, parse_gene_model, parse_tree,
};

#[test]
fn test_newick_tree_with_support_and_lengths() {
    let source = "((Homo_sapiens:0.1,'Pan troglodytes':0.12)98:0.05,Gorilla:0.2);";

    let tree = parse_tree(source, TreeFormat::Newick).expect("Failed to parse");

    assert_eq!(tree.len(), 5);
    assert_eq!(tree.leaf_count(), 3);

    let root = tree.node(tree.root());
    let clade = tree.node(root.children()[0]);
    assert_eq!(clade.support(), Some(98.0));
    assert_eq!(clade.branch_length(), Some(0.05));

    let names: Vec<_> = tree
        .leaves()
        .map(|id| tree.node(id).name().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["Homo sapiens", "Pan troglodytes", "Gorilla"]);
}

#[test]
fn test_json_tree_defaults_missing_fields() {
    let source = r#"{"children": [{"name": "A"}, {"name": "B", "support": 40}]}"#;

    let tree = parse_tree(source, TreeFormat::Json).expect("Failed to parse");

    assert_eq!(tree.len(), 3);
    let root = tree.node(tree.root());
    assert_eq!(root.name(), None);
    assert_eq!(root.branch_length(), None);
    assert_eq!(tree.node(root.children()[1]).support(), Some(40.0));
}

#[test]
fn test_negative_branch_length_is_reported() {
    let err = parse_tree("(A:-1,B:1);", TreeFormat::Newick).unwrap_err();

    let diagnostic = &err.diagnostics()[0];
    assert_eq!(diagnostic.code(), Some(ErrorCode::E100));
    assert!(!diagnostic.labels().is_empty());
}

#[test]
fn test_gene_model_document() {
    let source = r#"{
        "intervals": [
            {"kind": "5'UTR", "start": 0, "end": 100},
            {"kind": "exon", "start": 100, "end": 400},
            {"kind": "intron", "start": 400, "end": 700},
            {"kind": "exon", "start": 700, "end": 1000}
        ],
        "min": 0,
        "max": 1000
    }"#;

    let model = parse_gene_model(source).expect("Failed to parse");

    assert_eq!(model.min(), 0);
    assert_eq!(model.max(), 1000);
    assert_eq!(model.intervals().len(), 4);
    assert_eq!(*model.intervals()[0].kind(), IntervalKind::FivePrimeUtr);
}

#[test]
fn test_overlapping_gene_model_is_rejected() {
    let source = r#"{"intervals": [
        {"kind": "exon", "start": 0, "end": 50},
        {"kind": "exon", "start": 40, "end": 90}
    ]}"#;

    let err = parse_gene_model(source).unwrap_err();
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E204));
}

#[test]
fn test_gene_model_wider_than_i64_is_rejected() {
    let source = r#"{"intervals": [
        {"kind": "exon", "start": -9000000000000000000, "end": 9000000000000000000}
    ]}"#;

    let err = parse_gene_model(source).unwrap_err();
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));
}

#[test]
fn test_fasta_alignment() {
    let source = ">seq1 first\nACGT\nAC\n\n>seq2\nAC-TAC\n";

    let alignment = parse_alignment(source, AlignmentFormat::Fasta).expect("Failed to parse");

    assert_eq!(alignment.len(), 2);
    assert_eq!(alignment.width(), 6);
    assert_eq!(alignment.sequences()[0].id(), "seq1");
    assert_eq!(alignment.sequences()[0].residues(), "ACGTAC");
}

#[test]
fn test_unequal_lengths_fail_in_both_formats() {
    let json = r#"[{"id": "a", "residues": "AC"}, {"id": "b", "residues": "ACG"}]"#;
    let fasta = ">a\nAC\n>b\nACG\n";

    let json_err = parse_alignment(json, AlignmentFormat::Json).unwrap_err();
    let fasta_err = parse_alignment(fasta, AlignmentFormat::Fasta).unwrap_err();

    assert_eq!(json_err.diagnostics()[0].code(), Some(ErrorCode::E300));
    assert_eq!(fasta_err.diagnostics()[0].code(), Some(ErrorCode::E300));
}

#[test]
fn test_empty_documents() {
    assert_eq!(
        parse_tree("   ", TreeFormat::Newick).unwrap_err().diagnostics()[0].code(),
        Some(ErrorCode::E008)
    );
    assert_eq!(
        parse_alignment("", AlignmentFormat::Json)
            .unwrap_err()
            .diagnostics()[0]
            .code(),
        Some(ErrorCode::E008)
    );
}

#[test]
fn test_error_display_includes_code() {
    let err = parse_tree("(A,B", TreeFormat::Newick).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("E007"), "unexpected message: {message}");
}
