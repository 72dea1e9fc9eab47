//! JSON documents for trees, gene models and alignments.
//!
//! ```json
//! {"name": "root", "children": [{"name": "A", "branchLength": 0.1}, {"name": "B"}]}
//! {"intervals": [{"kind": "exon", "start": 0, "end": 120}], "min": 0, "max": 500}
//! [{"id": "seq1", "residues": "AC-GT"}, {"id": "seq2", "sequence": "ACAGT"}]
//! ```
//!
//! Trees nest one JSON object per node, so the JSON loader is bounded by
//! `serde_json`'s nesting limit; very deep trees should use Newick.

use canopy_core::{
    alignment::{Alignment, Sequence},
    gene_model::{GeneModel, SequenceInterval},
    tree::{NodeData, Tree, TreeBuilder},
};
use log::debug;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{DataError, Diagnostic, ErrorCode},
    span::Span,
};

#[derive(Debug, Deserialize)]
struct TreeDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "branchLength")]
    branch_length: Option<f64>,
    #[serde(default)]
    support: Option<f64>,
    #[serde(default)]
    children: Vec<TreeDocument>,
}

impl TreeDocument {
    /// Splits the document into this node's payload and its children.
    fn into_parts(self) -> (NodeData, Vec<TreeDocument>) {
        let mut data = NodeData::new();
        data.set_name(self.name);
        data.set_branch_length(self.branch_length);
        data.set_support(self.support);
        (data, self.children)
    }
}

#[derive(Debug, Deserialize)]
struct GeneModelDocument {
    intervals: Vec<IntervalDocument>,
    #[serde(default)]
    min: Option<i64>,
    #[serde(default)]
    max: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct IntervalDocument {
    #[serde(alias = "type")]
    kind: String,
    start: i64,
    end: i64,
}

#[derive(Debug, Deserialize)]
struct SequenceDocument {
    id: String,
    #[serde(alias = "sequence")]
    residues: String,
}

/// Loads a nested JSON tree.
pub fn parse_tree(source: &str) -> Result<Tree, DataError> {
    let document: TreeDocument = deserialize(source, "tree")?;

    let (root_data, root_children) = document.into_parts();
    let mut builder = TreeBuilder::new(root_data);
    let mut pending = vec![(builder.root(), root_children)];
    while let Some((parent, children)) = pending.pop() {
        for child in children {
            let (data, grandchildren) = child.into_parts();
            let id = builder.add_child(parent, data);
            if !grandchildren.is_empty() {
                pending.push((id, grandchildren));
            }
        }
    }

    let tree = builder.build().map_err(Diagnostic::from)?;
    debug!(nodes = tree.len(), leaves = tree.leaf_count(); "Loaded JSON tree");
    Ok(tree)
}

/// Loads a gene model; a missing `min`/`max` is derived from the intervals.
pub fn parse_gene_model(source: &str) -> Result<GeneModel, DataError> {
    let document: GeneModelDocument = deserialize(source, "gene model")?;

    let intervals: Vec<SequenceInterval> = document
        .intervals
        .into_iter()
        .map(|interval| SequenceInterval::new(interval.kind.as_str(), interval.start, interval.end))
        .collect();

    let min = match document.min {
        Some(min) => Some(min),
        None => intervals.first().map(SequenceInterval::start),
    };
    let max = match document.max {
        Some(max) => Some(max),
        None => intervals.iter().map(SequenceInterval::end).max(),
    };
    let model = match (min, max) {
        (Some(min), Some(max)) => GeneModel::new(intervals, min, max),
        _ => GeneModel::spanning(intervals),
    }
    .map_err(Diagnostic::from)?;

    debug!(intervals = model.intervals().len(), min = model.min(), max = model.max(); "Loaded JSON gene model");
    Ok(model)
}

/// Loads an array of `{id, residues}` objects.
pub fn parse_alignment(source: &str) -> Result<Alignment, DataError> {
    let documents: Vec<SequenceDocument> = deserialize(source, "alignment")?;
    let sequences = documents
        .into_iter()
        .map(|doc| Sequence::new(doc.id, doc.residues))
        .collect();

    let alignment = Alignment::new(sequences).map_err(Diagnostic::from)?;
    debug!(sequences = alignment.len(), columns = alignment.width(); "Loaded JSON alignment");
    Ok(alignment)
}

fn deserialize<T: DeserializeOwned>(source: &str, what: &str) -> Result<T, Diagnostic> {
    if source.trim().is_empty() {
        return Err(Diagnostic::error(format!("{what} document is empty"))
            .with_code(ErrorCode::E008)
            .with_label(Span::new(0..source.len()), ErrorCode::E008.description()));
    }

    serde_json::from_str(source).map_err(|err| {
        let offset = offset_at(source, err.line(), err.column());
        let end = (offset + 1).min(source.len());
        let mut diagnostic = Diagnostic::error(format!("invalid {what} document: {err}"))
            .with_code(ErrorCode::E001)
            .with_label(Span::new(offset..end), ErrorCode::E001.description());
        if err.to_string().contains("recursion limit") {
            diagnostic = diagnostic.with_help("the tree nests too deeply for JSON; use Newick");
        }
        diagnostic
    })
}

/// Converts `serde_json`'s 1-based line/column into a byte offset.
fn offset_at(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}
