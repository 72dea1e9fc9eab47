//! Validation errors for the domain models.
//!
//! Malformed input is never repaired: constructors reject it with a
//! [`ModelError`] that names the offending node, interval or sequence.

use thiserror::Error;

/// Errors raised while constructing a [`Tree`](crate::tree::Tree),
/// [`GeneModel`](crate::gene_model::GeneModel) or
/// [`Alignment`](crate::alignment::Alignment).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("tree node {node} refers to unknown child index {child}")]
    UnknownNode { node: String, child: usize },

    #[error("tree node {node} has more than one parent")]
    MultipleParents { node: String },

    #[error("tree contains a cycle through node {node}")]
    CyclicTree { node: String },

    #[error("tree node {node} is not reachable from the root")]
    UnreachableNode { node: String },

    #[error("tree node {node} has invalid branch length {value}")]
    InvalidBranchLength { node: String, value: f64 },

    #[error("gene model domain [{min}, {max}] is empty or inverted")]
    InvalidDomain { min: i64, max: i64 },

    #[error("gene model domain [{min}, {max}] is wider than 64-bit coordinates can measure")]
    DomainTooWide { min: i64, max: i64 },

    #[error("interval #{index} ({kind}) has start {start} after end {end}")]
    InvertedInterval {
        index: usize,
        kind: String,
        start: i64,
        end: i64,
    },

    #[error("interval #{index} ({kind}) [{start}, {end}] lies outside the domain [{min}, {max}]")]
    IntervalOutOfDomain {
        index: usize,
        kind: String,
        start: i64,
        end: i64,
        min: i64,
        max: i64,
    },

    #[error("interval #{index} starts at {start}, before the previous interval start {previous_start}")]
    UnsortedIntervals {
        index: usize,
        start: i64,
        previous_start: i64,
    },

    #[error("interval #{index} starts at {start}, overlapping the previous interval ending at {previous_end}")]
    OverlappingIntervals {
        index: usize,
        start: i64,
        previous_end: i64,
    },

    #[error("gene model has no intervals")]
    EmptyGeneModel,

    #[error("sequence `{id}` has length {found}, expected {expected}")]
    UnequalSequenceLength {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("sequence id `{id}` appears more than once")]
    DuplicateSequenceId { id: String },

    #[error("sequence #{index} has an empty id")]
    EmptySequenceId { index: usize },
}
