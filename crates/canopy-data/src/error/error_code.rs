//! Error codes for document diagnostics.
//!
//! Codes are grouped by the stage that reports them:
//! - `E0xx` - Syntax errors (JSON, Newick, FASTA)
//! - `E1xx` - Tree structure errors
//! - `E2xx` - Gene model errors
//! - `E3xx` - Alignment errors

use std::fmt;

use canopy_core::ModelError;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// The JSON text is malformed or does not match the document schema.
    E001,

    /// A character that cannot start any Newick token.
    E002,

    /// A quoted Newick label was opened but never closed.
    E003,

    /// A `[` comment was opened but never closed.
    E004,

    /// A branch length or support value is not a number.
    E005,

    /// A token appeared where the grammar does not allow it.
    E006,

    /// The document ended before the tree was complete.
    E007,

    /// The document contains no data.
    E008,

    /// FASTA residues appeared before the first `>` header.
    E009,

    // =========================================================================
    // Tree Errors (E1xx)
    // =========================================================================
    /// A branch length is negative or not finite.
    E100,

    /// Parent/child links do not form a single rooted tree.
    E101,

    // =========================================================================
    // Gene Model Errors (E2xx)
    // =========================================================================
    /// The coordinate domain is empty, inverted or too wide to measure.
    E200,

    /// An interval starts after it ends.
    E201,

    /// An interval lies outside the coordinate domain.
    E202,

    /// Intervals are not sorted by start.
    E203,

    /// Two intervals overlap.
    E204,

    /// The gene model has no intervals and no explicit domain.
    E205,

    // =========================================================================
    // Alignment Errors (E3xx)
    // =========================================================================
    /// Sequences differ in length.
    E300,

    /// Two sequences share an id.
    E301,

    /// A sequence has a blank id.
    E302,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E006 => "E006",
            ErrorCode::E007 => "E007",
            ErrorCode::E008 => "E008",
            ErrorCode::E009 => "E009",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
        }
    }

    /// Returns a short description, used as the default label text.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid JSON document",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E003 => "unterminated quoted label",
            ErrorCode::E004 => "unterminated comment",
            ErrorCode::E005 => "invalid number",
            ErrorCode::E006 => "unexpected token",
            ErrorCode::E007 => "incomplete input",
            ErrorCode::E008 => "empty document",
            ErrorCode::E009 => "residues before header",
            ErrorCode::E100 => "invalid branch length",
            ErrorCode::E101 => "malformed tree",
            ErrorCode::E200 => "invalid domain",
            ErrorCode::E201 => "inverted interval",
            ErrorCode::E202 => "interval outside domain",
            ErrorCode::E203 => "unsorted intervals",
            ErrorCode::E204 => "overlapping intervals",
            ErrorCode::E205 => "empty gene model",
            ErrorCode::E300 => "unequal sequence length",
            ErrorCode::E301 => "duplicate sequence id",
            ErrorCode::E302 => "empty sequence id",
        }
    }

    /// The code reported for a model validation failure.
    pub fn for_model_error(err: &ModelError) -> Self {
        match err {
            ModelError::InvalidBranchLength { .. } => ErrorCode::E100,
            ModelError::UnknownNode { .. }
            | ModelError::MultipleParents { .. }
            | ModelError::CyclicTree { .. }
            | ModelError::UnreachableNode { .. } => ErrorCode::E101,
            ModelError::InvalidDomain { .. } | ModelError::DomainTooWide { .. } => {
                ErrorCode::E200
            }
            ModelError::InvertedInterval { .. } => ErrorCode::E201,
            ModelError::IntervalOutOfDomain { .. } => ErrorCode::E202,
            ModelError::UnsortedIntervals { .. } => ErrorCode::E203,
            ModelError::OverlappingIntervals { .. } => ErrorCode::E204,
            ModelError::EmptyGeneModel => ErrorCode::E205,
            ModelError::UnequalSequenceLength { .. } => ErrorCode::E300,
            ModelError::DuplicateSequenceId { .. } => ErrorCode::E301,
            ModelError::EmptySequenceId { .. } => ErrorCode::E302,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E300.to_string(), "E300");
    }

    #[test]
    fn test_model_error_mapping() {
        assert_eq!(
            ErrorCode::for_model_error(&ModelError::CyclicTree {
                node: "#1".to_string()
            }),
            ErrorCode::E101
        );
        assert_eq!(
            ErrorCode::for_model_error(&ModelError::EmptyGeneModel),
            ErrorCode::E205
        );
        assert_eq!(
            ErrorCode::for_model_error(&ModelError::DuplicateSequenceId { id: "a".to_string() }),
            ErrorCode::E301
        );
    }
}
