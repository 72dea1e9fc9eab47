//! # Canopy Data
//!
//! Loaders that turn document text into validated Canopy models:
//!
//! - trees from nested JSON or Newick,
//! - gene models from JSON,
//! - alignments from JSON or FASTA.
//!
//! Every failure is reported as a [`DataError`] holding [`Diagnostic`]s with an
//! [`ErrorCode`] and byte [`Span`]s into the source, ready for a graphical
//! report.
//!
//! ## Usage
//!
//! ```
//! # use canopy_data::{parse_tree, DataError, TreeFormat};
//!
//! fn main() -> Result<(), DataError> {
//!     let tree = parse_tree("((A:0.1,B:0.2)90:0.05,C:0.3);", TreeFormat::Newick)?;
//!     assert_eq!(tree.leaf_count(), 3);
//!     Ok(())
//! }
//! ```

mod error;
mod fasta;
mod json;
mod newick;
mod span;

use std::{ffi::OsStr, fmt, path::Path, str::FromStr};

use canopy_core::{alignment::Alignment, gene_model::GeneModel, tree::Tree};

pub use error::{DataError, Diagnostic, ErrorCode, Label};
pub use span::Span;

/// Text formats accepted for trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeFormat {
    #[default]
    Json,
    Newick,
}

impl TreeFormat {
    /// Picks a format from the file extension, then from the first
    /// non-blank character (`{` means JSON).
    pub fn detect(path: Option<&Path>, source: &str) -> Self {
        let by_extension = path
            .and_then(|path| path.extension())
            .and_then(OsStr::to_str)
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                "json" => Some(Self::Json),
                "nwk" | "newick" | "tre" | "tree" | "nh" => Some(Self::Newick),
                _ => None,
            });
        by_extension.unwrap_or_else(|| match source.trim_start().chars().next() {
            Some('{') => Self::Json,
            _ => Self::Newick,
        })
    }
}

impl FromStr for TreeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "newick" | "nwk" => Ok(Self::Newick),
            _ => Err(format!(
                "invalid tree format `{s}`, valid values: json, newick"
            )),
        }
    }
}

impl fmt::Display for TreeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Newick => write!(f, "Newick"),
        }
    }
}

/// Text formats accepted for alignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignmentFormat {
    #[default]
    Json,
    Fasta,
}

impl AlignmentFormat {
    /// Picks a format from the file extension, then from the first
    /// non-blank character (`>` means FASTA).
    pub fn detect(path: Option<&Path>, source: &str) -> Self {
        let by_extension = path
            .and_then(|path| path.extension())
            .and_then(OsStr::to_str)
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                "json" => Some(Self::Json),
                "fa" | "fas" | "fasta" | "fna" | "faa" | "afa" => Some(Self::Fasta),
                _ => None,
            });
        by_extension.unwrap_or_else(|| match source.trim_start().chars().next() {
            Some('>') => Self::Fasta,
            _ => Self::Json,
        })
    }
}

impl FromStr for AlignmentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "fasta" | "fa" => Ok(Self::Fasta),
            _ => Err(format!(
                "invalid alignment format `{s}`, valid values: json, fasta"
            )),
        }
    }
}

impl fmt::Display for AlignmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Fasta => write!(f, "FASTA"),
        }
    }
}

/// Loads a tree document.
///
/// # Errors
///
/// Returns a [`DataError`] for syntax errors and for trees that fail
/// validation (e.g. negative branch lengths).
pub fn parse_tree(source: &str, format: TreeFormat) -> Result<Tree, DataError> {
    match format {
        TreeFormat::Json => json::parse_tree(source),
        TreeFormat::Newick => newick::parse_tree(source),
    }
}

/// Loads a gene model document (`{intervals, min?, max?}`).
///
/// # Errors
///
/// Returns a [`DataError`] for malformed JSON and for unsorted, overlapping
/// or out-of-domain intervals.
pub fn parse_gene_model(source: &str) -> Result<GeneModel, DataError> {
    json::parse_gene_model(source)
}

/// Loads an alignment document.
///
/// # Errors
///
/// Returns a [`DataError`] for syntax errors, unequal sequence lengths and
/// duplicate or blank ids.
pub fn parse_alignment(source: &str, format: AlignmentFormat) -> Result<Alignment, DataError> {
    match format {
        AlignmentFormat::Json => json::parse_alignment(source),
        AlignmentFormat::Fasta => fasta::parse_alignment(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_format_detection() {
        assert_eq!(
            TreeFormat::detect(Some(Path::new("t.nwk")), "{"),
            TreeFormat::Newick
        );
        assert_eq!(
            TreeFormat::detect(Some(Path::new("t.txt")), "  {\"name\": 1}"),
            TreeFormat::Json
        );
        assert_eq!(TreeFormat::detect(None, "(A,B);"), TreeFormat::Newick);
    }

    #[test]
    fn test_alignment_format_detection() {
        assert_eq!(
            AlignmentFormat::detect(Some(Path::new("msa.FASTA")), "["),
            AlignmentFormat::Fasta
        );
        assert_eq!(AlignmentFormat::detect(None, "\n>a\nAC"), AlignmentFormat::Fasta);
        assert_eq!(AlignmentFormat::detect(None, "[]"), AlignmentFormat::Json);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("Newick".parse::<TreeFormat>().unwrap(), TreeFormat::Newick);
        assert!("xml".parse::<TreeFormat>().is_err());
        assert_eq!("fasta".parse::<AlignmentFormat>().unwrap(), AlignmentFormat::Fasta);
    }

    #[test]
    fn test_same_tree_from_both_formats() {
        let newick = parse_tree("((A:1,B:2):1,C:3);", TreeFormat::Newick).unwrap();
        let json = parse_tree(
            r#"{"children": [
                {"branchLength": 1, "children": [
                    {"name": "A", "branchLength": 1},
                    {"name": "B", "branchLength": 2}]},
                {"name": "C", "branchLength": 3}]}"#,
            TreeFormat::Json,
        )
        .unwrap();

        assert_eq!(newick.len(), json.len());
        for ((_, a), (_, b)) in newick.iter().zip(json.iter()) {
            assert_eq!(a.data(), b.data());
            assert_eq!(a.children(), b.children());
        }
    }
}
