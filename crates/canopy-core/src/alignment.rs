//! Aligned sequences for the MSA grid.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::ModelError;

/// One row of an alignment: an identifier and its residues, gaps included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    id: String,
    residues: String,
}

impl Sequence {
    pub fn new(id: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            residues: residues.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn residues(&self) -> &str {
        &self.residues
    }

    /// Number of residue symbols (characters, not bytes).
    pub fn len(&self) -> usize {
        self.residues.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// A validated set of equal-length sequences with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Alignment {
    sequences: Vec<Sequence>,
    width: usize,
}

impl Alignment {
    /// # Errors
    ///
    /// See [`Alignment::width_of`].
    pub fn new(sequences: Vec<Sequence>) -> Result<Self, ModelError> {
        let width = Self::width_of(&sequences)?;
        Ok(Self { sequences, width })
    }

    /// Validates a slice of sequences and returns the shared column count.
    ///
    /// An empty slice has width 0.
    ///
    /// # Errors
    ///
    /// - [`ModelError::EmptySequenceId`] for a blank id.
    /// - [`ModelError::DuplicateSequenceId`] when an id repeats.
    /// - [`ModelError::UnequalSequenceLength`] naming the first sequence whose
    ///   length differs from the first one.
    pub fn width_of(sequences: &[Sequence]) -> Result<usize, ModelError> {
        let Some(first) = sequences.first() else {
            return Ok(0);
        };
        let expected = first.len();

        let mut seen = HashSet::with_capacity(sequences.len());
        for (index, sequence) in sequences.iter().enumerate() {
            if sequence.id.trim().is_empty() {
                return Err(ModelError::EmptySequenceId { index });
            }
            if !seen.insert(sequence.id.as_str()) {
                return Err(ModelError::DuplicateSequenceId {
                    id: sequence.id.clone(),
                });
            }
            let found = sequence.len();
            if found != expected {
                return Err(ModelError::UnequalSequenceLength {
                    id: sequence.id.clone(),
                    expected,
                    found,
                });
            }
        }
        Ok(expected)
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Number of alignment columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn into_sequences(self) -> Vec<Sequence> {
        self.sequences
    }
}
