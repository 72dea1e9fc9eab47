//! Gene models: ordered, labelled sub-intervals of a genomic region.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::error::ModelError;

/// The biological role of a sub-interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntervalKind {
    Exon,
    Intron,
    Utr,
    FivePrimeUtr,
    ThreePrimeUtr,
    Cds,
    /// Any tag not recognised above, kept verbatim.
    Other(String),
}

impl IntervalKind {
    /// Returns the canonical tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exon => "exon",
            Self::Intron => "intron",
            Self::Utr => "utr",
            Self::FivePrimeUtr => "five_prime_utr",
            Self::ThreePrimeUtr => "three_prime_utr",
            Self::Cds => "cds",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this kind is an untranslated region of any flavour.
    pub fn is_utr(&self) -> bool {
        matches!(self, Self::Utr | Self::FivePrimeUtr | Self::ThreePrimeUtr)
    }
}

impl FromStr for IntervalKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "exon" => Self::Exon,
            "intron" => Self::Intron,
            "utr" => Self::Utr,
            "5'utr" | "5utr" | "five_prime_utr" => Self::FivePrimeUtr,
            "3'utr" | "3utr" | "three_prime_utr" => Self::ThreePrimeUtr,
            "cds" => Self::Cds,
            _ => Self::Other(s.trim().to_string()),
        };
        Ok(kind)
    }
}

impl From<&str> for IntervalKind {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IntervalKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A closed genomic range `[start, end]` tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceInterval {
    kind: IntervalKind,
    start: i64,
    end: i64,
}

impl SequenceInterval {
    /// Creates an interval. Ordering of `start` and `end` is checked by
    /// [`GeneModel::new`].
    pub fn new(kind: impl Into<IntervalKind>, start: i64, end: i64) -> Self {
        Self {
            kind: kind.into(),
            start,
            end,
        }
    }

    pub fn kind(&self) -> &IntervalKind {
        &self.kind
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Length in genomic units (`end - start`), saturating at the `i64` bounds.
    pub fn len(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A validated gene model over the coordinate domain `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneModel {
    intervals: Vec<SequenceInterval>,
    min: i64,
    max: i64,
}

impl GeneModel {
    /// Creates a gene model over an explicit domain.
    ///
    /// # Errors
    ///
    /// Fails when the domain is empty, inverted or its length overflows `i64`,
    /// or when any interval is
    /// inverted, leaves the domain, starts before its predecessor or overlaps
    /// it. Touching endpoints (`prev.end == next.start`) are allowed.
    pub fn new(intervals: Vec<SequenceInterval>, min: i64, max: i64) -> Result<Self, ModelError> {
        if min >= max {
            return Err(ModelError::InvalidDomain { min, max });
        }
        if max.checked_sub(min).is_none() {
            return Err(ModelError::DomainTooWide { min, max });
        }

        let mut previous: Option<&SequenceInterval> = None;
        for (index, interval) in intervals.iter().enumerate() {
            if interval.start > interval.end {
                return Err(ModelError::InvertedInterval {
                    index,
                    kind: interval.kind.to_string(),
                    start: interval.start,
                    end: interval.end,
                });
            }
            if interval.start < min || interval.end > max {
                return Err(ModelError::IntervalOutOfDomain {
                    index,
                    kind: interval.kind.to_string(),
                    start: interval.start,
                    end: interval.end,
                    min,
                    max,
                });
            }
            if let Some(prev) = previous {
                if interval.start < prev.start {
                    return Err(ModelError::UnsortedIntervals {
                        index,
                        start: interval.start,
                        previous_start: prev.start,
                    });
                }
                if interval.start < prev.end {
                    return Err(ModelError::OverlappingIntervals {
                        index,
                        start: interval.start,
                        previous_end: prev.end,
                    });
                }
            }
            previous = Some(interval);
        }

        Ok(Self {
            intervals,
            min,
            max,
        })
    }

    /// Creates a gene model whose domain spans its own intervals.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyGeneModel`] without intervals, plus every
    /// error of [`GeneModel::new`].
    pub fn spanning(intervals: Vec<SequenceInterval>) -> Result<Self, ModelError> {
        let first = intervals.first().ok_or(ModelError::EmptyGeneModel)?;
        let min = first.start;
        let max = intervals
            .iter()
            .map(SequenceInterval::end)
            .max()
            .unwrap_or(min);
        Self::new(intervals, min, max)
    }

    pub fn intervals(&self) -> &[SequenceInterval] {
        &self.intervals
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Length of the coordinate domain (always positive, never overflows).
    pub fn span(&self) -> i64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exon(start: i64, end: i64) -> SequenceInterval {
        SequenceInterval::new(IntervalKind::Exon, start, end)
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(IntervalKind::from("Exon"), IntervalKind::Exon);
        assert_eq!(IntervalKind::from("INTRON"), IntervalKind::Intron);
        assert_eq!(IntervalKind::from("5'UTR"), IntervalKind::FivePrimeUtr);
        assert_eq!(
            IntervalKind::from("three_prime_utr"),
            IntervalKind::ThreePrimeUtr
        );
        assert_eq!(
            IntervalKind::from("promoter"),
            IntervalKind::Other("promoter".to_string())
        );
        assert!(IntervalKind::FivePrimeUtr.is_utr());
        assert!(!IntervalKind::Cds.is_utr());
    }

    #[test]
    fn test_valid_model_with_touching_intervals() {
        let model = GeneModel::new(
            vec![
                exon(0, 100),
                SequenceInterval::new("intron", 100, 400),
                exon(400, 500),
            ],
            0,
            1000,
        )
        .unwrap();
        assert_eq!(model.intervals().len(), 3);
        assert_eq!(model.span(), 1000);
    }

    #[test]
    fn test_invalid_domain() {
        assert_eq!(
            GeneModel::new(vec![], 10, 10).unwrap_err(),
            ModelError::InvalidDomain { min: 10, max: 10 }
        );
    }

    #[test]
    fn test_domain_too_wide() {
        let min = -9_000_000_000_000_000_000;
        let max = 9_000_000_000_000_000_000;
        assert_eq!(
            GeneModel::new(vec![exon(min, max)], min, max).unwrap_err(),
            ModelError::DomainTooWide { min, max }
        );

        let widest = GeneModel::new(vec![], i64::MIN, -1).unwrap();
        assert_eq!(widest.span(), i64::MAX);
    }

    #[test]
    fn test_unvalidated_interval_len_saturates() {
        assert_eq!(exon(i64::MIN, i64::MAX).len(), i64::MAX);
        assert_eq!(exon(10, 25).len(), 15);
    }

    #[test]
    fn test_inverted_interval() {
        let err = GeneModel::new(vec![exon(50, 10)], 0, 100).unwrap_err();
        assert!(matches!(err, ModelError::InvertedInterval { index: 0, .. }));
    }

    #[test]
    fn test_interval_outside_domain() {
        let err = GeneModel::new(vec![exon(50, 150)], 0, 100).unwrap_err();
        assert!(matches!(err, ModelError::IntervalOutOfDomain { .. }));
    }

    #[test]
    fn test_unsorted_intervals() {
        let err = GeneModel::new(vec![exon(50, 60), exon(10, 20)], 0, 100).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnsortedIntervals {
                index: 1,
                start: 10,
                previous_start: 50
            }
        );
    }

    #[test]
    fn test_overlapping_intervals() {
        let err = GeneModel::new(vec![exon(10, 60), exon(50, 70)], 0, 100).unwrap_err();
        assert_eq!(
            err,
            ModelError::OverlappingIntervals {
                index: 1,
                start: 50,
                previous_end: 60
            }
        );
    }

    #[test]
    fn test_spanning_derives_domain() {
        let model = GeneModel::spanning(vec![exon(120, 200), exon(300, 450)]).unwrap();
        assert_eq!(model.min(), 120);
        assert_eq!(model.max(), 450);
        assert_eq!(
            GeneModel::spanning(vec![]).unwrap_err(),
            ModelError::EmptyGeneModel
        );
    }
}
