//! FASTA alignments.
//!
//! ```text
//! >seq1 optional description
//! ACGT-ACGT
//! ACGT
//! >seq2
//! ACGTTACGTACGA
//! ```
//!
//! The id is the header text up to the first whitespace. Residue lines may
//! wrap; blank lines and whitespace inside residue lines are ignored.

use canopy_core::{
    ModelError,
    alignment::{Alignment, Sequence},
};
use log::debug;

use crate::{
    error::{DataError, Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

struct Record {
    id: String,
    header: Span,
    residues: String,
}

/// Loads a FASTA alignment.
///
/// # Errors
///
/// Residues before the first header and blank ids are all reported together;
/// length and id conflicts point at the offending header.
pub fn parse_alignment(source: &str) -> Result<Alignment, DataError> {
    let mut records: Vec<Record> = Vec::new();
    let mut diagnostics = DiagnosticCollector::new();
    let mut orphan_reported = false;

    let mut offset = 0;
    for raw_line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();

        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let start = line_start + (raw_line.len() - raw_line.trim_start().len());
        let span = Span::new(start..start + line.len());

        if let Some(header) = line.strip_prefix('>') {
            let id = header.split_whitespace().next().unwrap_or_default();
            if id.is_empty() {
                diagnostics.emit(
                    Diagnostic::error("FASTA header has no sequence id")
                        .with_code(ErrorCode::E302)
                        .with_label(span, ErrorCode::E302.description())
                        .with_help("write the id right after `>`, e.g. `>seq1`"),
                );
            }
            records.push(Record {
                id: id.to_string(),
                header: span,
                residues: String::new(),
            });
        } else if let Some(record) = records.last_mut() {
            record
                .residues
                .extend(line.chars().filter(|c| !c.is_whitespace()));
        } else if !orphan_reported {
            orphan_reported = true;
            diagnostics.emit(
                Diagnostic::error("residues appear before the first FASTA header")
                    .with_code(ErrorCode::E009)
                    .with_label(span, ErrorCode::E009.description())
                    .with_help("start every sequence with a `>id` header line"),
            );
        }
    }
    diagnostics.finish()?;

    if records.is_empty() {
        return Err(Diagnostic::error("FASTA document contains no sequences")
            .with_code(ErrorCode::E008)
            .with_label(Span::new(0..source.len()), ErrorCode::E008.description())
            .into());
    }

    let headers: Vec<(String, Span)> = records
        .iter()
        .map(|record| (record.id.clone(), record.header))
        .collect();
    let sequences = records
        .into_iter()
        .map(|record| Sequence::new(record.id, record.residues))
        .collect();

    let alignment = Alignment::new(sequences).map_err(|err| locate(err, &headers))?;
    debug!(sequences = alignment.len(), columns = alignment.width(); "Loaded FASTA alignment");
    Ok(alignment)
}

/// Attaches header spans to an alignment validation error.
fn locate(err: ModelError, headers: &[(String, Span)]) -> Diagnostic {
    match &err {
        ModelError::UnequalSequenceLength { id, expected, .. } => {
            let mut diagnostic = Diagnostic::from(err.clone());
            if let Some(span) = header_spans(headers, id).next() {
                diagnostic = diagnostic.with_label(span, format!("expected {expected} residues"));
            }
            if let Some((_, first)) = headers.first() {
                diagnostic = diagnostic.with_secondary_label(*first, "length set by this sequence");
            }
            diagnostic
        }
        ModelError::DuplicateSequenceId { id } => {
            let spans: Vec<Span> = header_spans(headers, id).collect();
            let mut diagnostic = Diagnostic::from(err.clone());
            if let [first, second, ..] = spans.as_slice() {
                diagnostic = diagnostic
                    .with_label(*second, "duplicate id")
                    .with_secondary_label(*first, "first used here");
            }
            diagnostic
        }
        _ => Diagnostic::from(err),
    }
}

fn header_spans<'h>(headers: &'h [(String, Span)], id: &'h str) -> impl Iterator<Item = Span> + 'h {
    headers
        .iter()
        .filter(move |(header_id, _)| header_id == id)
        .map(|(_, span)| *span)
}
