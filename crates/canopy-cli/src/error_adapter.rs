//! Turns a [`CanopyError`] into miette reports for the terminal.
//!
//! A [`CanopyError::Data`] may carry several diagnostics (e.g. two orphaned
//! FASTA lines and a length mismatch). Each becomes its own [`Report`] with
//! the document source attached, so the graphical handler draws a labeled
//! snippet per problem. Every other variant becomes a single report tagged
//! with a `canopy::*` code.

use miette::{LabeledSpan, MietteDiagnostic, Report, SourceSpan};

use canopy::CanopyError;
use canopy_data::{Diagnostic, Label, Span};

/// Builds a report for one document diagnostic, with `src` as its source.
pub fn diagnostic_report(diag: &Diagnostic, src: &str) -> Report {
    let mut report =
        MietteDiagnostic::new(diag.message()).with_labels(diag.labels().iter().map(labeled_span));
    if let Some(code) = diag.code() {
        report = report.with_code(code.to_string());
    }
    if let Some(help) = diag.help() {
        report = report.with_help(help);
    }

    Report::new(report).with_source_code(src.to_string())
}

/// Builds a report for an error without source positions.
pub fn error_report(err: &CanopyError) -> Report {
    let code = match err {
        CanopyError::Io(_) => "canopy::io",
        CanopyError::Data { .. } => "canopy::data",
        CanopyError::Layout(_) => "canopy::layout",
        CanopyError::Export(_) => "canopy::export",
    };
    Report::new(MietteDiagnostic::new(err.to_string()).with_code(code))
}

/// Converts `err` into the reports to print, in document order.
pub fn to_reports(err: &CanopyError) -> Vec<Report> {
    match err {
        CanopyError::Data { err: data_err, src } if !data_err.diagnostics().is_empty() => data_err
            .diagnostics()
            .iter()
            .map(|diag| diagnostic_report(diag, src))
            .collect(),
        _ => vec![error_report(err)],
    }
}

fn labeled_span(label: &Label) -> LabeledSpan {
    let message = Some(label.message().to_string());
    let span = to_source_span(label.span());
    if label.is_primary() {
        LabeledSpan::new_primary_with_span(message, span)
    } else {
        LabeledSpan::new_with_span(message, span)
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    (span.start(), span.len()).into()
}

#[cfg(test)]
mod tests {
    use canopy_data::{DataError, ErrorCode};
    use miette::Diagnostic as _;

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("unclosed parenthesis")
            .with_code(ErrorCode::E007)
            .with_label(Span::new(0..1), "opened here")
            .with_help("add a matching `)`");
        let err = CanopyError::new_data_error(DataError::from(diag), "(A,B;");

        let reports = to_reports(&err);
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert_eq!(report.to_string(), "unclosed parenthesis");
        assert_eq!(report.code().unwrap().to_string(), "E007");
        assert_eq!(report.help().unwrap().to_string(), "add a matching `)`");
        assert!(report.source_code().is_some());
    }

    #[test]
    fn test_one_report_per_diagnostic() {
        let diags = vec![
            Diagnostic::error("residues before the first header")
                .with_code(ErrorCode::E300)
                .with_label(Span::new(0..4), "orphan"),
            Diagnostic::error("sequence length differs")
                .with_code(ErrorCode::E301)
                .with_label(Span::new(10..14), "3 residues")
                .with_help("pad with gaps"),
        ];
        let err = CanopyError::new_data_error(DataError::from(diags), "ACGT\n>a\nACG\n");

        let messages: Vec<String> = to_reports(&err).iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            ["residues before the first header", "sequence length differs"]
        );
    }

    #[test]
    fn test_non_data_error() {
        let err = CanopyError::Io(std::io::Error::other("disk on fire"));

        let reports = to_reports(&err);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].to_string(), "I/O error: disk on fire");
        assert_eq!(reports[0].code().unwrap().to_string(), "canopy::io");
        assert!(reports[0].source_code().is_none());
    }

    #[test]
    fn test_primary_flag_on_labels() {
        let diag = Diagnostic::error("overlapping intervals")
            .with_label(Span::new(0..5), "this interval")
            .with_secondary_label(Span::new(10..15), "overlaps this one");

        let report = diagnostic_report(&diag, "some source code");
        let labels: Vec<LabeledSpan> = report.labels().unwrap().collect();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("this interval"));
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].offset(), 10);
    }
}
