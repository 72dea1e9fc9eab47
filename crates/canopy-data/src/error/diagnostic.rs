//! The core diagnostic type.

use std::fmt;

use canopy_core::ModelError;

use crate::{
    error::{error_code::ErrorCode, label::Label},
    span::Span,
};

/// A single error with an optional code, labelled spans and help text.
///
/// ```text
/// error[E300]: sequence `seq3` has length 9, expected 10
///   --> msa.fasta:7:1
///    |
///  7 | >seq3
///    | ^^^^^ declared here
///    |
///    = help: every sequence in an alignment must have the same number of columns
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl From<ModelError> for Diagnostic {
    /// Wraps a validation failure; callers add spans when they know them.
    fn from(err: ModelError) -> Self {
        let code = ErrorCode::for_model_error(&err);
        let help = match code {
            ErrorCode::E100 => Some("branch lengths must be finite and non-negative"),
            ErrorCode::E101 => Some("every node except the root needs exactly one parent"),
            ErrorCode::E203 | ErrorCode::E204 => {
                Some("list intervals in ascending, non-overlapping order")
            }
            ErrorCode::E205 => Some("add at least one interval or give explicit `min` and `max`"),
            ErrorCode::E300 => {
                Some("every sequence in an alignment must have the same number of columns")
            }
            ErrorCode::E301 => Some("sequence ids must be unique within an alignment"),
            _ => None,
        };
        let diagnostic = Diagnostic::error(err.to_string()).with_code(code);
        match help {
            Some(help) => diagnostic.with_help(help),
            None => diagnostic,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E001]: message" or "error: message"
        write!(f, "error")?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("test error");
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("sequence id `a` appears more than once")
            .with_code(ErrorCode::E301)
            .with_label(Span::new(20..22), "duplicate id")
            .with_secondary_label(Span::new(0..2), "first used here")
            .with_help("rename one of the sequences");

        assert_eq!(diag.code(), Some(ErrorCode::E301));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.help(), Some("rename one of the sequences"));
    }

    #[test]
    fn test_diagnostic_display() {
        let with_code = Diagnostic::error("unexpected `)`").with_code(ErrorCode::E006);
        assert_eq!(with_code.to_string(), "error[E006]: unexpected `)`");
        assert_eq!(Diagnostic::error("plain").to_string(), "error: plain");
    }

    #[test]
    fn test_from_model_error() {
        let diag = Diagnostic::from(ModelError::UnequalSequenceLength {
            id: "b".to_string(),
            expected: 2,
            found: 3,
        });
        assert_eq!(diag.code(), Some(ErrorCode::E300));
        assert!(diag.message().contains("`b`"));
        assert!(diag.help().is_some());
    }
}
