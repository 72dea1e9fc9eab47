//! Diagnostics for document loading.
//!
//! Every failure is a [`Diagnostic`]: an [`ErrorCode`], a message, labelled
//! byte spans into the document and optional help. One or more diagnostics
//! are returned together as a [`DataError`].
//!
//! ```
//! # use canopy_data::{Diagnostic, ErrorCode, Span};
//!
//! let diag = Diagnostic::error("sequence id `seq2` appears more than once")
//!     .with_code(ErrorCode::E301)
//!     .with_label(Span::new(40..45), "duplicate id")
//!     .with_secondary_label(Span::new(0..5), "first used here")
//!     .with_help("sequence ids must be unique within an alignment");
//! assert_eq!(diag.to_string(), "error[E301]: sequence id `seq2` appears more than once");
//! ```

mod collector;
mod data_error;
mod diagnostic;
mod error_code;
mod label;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use data_error::Result;

pub use data_error::DataError;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
