//! Accumulates diagnostics so a loader can report every problem in one pass.

use crate::error::{DataError, Diagnostic};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns `Err` with everything collected, if anything was.
    pub fn finish(self) -> Result<(), DataError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(DataError::new(self.diagnostics))
        }
    }
}
