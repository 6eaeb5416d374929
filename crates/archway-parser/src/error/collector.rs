//! Collector for accumulating diagnostics during a validation pass.

use crate::error::{SchemaDiagnostic, SchemaError};

/// Accumulates diagnostics so validation can report every violation at once.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<SchemaDiagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: SchemaDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Returns `Err` with every collected diagnostic, or `Ok(())` if none.
    pub fn finish(self) -> Result<(), SchemaError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::new(self.diagnostics))
        }
    }
}
