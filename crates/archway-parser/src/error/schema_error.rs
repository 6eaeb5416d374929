//! The error returned when a document fails validation.

use std::fmt;

use crate::error::SchemaDiagnostic;

/// Error type for document validation.
///
/// Wraps every diagnostic found in one validation pass; never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    diagnostics: Vec<SchemaDiagnostic>,
}

impl SchemaError {
    pub fn new(diagnostics: Vec<SchemaDiagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[SchemaDiagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{first}")?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}

impl From<SchemaDiagnostic> for SchemaError {
    fn from(diagnostic: SchemaDiagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, FieldPath};

    #[test]
    fn test_display_single() {
        let err: SchemaError =
            SchemaDiagnostic::new(ErrorCode::E201, "missing required field `nodes`", FieldPath::root())
                .into();
        assert_eq!(err.to_string(), "error[E201]: missing required field `nodes`");
    }

    #[test]
    fn test_display_multiple() {
        let err = SchemaError::new(vec![
            SchemaDiagnostic::new(ErrorCode::E300, "first", FieldPath::root().key("nodes")),
            SchemaDiagnostic::new(ErrorCode::E300, "second", FieldPath::root().key("nodes")),
            SchemaDiagnostic::new(ErrorCode::E300, "third", FieldPath::root().key("nodes")),
        ]);
        assert_eq!(err.to_string(), "error[E300] at nodes: first (+2 more)");
        assert_eq!(err.diagnostics().len(), 3);
    }
}
