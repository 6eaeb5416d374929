//! Non-fatal diagnostics reported alongside a generated document.
//!
//! Dangling references, unknown layout strategies and similar data issues
//! never abort the pipeline. Each one is recorded as a [`Diagnostic`] with a
//! [`WarningCode`], logged at `warn` level, and returned to the caller next
//! to the document.

use std::fmt;

use log::warn;

/// Codes for recoverable conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// A connection endpoint names no node; the connection was dropped.
    W001,
    /// A group member names no node; the member was dropped.
    W002,
    /// A group has no resolvable members and was omitted.
    W003,
    /// The requested layout strategy is unknown; the default was used.
    W004,
    /// Every node has an incoming dependency; nodes were ranked by type.
    W005,
    /// A node type has no style entry; the service style was used.
    W006,
    /// A connection from a node to itself does not affect ranking.
    W007,
}

impl WarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::W001 => "W001",
            WarningCode::W002 => "W002",
            WarningCode::W003 => "W003",
            WarningCode::W004 => "W004",
            WarningCode::W005 => "W005",
            WarningCode::W006 => "W006",
            WarningCode::W007 => "W007",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WarningCode::W001 => "dangling connection",
            WarningCode::W002 => "dangling group member",
            WarningCode::W003 => "empty group omitted",
            WarningCode::W004 => "unknown layout type",
            WarningCode::W005 => "cyclic dependencies",
            WarningCode::W006 => "node style fallback",
            WarningCode::W007 => "self-loop ignored for ranking",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recoverable condition met while producing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: WarningCode,
    message: String,
}

impl Diagnostic {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> WarningCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning[{}]: {}", self.code, self.message)
    }
}

/// Ordered collection of diagnostics for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic and logs it.
    pub fn emit(&mut self, code: WarningCode, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(code, message);
        warn!(code = diagnostic.code.as_str(); "{}", diagnostic.message);
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Returns true if any diagnostic carries `code`.
    pub fn contains(&self, code: WarningCode) -> bool {
        self.entries.iter().any(|diagnostic| diagnostic.code == code)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::new(WarningCode::W001, "connection `a` -> `ghost` dropped");
        assert_eq!(
            diagnostic.to_string(),
            "warning[W001]: connection `a` -> `ghost` dropped"
        );
    }

    #[test]
    fn test_diagnostics_keep_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.emit(WarningCode::W004, "first");
        diagnostics.emit(WarningCode::W003, "second");

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.contains(WarningCode::W003));
        assert!(!diagnostics.contains(WarningCode::W001));
        let messages: Vec<&str> = diagnostics.iter().map(Diagnostic::message).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
