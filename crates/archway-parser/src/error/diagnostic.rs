//! The diagnostic type for schema violations.

use std::fmt;

use crate::error::{ErrorCode, FieldPath};

/// Line and column of a syntax error in the JSON text, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    line: usize,
    column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Byte offset of this location in `source`, clamped to its length.
    ///
    /// ```
    /// # use archway_parser::error::Location;
    /// let source = "{\n  \"nodes\": x\n}";
    /// assert_eq!(Location::new(2, 12).offset_in(source), 13);
    /// ```
    pub fn offset_in(&self, source: &str) -> usize {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(self.line.saturating_sub(1))
            .map(str::len)
            .sum();
        (line_start + self.column.saturating_sub(1)).min(source.len())
    }
}

/// A single schema violation.
///
/// Carries an error code, a message, the field path of the offending value,
/// and for syntax errors the position in the JSON text.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDiagnostic {
    code: ErrorCode,
    message: String,
    path: FieldPath,
    location: Option<Location>,
    help: Option<String>,
}

impl SchemaDiagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>, path: FieldPath) -> Self {
        Self {
            code,
            message: message.into(),
            path,
            location: None,
            help: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Path of the offending value; the root path for syntax errors.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]", self.code)?;
        match self.location {
            Some(location) => write!(f, " at line {} column {}", location.line, location.column)?,
            None if !self.path.is_root() => write!(f, " at {}", self.path)?,
            None => {}
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for SchemaDiagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_accessors() {
        let diag = SchemaDiagnostic::new(
            ErrorCode::E201,
            "missing required field `id`",
            FieldPath::root().key("nodes").index(0),
        )
        .with_help("every node needs an id");

        assert_eq!(diag.code(), ErrorCode::E201);
        assert_eq!(diag.message(), "missing required field `id`");
        assert_eq!(diag.help(), Some("every node needs an id"));
        assert!(diag.location().is_none());
    }

    #[test]
    fn test_display_with_location() {
        let diag = SchemaDiagnostic::new(ErrorCode::E100, "expected value", FieldPath::root())
            .with_location(Location::new(3, 7));
        assert_eq!(diag.to_string(), "error[E100] at line 3 column 7: expected value");
    }

    #[test]
    fn test_display_at_root_omits_path() {
        let diag = SchemaDiagnostic::new(ErrorCode::E200, "expected an object", FieldPath::root());
        assert_eq!(diag.to_string(), "error[E200]: expected an object");
    }

    #[test]
    fn test_location_offset_first_line() {
        assert_eq!(Location::new(1, 1).offset_in("[1, 2]"), 0);
        assert_eq!(Location::new(1, 99).offset_in("[1, 2]"), 6);
    }
}
