//! Error codes for schema diagnostics.
//!
//! Error codes are organized by category:
//! - `E1xx` - JSON syntax errors
//! - `E2xx` - Structural errors (wrong value kind, missing or empty fields)
//! - `E3xx` - Enum membership errors
//! - `E4xx` - Uniqueness errors

use std::fmt;

/// Error codes for categorizing schema diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Malformed JSON.
    E100,

    /// Incomplete input.
    ///
    /// The input ended before the JSON value was complete.
    E101,

    // =========================================================================
    // Structural Errors (E2xx)
    // =========================================================================
    /// Unexpected value kind, e.g. a string where an array is required.
    E200,

    /// Missing required field.
    E201,

    /// Empty string where a non-empty one is required.
    E202,

    /// Invalid number.
    ///
    /// Spacing values must be finite and non-negative.
    E203,

    // =========================================================================
    // Enum Membership Errors (E3xx)
    // =========================================================================
    /// Unknown node type.
    E300,

    /// Unknown connection type.
    E301,

    /// Unknown group type.
    E302,

    /// Unknown layout direction.
    E303,

    // =========================================================================
    // Uniqueness Errors (E4xx)
    // =========================================================================
    /// Duplicate node id.
    ///
    /// Node ids are unique across the whole document, nested nodes and nodes
    /// embedded in groups included.
    E400,

    /// Duplicate group id.
    E401,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E201").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
            ErrorCode::E400 => "E400",
            ErrorCode::E401 => "E401",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed json",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E200 => "unexpected value kind",
            ErrorCode::E201 => "missing required field",
            ErrorCode::E202 => "empty string",
            ErrorCode::E203 => "invalid number",
            ErrorCode::E300 => "unknown node type",
            ErrorCode::E301 => "unknown connection type",
            ErrorCode::E302 => "unknown group type",
            ErrorCode::E303 => "unknown layout direction",
            ErrorCode::E400 => "duplicate node id",
            ErrorCode::E401 => "duplicate group id",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E201.to_string(), "E201");
        assert_eq!(ErrorCode::E400.to_string(), "E400");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E201.description(), "missing required field");
        assert_eq!(ErrorCode::E300.description(), "unknown node type");
    }
}
