//! Archway document validation
//!
//! This crate turns an untrusted architecture document into the validated
//! [`Architecture`] model of `archway-core`. Validation covers value kinds,
//! required fields, enum membership and id uniqueness. Connection and group
//! references are *not* resolved here; dangling ones are handled later by the
//! layout engine.
//!
//! # Example
//!
//! ```
//! let architecture = archway_parser::parse(r#"{
//!     "nodes": [
//!         {"id": "user", "type": "actor", "label": "User"},
//!         {"id": "api", "type": "service", "label": "API"}
//!     ],
//!     "connections": [{"from": "user", "to": "api", "type": "http"}]
//! }"#).unwrap();
//!
//! assert_eq!(architecture.nodes().len(), 2);
//! ```

pub mod error;
mod source;
mod validate;

use archway_core::semantic::Architecture;
use serde_json::Value;

pub use error::SchemaError;
pub use source::ArchitectureSource;

/// Parses and validates a JSON architecture document.
///
/// # Errors
///
/// Returns a [`SchemaError`] holding every syntax or schema violation found.
pub fn parse(input: &str) -> Result<Architecture, SchemaError> {
    validate::parse_str(input)
}

/// Validates an already parsed JSON value.
///
/// # Errors
///
/// Returns a [`SchemaError`] holding every schema violation found.
pub fn validate(value: &Value) -> Result<Architecture, SchemaError> {
    validate::validate_value(value)
}

/// Checks that node and group ids of an in-memory document are unique.
///
/// # Errors
///
/// Returns a [`SchemaError`] with one E400/E401 diagnostic per duplicate.
pub fn check_uniqueness(architecture: &Architecture) -> Result<(), SchemaError> {
    validate::check_uniqueness(architecture)
}
