//! Producers of architecture documents.

use archway_core::semantic::Architecture;
use serde_json::Value;

use crate::{SchemaError, validate};

/// Anything that yields a schema-valid [`Architecture`] or fails.
///
/// The layout pipeline only depends on this capability, not on how the
/// document was obtained.
///
/// ```
/// use archway_parser::ArchitectureSource;
///
/// let json = r#"{"nodes": [{"id": "api", "type": "service"}]}"#;
/// let value: serde_json::Value = serde_json::from_str(json).unwrap();
///
/// let from_text = json.produce().unwrap();
/// let from_value = value.produce().unwrap();
/// assert_eq!(from_text, from_value);
/// ```
pub trait ArchitectureSource {
    /// Produces the validated document.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when the source is not schema-valid.
    fn produce(self) -> Result<Architecture, SchemaError>;
}

impl ArchitectureSource for &str {
    fn produce(self) -> Result<Architecture, SchemaError> {
        validate::parse_str(self)
    }
}

impl ArchitectureSource for &String {
    fn produce(self) -> Result<Architecture, SchemaError> {
        validate::parse_str(self)
    }
}

impl ArchitectureSource for &Value {
    fn produce(self) -> Result<Architecture, SchemaError> {
        validate::validate_value(self)
    }
}

impl ArchitectureSource for Value {
    fn produce(self) -> Result<Architecture, SchemaError> {
        validate::validate_value(&self)
    }
}

/// A model built in memory only needs its id uniqueness re-checked; the
/// closed enums are enforced by the types themselves.
impl ArchitectureSource for Architecture {
    fn produce(self) -> Result<Architecture, SchemaError> {
        validate::check_uniqueness(&self)?;
        Ok(self)
    }
}
