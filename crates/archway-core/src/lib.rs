//! Archway Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Archway parser
//! and layout/render pipeline:
//!
//! - **Semantic model**: architecture documents ([`semantic`] module)
//! - **Identifiers**: reference-counted node identifiers ([`identifier::Id`])
//! - **Colors**: CSS color parsing and hex output ([`color::Color`])
//! - **Geometry**: points, sizes, bounds, insets ([`geometry`] module)
//! - **Style**: static visual tables for node and connection types ([`style`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod semantic;
pub mod style;

use thiserror::Error;

/// A string did not name any variant of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {category} `{value}`")]
pub struct UnknownVariant {
    category: &'static str,
    value: String,
}

impl UnknownVariant {
    pub fn new(category: &'static str, value: impl Into<String>) -> Self {
        Self {
            category,
            value: value.into(),
        }
    }

    /// What kind of value was expected, e.g. `"node type"`.
    pub fn category(&self) -> &'static str {
        self.category
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}
