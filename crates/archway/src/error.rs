//! Error types for Archway operations.
//!
//! This module provides the main error type [`ArchwayError`]. Only
//! conditions that prevent a document from being produced at all are
//! errors; recoverable data issues are reported as
//! [`Diagnostic`](crate::diagnostic::Diagnostic)s instead.

use std::io;

use thiserror::Error;

use archway_parser::SchemaError;

/// The main error type for Archway operations.
#[derive(Debug, Error)]
pub enum ArchwayError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document violates the schema. Holds every violation found.
    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
