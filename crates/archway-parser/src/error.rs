//! Schema diagnostics for architecture documents.
//!
//! Every violation found while validating a document becomes a
//! [`SchemaDiagnostic`] naming an [`ErrorCode`] and the [`FieldPath`] of the
//! offending value. Validation does not stop at the first problem: all
//! diagnostics of one pass are returned together in a [`SchemaError`].
//!
//! # Example
//!
//! ```
//! # use archway_parser::error::{ErrorCode, FieldPath, SchemaDiagnostic};
//! let path = FieldPath::root().key("nodes").index(2).key("type");
//! let diag = SchemaDiagnostic::new(ErrorCode::E300, "unknown node type `lambda`", path)
//!     .with_help("expected one of: actor, service, database, queue, cache, gateway, ui, external");
//!
//! assert_eq!(diag.path().to_string(), "nodes[2].type");
//! assert_eq!(diag.to_string(), "error[E300] at nodes[2].type: unknown node type `lambda`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod field_path;
mod schema_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::{Location, SchemaDiagnostic};
pub use error_code::ErrorCode;
pub use field_path::{FieldPath, PathSegment};
pub use schema_error::SchemaError;
