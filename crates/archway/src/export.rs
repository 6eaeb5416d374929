//! Export of positioned layouts.
//!
//! This module provides the [`Exporter`] trait, the last stage of the
//! pipeline:
//!
//! ```text
//! Architecture document
//!     ↓ validate (archway-parser)
//! Architecture
//!     ↓ structure
//! ArchitectureGraph
//!     ↓ layout
//! PositionedLayout
//!     ↓ export (this module)
//! Document
//! ```
//!
//! # Available Backends
//!
//! - [`excalidraw`] - whiteboard scene output via [`excalidraw::ExcalidrawBuilder`]

pub mod context;
pub mod excalidraw;

use crate::{error::ArchwayError, layout::PositionedLayout};

/// Abstraction for export backends.
pub trait Exporter {
    /// The value produced for one layout.
    type Output;

    /// Converts a positioned layout into the backend's output.
    ///
    /// # Errors
    ///
    /// Returns [`ArchwayError`] if the layout cannot be expressed in the
    /// target format.
    fn export_layout(&mut self, layout: &PositionedLayout<'_>) -> Result<Self::Output, ArchwayError>;
}
