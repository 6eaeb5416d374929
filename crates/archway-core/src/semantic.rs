//! Semantic model of an architecture document.
//!
//! These types describe *what* the architecture contains: components,
//! their typed relationships, and optional groupings. They carry no geometry
//! and no visual style; both are derived later by the layout engine.
//!
//! # Submodules
//!
//! - [`diagram`] - The document root: [`Architecture`], [`LayoutSpec`], [`LayoutKind`], [`Direction`]
//! - [`element`] - Elements: [`Node`], [`Connection`], [`Group`] and their closed type enums

pub mod diagram;
pub mod element;

pub use diagram::*;
pub use element::*;
