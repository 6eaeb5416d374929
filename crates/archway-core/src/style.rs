//! Static visual tables.
//!
//! Visual style is looked up purely from an element's type; the producer of
//! an architecture document never supplies style. Every node of the same
//! [`NodeKind`](crate::semantic::NodeKind) therefore renders identically.
//!
//! # Overview
//!
//! - [`StrokeStyle`], [`FillStyle`], [`Arrowhead`] - document-level enumerations
//! - [`NodeStyle`] / [`StyleTable`] - shape, default size and colors per node type
//! - [`ConnectionStyle`] - stroke color, dash pattern and arrowheads per connection type
//! - [`GroupStyle`] - box outline per group type

mod connection;
mod group;
mod node;
mod stroke;

pub use connection::ConnectionStyle;
pub use group::GroupStyle;
pub use node::{NodeStyle, ShapeKind, StyleTable};
pub use stroke::{Arrowhead, FillStyle, StrokeStyle};
