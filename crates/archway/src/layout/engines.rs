//! Layout engine factory module
//!
//! This module selects and configures the layout strategy named by an
//! architecture document's `layout.type`. Every engine places the top-level
//! nodes only; nested nodes are positioned inside their parents afterwards.

mod grid;
mod hierarchical;
mod layered;

use archway_core::{
    geometry::{Point, Size},
    semantic::{Direction, LayoutKind, Spacing},
};

use crate::{
    config::{LayoutConfig, SpacingConfig},
    diagnostic::Diagnostics,
    structure::ArchitectureGraph,
};

/// Result of arranging the top-level nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    /// Top-left corner of each top-level node, indexed by ordinal.
    positions: Vec<Point>,
    /// Ordinals per rank, in placement order. Grid rows for the grid engine.
    ranks: Vec<Vec<usize>>,
}

impl Arrangement {
    pub fn new(positions: Vec<Point>, ranks: Vec<Vec<usize>>) -> Self {
        Self { positions, ranks }
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn ranks(&self) -> &[Vec<usize>] {
        &self.ranks
    }
}

/// Trait implemented by every layout strategy.
pub trait ComponentEngine {
    /// Arranges the top-level nodes of `graph`.
    ///
    /// - `sizes`: final size of each top-level node, indexed by ordinal.
    fn arrange(
        &self,
        graph: &ArchitectureGraph<'_>,
        sizes: &[Size],
        diagnostics: &mut Diagnostics,
    ) -> Arrangement;
}

/// Builder for creating and configuring layout engines.
///
/// Spacing requested by the document takes precedence over the configured
/// per-strategy defaults.
pub struct EngineBuilder {
    config: LayoutConfig,
    direction: Direction,
    overrides: Spacing,
}

impl EngineBuilder {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            config: config.clone(),
            direction: Direction::default(),
            overrides: Spacing::default(),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_spacing(mut self, overrides: Spacing) -> Self {
        self.overrides = overrides;
        self
    }

    /// Effective spacing for a strategy.
    pub fn spacing(&self, kind: LayoutKind) -> SpacingConfig {
        let defaults = self.config.spacing(kind);
        SpacingConfig::new(
            self.overrides.node().unwrap_or(defaults.node()),
            self.overrides.rank().unwrap_or(defaults.rank()),
        )
    }

    /// Creates the engine for `kind`.
    pub fn build(&self, kind: LayoutKind) -> Box<dyn ComponentEngine> {
        let spacing = self.spacing(kind);
        let padding = self.config.canvas_padding();
        match kind {
            LayoutKind::Hierarchical => Box::new(hierarchical::Engine::new(
                self.direction,
                spacing,
                padding,
            )),
            LayoutKind::Layered => Box::new(layered::Engine::new(self.direction, spacing, padding)),
            LayoutKind::Grid => Box::new(grid::Engine::new(spacing, padding)),
        }
    }
}
