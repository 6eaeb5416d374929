//! Type-ranked layout engine
//!
//! Nodes are ranked by their type in canonical order (actor, ui, gateway,
//! service, queue, cache, database, external), regardless of connections.

use archway_core::{
    geometry::Size,
    semantic::{Direction, NodeKind},
};

use crate::{
    config::SpacingConfig,
    diagnostic::Diagnostics,
    layout::{
        engines::{Arrangement, ComponentEngine},
        positioning::place_ranks,
    },
    structure::ArchitectureGraph,
};

pub struct Engine {
    direction: Direction,
    spacing: SpacingConfig,
    padding: f32,
}

impl Engine {
    pub fn new(direction: Direction, spacing: SpacingConfig, padding: f32) -> Self {
        Self {
            direction,
            spacing,
            padding,
        }
    }
}

impl ComponentEngine for Engine {
    fn arrange(
        &self,
        graph: &ArchitectureGraph<'_>,
        sizes: &[Size],
        _diagnostics: &mut Diagnostics,
    ) -> Arrangement {
        let ranks = rank_by_type(graph);
        let positions = place_ranks(&ranks, sizes, self.direction, self.spacing, self.padding);
        Arrangement::new(positions, ranks)
    }
}

/// One rank per node type present, in canonical type order; input order
/// inside each rank. Types without nodes produce no rank.
pub(super) fn rank_by_type(graph: &ArchitectureGraph<'_>) -> Vec<Vec<usize>> {
    let mut ranks = vec![Vec::new(); NodeKind::CANONICAL_ORDER.len()];
    for ordinal in 0..graph.top_level_len() {
        let kind = graph.top_level_node(ordinal).kind();
        ranks[kind.canonical_rank()].push(ordinal);
    }
    ranks.retain(|rank| !rank.is_empty());
    ranks
}
