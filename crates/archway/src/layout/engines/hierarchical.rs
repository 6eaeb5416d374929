//! Dependency-ranked layout engine
//!
//! Nodes without incoming dependencies form the first rank. Ranks are then
//! assigned breadth-first along outgoing dependencies, each node landing in
//! the first rank that reaches it. Nodes no root reaches (cycles hanging off
//! nothing) go into one final overflow rank. When every node has an incoming
//! dependency there is no root to start from, and nodes are ranked by type
//! instead.

use std::collections::HashSet;

use log::debug;

use archway_core::{geometry::Size, semantic::Direction};

use crate::{
    config::SpacingConfig,
    diagnostic::{Diagnostics, WarningCode},
    layout::{
        engines::{Arrangement, ComponentEngine, layered::rank_by_type},
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

    /// Assigns every top-level node to a rank.
    ///
    /// Each rank lists ordinals in input order.
    pub fn assign_ranks(
        graph: &ArchitectureGraph<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Vec<Vec<usize>> {
        let node_count = graph.top_level_len();
        if node_count == 0 {
            return Vec::new();
        }

        let roots = graph.roots();
        if roots.is_empty() {
            diagnostics.emit(
                WarningCode::W005,
                "every node has an incoming dependency, ranking nodes by type instead",
            );
            return rank_by_type(graph);
        }

        let mut ranks = Vec::new();
        let mut visited = HashSet::new();
        let mut frontier = roots;

        while !frontier.is_empty() {
            let mut rank = Vec::new();
            let mut next = Vec::new();
            for ordinal in frontier {
                if !visited.insert(ordinal) {
                    continue;
                }
                rank.push(ordinal);
                next.extend(graph.successors(ordinal).filter(|succ| !visited.contains(succ)));
            }
            if !rank.is_empty() {
                rank.sort_unstable();
                ranks.push(rank);
            }
            frontier = next;
        }

        let overflow: Vec<usize> = (0..node_count)
            .filter(|ordinal| !visited.contains(ordinal))
            .collect();
        if !overflow.is_empty() {
            debug!(overflow_len = overflow.len(); "Unreached nodes placed in overflow rank");
            ranks.push(overflow);
        }

        ranks
    }
}

impl ComponentEngine for Engine {
    fn arrange(
        &self,
        graph: &ArchitectureGraph<'_>,
        sizes: &[Size],
        diagnostics: &mut Diagnostics,
    ) -> Arrangement {
        let ranks = Self::assign_ranks(graph, diagnostics);
        let positions = place_ranks(&ranks, sizes, self.direction, self.spacing, self.padding);
        Arrangement::new(positions, ranks)
    }
}

#[cfg(test)]
mod tests {
    use archway_core::semantic::{
        Architecture, Connection, ConnectionKind, LayoutSpec, Node, NodeKind,
    };

    use super::*;

    fn ranks_of(nodes: Vec<Node>, edges: &[(&str, &str)]) -> (Vec<Vec<usize>>, Diagnostics) {
        let connections = edges
            .iter()
            .map(|(from, to)| Connection::new(*from, *to, ConnectionKind::Http))
            .collect();
        let architecture = Architecture::new(nodes, connections, Vec::new(), LayoutSpec::default());
        let mut diagnostics = Diagnostics::new();
        let graph = ArchitectureGraph::new(&architecture, &mut diagnostics);
        let ranks = Engine::assign_ranks(&graph, &mut diagnostics);
        (ranks, diagnostics)
    }

    fn service(id: &str) -> Node {
        Node::new(id, NodeKind::Service, id)
    }

    #[test]
    fn test_chain() {
        let (ranks, diagnostics) = ranks_of(
            vec![service("a"), service("b"), service("c")],
            &[("a", "b"), ("b", "c")],
        );
        assert_eq!(ranks, vec![vec![0], vec![1], vec![2]]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_first_reaching_rank_wins() {
        // a -> b -> c and a -> c: c is reached from a directly.
        let (ranks, _) = ranks_of(
            vec![service("a"), service("b"), service("c")],
            &[("a", "b"), ("b", "c"), ("a", "c")],
        );
        assert_eq!(ranks, vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_ranks_sorted_by_input_order() {
        let (ranks, _) = ranks_of(
            vec![service("root"), service("x"), service("y"), service("z")],
            &[("root", "z"), ("root", "y"), ("root", "x")],
        );
        assert_eq!(ranks, vec![vec![0], vec![1, 2, 3]]);
    }

    #[test]
    fn test_unreached_cycle_goes_to_overflow() {
        let (ranks, diagnostics) = ranks_of(
            vec![service("a"), service("b"), service("c"), service("d")],
            &[("a", "b"), ("c", "d"), ("d", "c")],
        );
        assert_eq!(ranks, vec![vec![0], vec![1], vec![2, 3]]);
        assert!(!diagnostics.contains(WarningCode::W005));
    }

    #[test]
    fn test_fully_cyclic_falls_back_to_type_order() {
        let nodes = vec![
            Node::new("db", NodeKind::Database, "DB"),
            Node::new("svc", NodeKind::Service, "Service"),
            Node::new("user", NodeKind::Actor, "User"),
        ];
        let (ranks, diagnostics) = ranks_of(nodes, &[("db", "svc"), ("svc", "user"), ("user", "db")]);

        assert_eq!(ranks, vec![vec![2], vec![1], vec![0]]);
        assert!(diagnostics.contains(WarningCode::W005));
    }

    #[test]
    fn test_self_loop_does_not_block_root() {
        let (ranks, diagnostics) = ranks_of(vec![service("a"), service("b")], &[("a", "a"), ("a", "b")]);
        assert_eq!(ranks, vec![vec![0], vec![1]]);
        assert!(diagnostics.contains(WarningCode::W007));
    }

    #[test]
    fn test_empty_graph_has_no_ranks() {
        let (ranks, diagnostics) = ranks_of(Vec::new(), &[]);
        assert!(ranks.is_empty());
        assert!(diagnostics.is_empty());
    }
}
