//! Resolved view of an architecture document.
//!
//! [`ArchitectureGraph`] flattens the node tree, resolves connection
//! endpoints against it and builds the dependency graph between top-level
//! nodes that the ranking strategies work on. Connections with an unknown
//! endpoint are dropped here, before any geometry is computed.

use std::collections::HashMap;

use log::{debug, trace};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use archway_core::{
    identifier::Id,
    semantic::{Architecture, Connection, Node},
};

use crate::diagnostic::{Diagnostics, WarningCode};

/// A node of the flattened tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeEntry<'a> {
    node: &'a Node,
    parent: Option<usize>,
    root: usize,
}

impl<'a> NodeEntry<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Entry index of the containing node, `None` for top-level nodes.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Ordinal of the top-level node this entry belongs to.
    pub fn root(&self) -> usize {
        self.root
    }
}

/// A connection whose endpoints both name a node.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedConnection<'a> {
    connection: &'a Connection,
    from: usize,
    to: usize,
}

impl<'a> ResolvedConnection<'a> {
    pub fn connection(&self) -> &'a Connection {
        self.connection
    }

    /// Entry index of the source node.
    pub fn from(&self) -> usize {
        self.from
    }

    /// Entry index of the target node.
    pub fn to(&self) -> usize {
        self.to
    }
}

/// Flattened nodes, resolved connections and the top-level dependency graph.
#[derive(Debug)]
pub struct ArchitectureGraph<'a> {
    architecture: &'a Architecture,
    entries: Vec<NodeEntry<'a>>,
    index: HashMap<Id, usize>,
    top_level: Vec<usize>,
    connections: Vec<ResolvedConnection<'a>>,
    dependencies: DiGraph<usize, usize>,
}

impl<'a> ArchitectureGraph<'a> {
    /// Resolves `architecture`, dropping dangling connections with a
    /// diagnostic for each.
    pub fn new(architecture: &'a Architecture, diagnostics: &mut Diagnostics) -> Self {
        let (entries, top_level) = flatten(architecture.nodes());
        let index: HashMap<Id, usize> = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.node.id().clone(), idx))
            .collect();

        let mut connections = Vec::with_capacity(architecture.connections().len());
        for connection in architecture.connections() {
            let from = index.get(connection.from()).copied();
            let to = index.get(connection.to()).copied();
            match (from, to) {
                (Some(from), Some(to)) => connections.push(ResolvedConnection {
                    connection,
                    from,
                    to,
                }),
                _ => {
                    let missing: Vec<String> = [(connection.from(), from), (connection.to(), to)]
                        .into_iter()
                        .filter(|(_, resolved)| resolved.is_none())
                        .map(|(id, _)| format!("`{id}`"))
                        .collect();
                    diagnostics.emit(
                        WarningCode::W001,
                        format!(
                            "connection `{}` -> `{}` dropped: unknown node {}",
                            connection.from(),
                            connection.to(),
                            missing.join(" and "),
                        ),
                    );
                }
            }
        }

        let mut dependencies = DiGraph::with_capacity(top_level.len(), connections.len());
        for ordinal in 0..top_level.len() {
            dependencies.add_node(ordinal);
        }
        for (idx, resolved) in connections.iter().enumerate() {
            let source = entries[resolved.from].root;
            let target = entries[resolved.to].root;
            if resolved.from == resolved.to {
                diagnostics.emit(
                    WarningCode::W007,
                    format!(
                        "connection `{0}` -> `{0}` ignored for ranking",
                        resolved.connection.from()
                    ),
                );
            } else if source == target {
                trace!(
                    from:% = resolved.connection.from(),
                    to:% = resolved.connection.to();
                    "Connection inside one top-level node ignored for ranking",
                );
            } else {
                dependencies.add_edge(NodeIndex::new(source), NodeIndex::new(target), idx);
            }
        }

        debug!(
            nodes_len = entries.len(),
            top_level_len = top_level.len(),
            connections_len = connections.len(),
            dependencies_len = dependencies.edge_count();
            "Architecture graph built",
        );

        Self {
            architecture,
            entries,
            index,
            top_level,
            connections,
            dependencies,
        }
    }

    pub fn architecture(&self) -> &'a Architecture {
        self.architecture
    }

    /// Every node in pre-order; parents precede their children.
    pub fn entries(&self) -> &[NodeEntry<'a>] {
        &self.entries
    }

    pub fn entry_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Number of top-level nodes.
    pub fn top_level_len(&self) -> usize {
        self.top_level.len()
    }

    /// Entry index of the top-level node with the given ordinal.
    pub fn top_level_entry(&self, ordinal: usize) -> usize {
        self.top_level[ordinal]
    }

    pub fn top_level_node(&self, ordinal: usize) -> &'a Node {
        self.entries[self.top_level[ordinal]].node
    }

    pub fn connections(&self) -> &[ResolvedConnection<'a>] {
        &self.connections
    }

    /// Top-level ordinals without incoming dependencies, in input order.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.top_level.len())
            .filter(|&ordinal| {
                self.dependencies
                    .neighbors_directed(NodeIndex::new(ordinal), Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect()
    }

    /// Top-level ordinals that `ordinal` depends on being placed before.
    pub fn successors(&self, ordinal: usize) -> impl Iterator<Item = usize> + '_ {
        self.dependencies
            .neighbors_directed(NodeIndex::new(ordinal), Direction::Outgoing)
            .map(|idx| self.dependencies[idx])
    }
}

/// Flattens a node forest in pre-order with an explicit stack.
///
/// Returns the entries and, in input order, the entry indices of the roots.
fn flatten(roots: &[Node]) -> (Vec<NodeEntry<'_>>, Vec<usize>) {
    let mut entries = Vec::new();
    let mut top_level = Vec::with_capacity(roots.len());
    let mut stack: Vec<(&Node, Option<usize>, usize)> = roots
        .iter()
        .enumerate()
        .rev()
        .map(|(ordinal, node)| (node, None, ordinal))
        .collect();

    while let Some((node, parent, root)) = stack.pop() {
        let idx = entries.len();
        if parent.is_none() {
            top_level.push(idx);
        }
        entries.push(NodeEntry { node, parent, root });
        stack.extend(
            node.children()
                .iter()
                .rev()
                .map(|child| (child, Some(idx), root)),
        );
    }

    (entries, top_level)
}
