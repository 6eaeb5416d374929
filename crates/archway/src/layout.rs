//! Layout calculation.
//!
//! Turns a resolved [`ArchitectureGraph`] into a [`PositionedLayout`]:
//! absolute rectangles for every node, anchor points for every connection,
//! and bounding boxes for every group. Layout is a pure function of its
//! inputs; running it twice on the same document yields identical geometry.

pub mod engines;
pub mod group;
pub mod positioning;

pub use engines::EngineBuilder;

use log::{debug, info, trace};

use archway_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    semantic::{Connection, Direction, Group, LayoutKind, Node},
    style::{NodeStyle, StyleTable},
};

use crate::{
    config::LayoutConfig,
    diagnostic::{Diagnostics, WarningCode},
    layout::positioning::NodeMetrics,
    routing::{self, Route},
    structure::ArchitectureGraph,
};

/// A node with its absolute rectangle and resolved style.
#[derive(Debug, Clone)]
pub struct PositionedNode<'a> {
    node: &'a Node,
    bounds: Bounds,
    style: NodeStyle,
    label_size: Size,
    parent: Option<usize>,
    has_children: bool,
}

impl<'a> PositionedNode<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    /// Estimated size of the node's label text.
    pub fn label_size(&self) -> Size {
        self.label_size
    }

    /// Index of the containing node in [`PositionedLayout::nodes`].
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn has_children(&self) -> bool {
        self.has_children
    }
}

/// A connection with both endpoints resolved and routed.
#[derive(Debug, Clone)]
pub struct PositionedConnection<'a> {
    connection: &'a Connection,
    from: usize,
    to: usize,
    route: Route,
    label_position: Option<Point>,
}

impl<'a> PositionedConnection<'a> {
    pub fn connection(&self) -> &'a Connection {
        self.connection
    }

    /// Index of the source node in [`PositionedLayout::nodes`].
    pub fn from(&self) -> usize {
        self.from
    }

    /// Index of the target node in [`PositionedLayout::nodes`].
    pub fn to(&self) -> usize {
        self.to
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Center of the label text; `None` when the connection has no label.
    pub fn label_position(&self) -> Option<Point> {
        self.label_position
    }
}

/// A group with at least one resolved member.
#[derive(Debug, Clone)]
pub struct PositionedGroup<'a> {
    group: &'a Group,
    bounds: Bounds,
    members: Vec<usize>,
}

impl<'a> PositionedGroup<'a> {
    pub fn new(group: &'a Group, bounds: Bounds, members: Vec<usize>) -> Self {
        Self {
            group,
            bounds,
            members,
        }
    }

    pub fn group(&self) -> &'a Group {
        self.group
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Indices of the resolved members in [`PositionedLayout::nodes`].
    pub fn members(&self) -> &[usize] {
        &self.members
    }
}

/// Fully positioned diagram geometry.
#[derive(Debug, Clone)]
pub struct PositionedLayout<'a> {
    kind: LayoutKind,
    direction: Direction,
    nodes: Vec<PositionedNode<'a>>,
    connections: Vec<PositionedConnection<'a>>,
    groups: Vec<PositionedGroup<'a>>,
    ranks: Vec<Vec<Id>>,
}

impl<'a> PositionedLayout<'a> {
    /// The strategy actually used, after any fallback.
    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Every node in pre-order; parents precede their children.
    pub fn nodes(&self) -> &[PositionedNode<'a>] {
        &self.nodes
    }

    pub fn connections(&self) -> &[PositionedConnection<'a>] {
        &self.connections
    }

    pub fn groups(&self) -> &[PositionedGroup<'a>] {
        &self.groups
    }

    /// Top-level node ids per rank; rows for the grid strategy.
    pub fn ranks(&self) -> &[Vec<Id>] {
        &self.ranks
    }

    pub fn node_by_id(&self, id: &str) -> Option<&PositionedNode<'a>> {
        self.nodes.iter().find(|node| node.node.id() == id)
    }

    /// Smallest rectangle holding every node and group, if any.
    pub fn bounds(&self) -> Option<Bounds> {
        self.nodes
            .iter()
            .map(PositionedNode::bounds)
            .chain(self.groups.iter().map(PositionedGroup::bounds))
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}

/// Selects the strategy named by the document, or the default one.
fn resolve_kind(graph: &ArchitectureGraph<'_>, diagnostics: &mut Diagnostics) -> LayoutKind {
    let spec = graph.architecture().layout();
    match spec.kind() {
        Some(kind) => kind,
        None => {
            let fallback = LayoutKind::default();
            diagnostics.emit(
                WarningCode::W004,
                format!(
                    "layout type `{}` is not supported, using `{fallback}`",
                    spec.requested_kind()
                ),
            );
            fallback
        }
    }
}

/// Calculates the complete layout of `graph`.
pub fn calculate<'a>(
    graph: &ArchitectureGraph<'a>,
    config: &LayoutConfig,
    styles: &StyleTable,
    font_size: f32,
    diagnostics: &mut Diagnostics,
) -> PositionedLayout<'a> {
    let spec = graph.architecture().layout();
    let kind = resolve_kind(graph, diagnostics);
    info!(layout_kind:% = kind, direction:? = spec.direction(); "Calculating layout");

    let metrics = NodeMetrics::measure(graph, styles, font_size, diagnostics);

    let top_sizes: Vec<Size> = (0..graph.top_level_len())
        .map(|ordinal| metrics.size(graph.top_level_entry(ordinal)))
        .collect();

    let engine = EngineBuilder::new(config)
        .with_direction(spec.direction())
        .with_spacing(spec.spacing())
        .build(kind);
    let arrangement = engine.arrange(graph, &top_sizes, diagnostics);
    debug!(ranks_len = arrangement.ranks().len(); "Top-level nodes arranged");

    let mut bounds = vec![Bounds::default(); graph.entries().len()];
    for (ordinal, origin) in arrangement.positions().iter().enumerate() {
        bounds[graph.top_level_entry(ordinal)] =
            Bounds::new_from_top_left(*origin, top_sizes[ordinal]);
    }
    metrics.place_children(&mut bounds);

    let nodes: Vec<PositionedNode<'a>> = graph
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| PositionedNode {
            node: entry.node(),
            bounds: bounds[idx],
            style: metrics.style(idx).clone(),
            label_size: metrics.label_size(idx),
            parent: entry.parent(),
            has_children: !metrics.children(idx).is_empty(),
        })
        .collect();

    let connections: Vec<PositionedConnection<'a>> = graph
        .connections()
        .iter()
        .map(|resolved| {
            let route = routing::route(bounds[resolved.from()], bounds[resolved.to()]);
            let label_position = resolved
                .connection()
                .label()
                .map(|_| route.label_position(config.label_placement(), config.label_offset()));
            PositionedConnection {
                connection: resolved.connection(),
                from: resolved.from(),
                to: resolved.to(),
                route,
                label_position,
            }
        })
        .collect();

    let groups = group::bound_groups(graph, &bounds, diagnostics);

    let ranks = arrangement
        .ranks()
        .iter()
        .map(|rank| {
            rank.iter()
                .map(|&ordinal| graph.top_level_node(ordinal).id().clone())
                .collect()
        })
        .collect();

    let layout = PositionedLayout {
        kind,
        direction: spec.direction(),
        nodes,
        connections,
        groups,
        ranks,
    };

    info!(
        nodes_len = layout.nodes.len(),
        connections_len = layout.connections.len(),
        groups_len = layout.groups.len();
        "Layout calculated",
    );
    trace!(layout:?; "Positioned layout");

    layout
}
