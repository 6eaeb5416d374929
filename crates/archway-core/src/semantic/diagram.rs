//! The architecture document root and its layout request.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    UnknownVariant,
    semantic::element::{Connection, Group, Node, NodeWalk},
};

/// Layout strategy selector.
///
/// The names match the `layout.type` strings of an architecture document.
///
/// # Variants
///
/// - `Hierarchical` - dependency-ranked layout (default)
/// - `Grid` - rank-free row-major grid
/// - `Layered` - ranks by canonical node type order
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    Hierarchical,
    Grid,
    Layered,
}

impl LayoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hierarchical => "hierarchical",
            Self::Grid => "grid",
            Self::Layered => "layered",
        }
    }
}

impl FromStr for LayoutKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hierarchical" => Ok(Self::Hierarchical),
            "grid" => Ok(Self::Grid),
            "layered" => Ok(Self::Layered),
            _ => Err(UnknownVariant::new("layout type", s)),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Orientation of the rank axis.
///
/// `TB`/`BT` stack ranks vertically, `LR`/`RL` horizontally. `BT` and `RL`
/// mirror the rank axis so the last rank sits nearest the origin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Direction {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl Direction {
    /// Returns true when ranks are stacked along the y axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::TB | Self::BT)
    }

    /// Returns true when the rank axis is mirrored.
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BT | Self::RL)
    }
}

impl FromStr for Direction {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TB" => Ok(Self::TB),
            "BT" => Ok(Self::BT),
            "LR" => Ok(Self::LR),
            "RL" => Ok(Self::RL),
            _ => Err(UnknownVariant::new("direction", s)),
        }
    }
}

/// Spacing overrides requested by the document. Unset values fall back to
/// the configured defaults of the selected strategy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Spacing {
    node: Option<f32>,
    rank: Option<f32>,
}

impl Spacing {
    pub fn new(node: Option<f32>, rank: Option<f32>) -> Self {
        Self { node, rank }
    }

    /// Gap between neighbouring nodes inside one rank.
    pub fn node(&self) -> Option<f32> {
        self.node
    }

    /// Gap between consecutive ranks.
    pub fn rank(&self) -> Option<f32> {
        self.rank
    }
}

/// The `layout` section of an architecture document.
///
/// The requested strategy is kept verbatim: an unrecognized name is not a
/// schema violation, it is resolved later by the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSpec {
    requested_kind: String,
    direction: Direction,
    spacing: Spacing,
}

impl LayoutSpec {
    pub fn new(requested_kind: impl Into<String>, direction: Direction, spacing: Spacing) -> Self {
        Self {
            requested_kind: requested_kind.into(),
            direction,
            spacing,
        }
    }

    /// The strategy name exactly as the producer wrote it.
    pub fn requested_kind(&self) -> &str {
        &self.requested_kind
    }

    /// The strategy, if the requested name is one this crate implements.
    pub fn kind(&self) -> Option<LayoutKind> {
        self.requested_kind.parse().ok()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self::new(
            LayoutKind::default().as_str(),
            Direction::default(),
            Spacing::default(),
        )
    }
}

/// A validated architecture document.
///
/// Produced once at ingress and immutable afterwards. Node ids are unique
/// across the whole tree; connection and group references are *not*
/// guaranteed to resolve, the layout engine drops the dangling ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Architecture {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    groups: Vec<Group>,
    layout: LayoutSpec,
}

impl Architecture {
    pub fn new(
        nodes: Vec<Node>,
        connections: Vec<Connection>,
        groups: Vec<Group>,
        layout: LayoutSpec,
    ) -> Self {
        Self {
            nodes,
            connections,
            groups,
            layout,
        }
    }

    /// Top-level nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    /// Walks every node of the document, nested ones included.
    pub fn walk(&self) -> NodeWalk<'_> {
        NodeWalk::new(&self.nodes)
    }
}
