//! Node, connection, and group vocabulary.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{UnknownVariant, identifier::Id};

/// Free-form key/value metadata carried by a node.
///
/// Layout and rendering never inspect it.
pub type Attributes = IndexMap<String, serde_json::Value>;

/// The closed set of component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Actor,
    Service,
    Database,
    Queue,
    Cache,
    Gateway,
    Ui,
    External,
}

impl NodeKind {
    /// Type order used when nodes are ranked by kind instead of by dependencies.
    pub const CANONICAL_ORDER: [NodeKind; 8] = [
        Self::Actor,
        Self::Ui,
        Self::Gateway,
        Self::Service,
        Self::Queue,
        Self::Cache,
        Self::Database,
        Self::External,
    ];

    /// Position of this kind in [`NodeKind::CANONICAL_ORDER`].
    ///
    /// ```
    /// # use archway_core::semantic::NodeKind;
    /// assert!(NodeKind::Service.canonical_rank() < NodeKind::Database.canonical_rank());
    /// ```
    pub fn canonical_rank(self) -> usize {
        match self {
            Self::Actor => 0,
            Self::Ui => 1,
            Self::Gateway => 2,
            Self::Service => 3,
            Self::Queue => 4,
            Self::Cache => 5,
            Self::Database => 6,
            Self::External => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::Service => "service",
            Self::Database => "database",
            Self::Queue => "queue",
            Self::Cache => "cache",
            Self::Gateway => "gateway",
            Self::Ui => "ui",
            Self::External => "external",
        }
    }
}

impl FromStr for NodeKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actor" => Ok(Self::Actor),
            "service" => Ok(Self::Service),
            "database" => Ok(Self::Database),
            "queue" => Ok(Self::Queue),
            "cache" => Ok(Self::Cache),
            "gateway" => Ok(Self::Gateway),
            "ui" => Ok(Self::Ui),
            "external" => Ok(Self::External),
            _ => Err(UnknownVariant::new("node type", s)),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The closed set of connection types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    Http,
    Async,
    Query,
    Sync,
    DataFlow,
    None,
}

impl ConnectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Async => "async",
            Self::Query => "query",
            Self::Sync => "sync",
            Self::DataFlow => "data_flow",
            Self::None => "none",
        }
    }
}

impl FromStr for ConnectionKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Self::Http),
            "async" => Ok(Self::Async),
            "query" => Ok(Self::Query),
            "sync" => Ok(Self::Sync),
            "data_flow" => Ok(Self::DataFlow),
            "none" => Ok(Self::None),
            _ => Err(UnknownVariant::new("connection type", s)),
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The closed set of group types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Layer,
    Boundary,
    Cluster,
}

impl GroupKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layer => "layer",
            Self::Boundary => "boundary",
            Self::Cluster => "cluster",
        }
    }
}

impl FromStr for GroupKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "layer" => Ok(Self::Layer),
            "boundary" => Ok(Self::Boundary),
            "cluster" => Ok(Self::Cluster),
            _ => Err(UnknownVariant::new("group type", s)),
        }
    }
}

/// A component of the architecture.
///
/// A node exclusively owns its nested children; there are no back-references.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    label: String,
    attributes: Option<Attributes>,
    children: Vec<Node>,
}

impl Node {
    /// Create a leaf node.
    pub fn new(id: impl Into<Id>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            attributes: None,
            children: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Opaque passthrough metadata.
    pub fn attributes(&self) -> Option<&Attributes> {
        self.attributes.as_ref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A typed edge between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    from: Id,
    to: Id,
    kind: ConnectionKind,
    label: Option<String>,
    bidirectional: bool,
}

impl Connection {
    pub fn new(from: impl Into<Id>, to: impl Into<Id>, kind: ConnectionKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            label: None,
            bidirectional: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_bidirectional(mut self, bidirectional: bool) -> Self {
        self.bidirectional = bidirectional;
        self
    }

    pub fn from(&self) -> &Id {
        &self.from
    }

    pub fn to(&self) -> &Id {
        &self.to
    }

    pub fn kind(&self) -> ConnectionKind {
        self.kind
    }

    /// The label, if present and not blank.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.trim().is_empty())
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }
}

/// A visual grouping of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    id: Id,
    label: String,
    kind: GroupKind,
    members: Vec<Id>,
}

impl Group {
    pub fn new(id: impl Into<Id>, label: impl Into<String>, kind: GroupKind, members: Vec<Id>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            members,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Member node ids as written; some may not resolve.
    pub fn members(&self) -> &[Id] {
        &self.members
    }
}

/// Iterative pre-order walk over a node forest.
///
/// Each item pairs a node with the top-level node it belongs to. An explicit
/// stack keeps deeply nested input from exhausting the call stack.
#[derive(Debug)]
pub struct NodeWalk<'a> {
    stack: Vec<(&'a Node, &'a Node)>,
}

impl<'a> NodeWalk<'a> {
    pub fn new(roots: &'a [Node]) -> Self {
        Self {
            stack: roots.iter().rev().map(|node| (node, node)).collect(),
        }
    }
}

impl<'a> Iterator for NodeWalk<'a> {
    type Item = (&'a Node, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, root) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (child, root)));
        Some((node, root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_round_trips_names() {
        for kind in NodeKind::CANONICAL_ORDER {
            assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
        }
        assert!("lambda".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_canonical_rank_matches_order() {
        for (idx, kind) in NodeKind::CANONICAL_ORDER.iter().enumerate() {
            assert_eq!(kind.canonical_rank(), idx);
        }
    }

    #[test]
    fn test_connection_kind_data_flow_name() {
        assert_eq!(
            "data_flow".parse::<ConnectionKind>().unwrap(),
            ConnectionKind::DataFlow
        );
        assert_eq!(ConnectionKind::DataFlow.to_string(), "data_flow");
    }

    #[test]
    fn test_connection_blank_label_is_none() {
        let connection = Connection::new("a", "b", ConnectionKind::Http).with_label("   ");
        assert_eq!(connection.label(), None);
    }

    #[test]
    fn test_node_walk_pre_order_with_roots() {
        let nodes = vec![
            Node::new("platform", NodeKind::Service, "Platform").with_children(vec![
                Node::new("auth", NodeKind::Service, "Auth"),
                Node::new("billing", NodeKind::Service, "Billing")
                    .with_children(vec![Node::new("ledger", NodeKind::Database, "Ledger")]),
            ]),
            Node::new("user", NodeKind::Actor, "User"),
        ];

        let visited: Vec<(String, String)> = NodeWalk::new(&nodes)
            .map(|(node, root)| (node.id().to_string(), root.id().to_string()))
            .collect();

        assert_eq!(
            visited,
            vec![
                ("platform".to_string(), "platform".to_string()),
                ("auth".to_string(), "platform".to_string()),
                ("billing".to_string(), "platform".to_string()),
                ("ledger".to_string(), "platform".to_string()),
                ("user".to_string(), "user".to_string()),
            ]
        );
    }
}
