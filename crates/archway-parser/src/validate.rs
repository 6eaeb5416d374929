//! Schema validation of JSON architecture documents.
//!
//! The validator walks a `serde_json::Value` and builds the semantic model in
//! a single pass, emitting a diagnostic for every violation it meets instead
//! of stopping at the first. Nested nodes are visited with an explicit stack.

use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
};

use log::{debug, trace};
use serde_json::{Map, Value};

use archway_core::{
    UnknownVariant,
    identifier::Id,
    semantic::{
        Architecture, Attributes, Connection, ConnectionKind, Direction, Group, GroupKind,
        LayoutKind, LayoutSpec, Node, NodeKind, Spacing,
    },
};

use crate::error::{
    DiagnosticCollector, ErrorCode, FieldPath, Location, SchemaDiagnostic, SchemaError,
};

const NODE_TYPES: &str = "actor, ui, gateway, service, queue, cache, database, external";
const CONNECTION_TYPES: &str = "http, async, query, sync, data_flow, none";
const GROUP_TYPES: &str = "layer, boundary, cluster";
const DIRECTIONS: &str = "TB, BT, LR, RL";

type Object = Map<String, Value>;

/// Parses JSON text and validates it.
pub fn parse_str(input: &str) -> Result<Architecture, SchemaError> {
    let value: Value = serde_json::from_str(input).map_err(syntax_diagnostic)?;
    validate_value(&value)
}

/// Validates an already parsed JSON value.
pub fn validate_value(value: &Value) -> Result<Architecture, SchemaError> {
    let Some(root) = value.as_object() else {
        return Err(SchemaDiagnostic::new(
            ErrorCode::E200,
            format!(
                "expected the document to be an object, found {}",
                value_kind(value)
            ),
            FieldPath::root(),
        )
        .into());
    };

    let mut validator = Validator::default();
    let architecture = validator.document(root);
    validator.diagnostics.finish()?;

    debug!(
        nodes_len = architecture.nodes().len(),
        connections_len = architecture.connections().len(),
        groups_len = architecture.groups().len();
        "Validated architecture document",
    );
    trace!(architecture:?; "Validated architecture");

    Ok(architecture)
}

/// Re-checks id uniqueness of a document built in memory.
///
/// Documents produced by [`validate_value`] always pass; this guards
/// architectures assembled programmatically.
pub fn check_uniqueness(architecture: &Architecture) -> Result<(), SchemaError> {
    let mut diagnostics = DiagnosticCollector::new();

    let mut node_ids = HashSet::new();
    for (node, _) in architecture.walk() {
        if !node_ids.insert(node.id()) {
            diagnostics.emit(SchemaDiagnostic::new(
                ErrorCode::E400,
                format!("duplicate node id `{}`", node.id()),
                FieldPath::root().key("nodes"),
            ));
        }
    }

    let mut group_ids = HashSet::new();
    for (idx, group) in architecture.groups().iter().enumerate() {
        if !group_ids.insert(group.id()) {
            diagnostics.emit(SchemaDiagnostic::new(
                ErrorCode::E401,
                format!("duplicate group id `{}`", group.id()),
                FieldPath::root().key("groups").index(idx).key("id"),
            ));
        }
    }

    diagnostics.finish()
}

fn syntax_diagnostic(err: serde_json::Error) -> SchemaDiagnostic {
    let code = if err.is_eof() {
        ErrorCode::E101
    } else {
        ErrorCode::E100
    };
    // serde_json appends " at line L column C" to the message; the location is
    // carried separately.
    let full = err.to_string();
    let message = full
        .rsplit_once(" at line ")
        .map_or(full.as_str(), |(message, _)| message)
        .to_string();

    let diagnostic = SchemaDiagnostic::new(code, message, FieldPath::root());
    if err.line() == 0 {
        diagnostic
    } else {
        diagnostic.with_location(Location::new(err.line(), err.column()))
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Fields of a node whose own properties all validated.
struct NodeFields {
    id: Id,
    kind: NodeKind,
    label: String,
    attributes: Option<Attributes>,
}

/// A node visited by the forest walk, waiting for its children.
struct NodeDraft {
    fields: Option<NodeFields>,
    parent: Option<usize>,
    children: Vec<Node>,
}

#[derive(Default)]
struct Validator {
    diagnostics: DiagnosticCollector,
    node_ids: HashMap<String, FieldPath>,
    group_ids: HashMap<String, FieldPath>,
}

impl Validator {
    fn document(&mut self, root: &Object) -> Architecture {
        let path = FieldPath::root();

        let mut nodes = match self.required(root, "nodes", &path) {
            Some(value) => {
                let nodes_path = path.key("nodes");
                match self.expect_array(value, &nodes_path) {
                    Some(items) => self.node_forest(
                        items
                            .iter()
                            .enumerate()
                            .map(|(idx, item)| (item, nodes_path.index(idx)))
                            .collect(),
                    ),
                    None => Vec::new(),
                }
            }
            None => Vec::new(),
        };

        let connections = self.connections(root, &path);

        let mut embedded = Vec::new();
        let groups = self.groups(root, &path, &mut embedded);
        nodes.extend(embedded);

        let layout = self.layout(root, &path);

        Architecture::new(nodes, connections, groups, layout)
    }

    /// Validates a forest of node objects, returning the well-formed roots in
    /// input order.
    fn node_forest(&mut self, roots: Vec<(&Value, FieldPath)>) -> Vec<Node> {
        let mut drafts: Vec<NodeDraft> = Vec::new();
        let mut stack: Vec<(&Value, FieldPath, Option<usize>)> = roots
            .into_iter()
            .rev()
            .map(|(value, path)| (value, path, None))
            .collect();

        while let Some((value, path, parent)) = stack.pop() {
            let index = drafts.len();
            let (fields, children) = self.node_fields(value, &path);
            drafts.push(NodeDraft {
                fields,
                parent,
                children: Vec::new(),
            });

            if let Some(children) = children {
                let children_path = path.key("children");
                stack.extend(
                    children
                        .iter()
                        .enumerate()
                        .rev()
                        .map(|(idx, child)| (child, children_path.index(idx), Some(index))),
                );
            }
        }

        // Drafts are in pre-order, so every parent precedes its children and
        // popping from the back always finishes a node before its parent.
        let mut forest = Vec::new();
        while let Some(draft) = drafts.pop() {
            let Some(fields) = draft.fields else {
                continue;
            };
            let mut children = draft.children;
            children.reverse();

            let mut node = Node::new(fields.id, fields.kind, fields.label).with_children(children);
            if let Some(attributes) = fields.attributes {
                node = node.with_attributes(attributes);
            }

            match draft.parent {
                Some(parent) => drafts[parent].children.push(node),
                None => forest.push(node),
            }
        }
        forest.reverse();
        forest
    }

    fn node_fields<'v>(
        &mut self,
        value: &'v Value,
        path: &FieldPath,
    ) -> (Option<NodeFields>, Option<&'v Vec<Value>>) {
        let Some(object) = self.expect_object(value, path, "a node object") else {
            return (None, None);
        };

        let id = self.required_str(object, "id", path);
        if let Some(id) = id {
            self.register_node_id(id, path.key("id"));
        }
        let kind = self.required_enum::<NodeKind>(object, "type", path, ErrorCode::E300, NODE_TYPES);
        let label = self.optional_string(object, "label", path);

        let attributes = self.optional(object, "attributes").and_then(|value| {
            self.expect_object(value, &path.key("attributes"), "an object")
                .map(|map| {
                    map.iter()
                        .map(|(key, value)| (key.clone(), value.clone()))
                        .collect::<Attributes>()
                })
        });

        let children = self
            .optional(object, "children")
            .and_then(|value| self.expect_array(value, &path.key("children")));

        let fields = match (id, kind) {
            (Some(id), Some(kind)) => Some(NodeFields {
                id: Id::new(id),
                kind,
                label: label.unwrap_or(id).to_string(),
                attributes,
            }),
            _ => None,
        };
        (fields, children)
    }

    fn connections(&mut self, root: &Object, path: &FieldPath) -> Vec<Connection> {
        let path = path.key("connections");
        let Some(items) = self
            .optional(root, "connections")
            .and_then(|value| self.expect_array(value, &path))
        else {
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| self.connection(item, &path.index(idx)))
            .collect()
    }

    fn connection(&mut self, value: &Value, path: &FieldPath) -> Option<Connection> {
        let object = self.expect_object(value, path, "a connection object")?;

        let from = self.required_str(object, "from", path);
        let to = self.required_str(object, "to", path);
        let kind = self.required_enum::<ConnectionKind>(
            object,
            "type",
            path,
            ErrorCode::E301,
            CONNECTION_TYPES,
        );
        let label = self.optional_string(object, "label", path);
        let bidirectional = self.optional_bool(object, "bidirectional", path);

        let mut connection = Connection::new(from?, to?, kind?)
            .with_bidirectional(bidirectional.unwrap_or(false));
        if let Some(label) = label {
            connection = connection.with_label(label);
        }
        Some(connection)
    }

    fn groups(&mut self, root: &Object, path: &FieldPath, embedded: &mut Vec<Node>) -> Vec<Group> {
        let path = path.key("groups");
        let Some(items) = self
            .optional(root, "groups")
            .and_then(|value| self.expect_array(value, &path))
        else {
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| self.group(item, &path.index(idx), embedded))
            .collect()
    }

    fn group(&mut self, value: &Value, path: &FieldPath, embedded: &mut Vec<Node>) -> Option<Group> {
        let object = self.expect_object(value, path, "a group object")?;

        let id = self.required_str(object, "id", path);
        if let Some(id) = id {
            self.register_group_id(id, path.key("id"));
        }
        let label = self.optional_string(object, "label", path);
        let kind = self.required_enum::<GroupKind>(object, "type", path, ErrorCode::E302, GROUP_TYPES);

        let mut members = Vec::new();
        for key in ["members", "nodes"] {
            let list_path = path.key(key);
            let Some(items) = self
                .optional(object, key)
                .and_then(|value| self.expect_array(value, &list_path))
            else {
                continue;
            };

            for (idx, item) in items.iter().enumerate() {
                let item_path = list_path.index(idx);
                match item {
                    Value::String(_) if key == "members" => {
                        if let Some(member) = self.expect_str(item, &item_path) {
                            members.push(Id::new(member));
                        }
                    }
                    Value::Object(_) => {
                        let nodes = self.node_forest(vec![(item, item_path)]);
                        members.extend(nodes.iter().map(|node| node.id().clone()));
                        embedded.extend(nodes);
                    }
                    other => {
                        let expected = if key == "members" {
                            "a node id or a node object"
                        } else {
                            "a node object"
                        };
                        self.diagnostics.emit(SchemaDiagnostic::new(
                            ErrorCode::E200,
                            format!("expected {expected}, found {}", value_kind(other)),
                            item_path,
                        ));
                    }
                }
            }
        }

        let id = id?;
        Some(Group::new(id, label.unwrap_or(id), kind?, members))
    }

    fn layout(&mut self, root: &Object, path: &FieldPath) -> LayoutSpec {
        let path = path.key("layout");
        let Some(object) = self
            .optional(root, "layout")
            .and_then(|value| self.expect_object(value, &path, "an object"))
        else {
            return LayoutSpec::default();
        };

        // Unrecognized strategy names are kept verbatim; the layout engine
        // substitutes the default strategy for them.
        let requested_kind = self
            .optional(object, "type")
            .and_then(|value| self.expect_str(value, &path.key("type")))
            .unwrap_or(LayoutKind::default().as_str());

        let direction = match self.optional(object, "direction") {
            Some(_) => self
                .required_enum::<Direction>(object, "direction", &path, ErrorCode::E303, DIRECTIONS)
                .unwrap_or_default(),
            None => Direction::default(),
        };

        let spacing_path = path.key("spacing");
        let spacing = match self.optional(object, "spacing") {
            None => Spacing::default(),
            Some(value) if value.is_number() => {
                Spacing::new(self.spacing_value(value, &spacing_path), None)
            }
            Some(Value::Object(spacing)) => {
                let node = self
                    .optional(spacing, "node")
                    .and_then(|value| self.spacing_value(value, &spacing_path.key("node")));
                let rank = self
                    .optional(spacing, "rank")
                    .and_then(|value| self.spacing_value(value, &spacing_path.key("rank")));
                Spacing::new(node, rank)
            }
            Some(other) => {
                self.diagnostics.emit(SchemaDiagnostic::new(
                    ErrorCode::E200,
                    format!("expected a number or an object, found {}", value_kind(other)),
                    spacing_path,
                ));
                Spacing::default()
            }
        };

        LayoutSpec::new(requested_kind, direction, spacing)
    }

    fn spacing_value(&mut self, value: &Value, path: &FieldPath) -> Option<f32> {
        let Some(number) = value.as_f64() else {
            self.diagnostics.emit(SchemaDiagnostic::new(
                ErrorCode::E200,
                format!("expected a number, found {}", value_kind(value)),
                path.clone(),
            ));
            return None;
        };
        if !number.is_finite() || number < 0.0 || number > f64::from(f32::MAX) {
            self.diagnostics.emit(
                SchemaDiagnostic::new(
                    ErrorCode::E203,
                    format!("invalid spacing `{number}`"),
                    path.clone(),
                )
                .with_help("spacing must be a finite, non-negative number"),
            );
            return None;
        }
        Some(number as f32)
    }

    fn register_node_id(&mut self, id: &str, path: FieldPath) {
        if let Some(first) = self.node_ids.get(id) {
            let diagnostic = SchemaDiagnostic::new(
                ErrorCode::E400,
                format!("duplicate node id `{id}`"),
                path,
            )
            .with_help(format!("first defined at {first}"));
            self.diagnostics.emit(diagnostic);
        } else {
            self.node_ids.insert(id.to_string(), path);
        }
    }

    fn register_group_id(&mut self, id: &str, path: FieldPath) {
        if let Some(first) = self.group_ids.get(id) {
            let diagnostic = SchemaDiagnostic::new(
                ErrorCode::E401,
                format!("duplicate group id `{id}`"),
                path,
            )
            .with_help(format!("first defined at {first}"));
            self.diagnostics.emit(diagnostic);
        } else {
            self.group_ids.insert(id.to_string(), path);
        }
    }

    /// A member that is present and not `null`.
    fn optional<'v>(&self, object: &'v Object, key: &str) -> Option<&'v Value> {
        object.get(key).filter(|value| !value.is_null())
    }

    fn required<'v>(&mut self, object: &'v Object, key: &str, path: &FieldPath) -> Option<&'v Value> {
        let value = self.optional(object, key);
        if value.is_none() {
            self.diagnostics.emit(SchemaDiagnostic::new(
                ErrorCode::E201,
                format!("missing required field `{key}`"),
                path.key(key),
            ));
        }
        value
    }

    fn required_str<'v>(&mut self, object: &'v Object, key: &str, path: &FieldPath) -> Option<&'v str> {
        let value = self.required(object, key, path)?;
        self.expect_str(value, &path.key(key))
    }

    fn required_enum<T>(
        &mut self,
        object: &Object,
        key: &str,
        path: &FieldPath,
        code: ErrorCode,
        expected: &str,
    ) -> Option<T>
    where
        T: FromStr<Err = UnknownVariant>,
    {
        let raw = self.required_str(object, key, path)?;
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(err) => {
                self.diagnostics.emit(
                    SchemaDiagnostic::new(code, err.to_string(), path.key(key))
                        .with_help(format!("expected one of: {expected}")),
                );
                None
            }
        }
    }

    /// A string member that may be empty, e.g. a label.
    fn optional_string<'v>(&mut self, object: &'v Object, key: &str, path: &FieldPath) -> Option<&'v str> {
        let value = self.optional(object, key)?;
        match value.as_str() {
            Some(value) => Some(value),
            None => {
                self.diagnostics.emit(SchemaDiagnostic::new(
                    ErrorCode::E200,
                    format!("expected a string, found {}", value_kind(value)),
                    path.key(key),
                ));
                None
            }
        }
    }

    fn optional_bool(&mut self, object: &Object, key: &str, path: &FieldPath) -> Option<bool> {
        let value = self.optional(object, key)?;
        match value.as_bool() {
            Some(value) => Some(value),
            None => {
                self.diagnostics.emit(SchemaDiagnostic::new(
                    ErrorCode::E200,
                    format!("expected a boolean, found {}", value_kind(value)),
                    path.key(key),
                ));
                None
            }
        }
    }

    /// A non-blank string.
    fn expect_str<'v>(&mut self, value: &'v Value, path: &FieldPath) -> Option<&'v str> {
        match value.as_str() {
            Some(text) if text.trim().is_empty() => {
                self.diagnostics.emit(SchemaDiagnostic::new(
                    ErrorCode::E202,
                    "expected a non-empty string",
                    path.clone(),
                ));
                None
            }
            Some(text) => Some(text),
            None => {
                self.diagnostics.emit(SchemaDiagnostic::new(
                    ErrorCode::E200,
                    format!("expected a string, found {}", value_kind(value)),
                    path.clone(),
                ));
                None
            }
        }
    }

    fn expect_array<'v>(&mut self, value: &'v Value, path: &FieldPath) -> Option<&'v Vec<Value>> {
        let array = value.as_array();
        if array.is_none() {
            self.diagnostics.emit(SchemaDiagnostic::new(
                ErrorCode::E200,
                format!("expected an array, found {}", value_kind(value)),
                path.clone(),
            ));
        }
        array
    }

    fn expect_object<'v>(
        &mut self,
        value: &'v Value,
        path: &FieldPath,
        expected: &str,
    ) -> Option<&'v Object> {
        let object = value.as_object();
        if object.is_none() {
            self.diagnostics.emit(SchemaDiagnostic::new(
                ErrorCode::E200,
                format!("expected {expected}, found {}", value_kind(value)),
                path.clone(),
            ));
        }
        object
    }
}
