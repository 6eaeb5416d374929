//! End-to-end layout and synthesis scenarios.

use std::collections::HashMap;

use archway::{
    DiagramBuilder,
    config::AppConfig,
    diagnostic::{Diagnostics, WarningCode},
    document::{BoundKind, Document, Element},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    layout::{PositionedLayout, group::GROUP_PADDING},
    semantic::{
        Architecture, Connection, ConnectionKind, Direction, Group, GroupKind, LayoutKind,
        LayoutSpec, Node, NodeKind, Spacing,
    },
};
use float_cmp::assert_approx_eq;
use proptest::prelude::*;

fn rank_names(layout: &PositionedLayout<'_>) -> Vec<Vec<String>> {
    layout
        .ranks()
        .iter()
        .map(|rank| rank.iter().map(ToString::to_string).collect())
        .collect()
}

fn builder() -> DiagramBuilder {
    DiagramBuilder::new(AppConfig::default().with_seed(11))
}

fn element_bounds(element: &Element) -> Bounds {
    let base = element.base();
    Bounds::new_from_top_left(
        Point::new(base.x(), base.y()),
        Size::new(base.width(), base.height()),
    )
}

/// Checks that shapes and their labels reference each other one to one.
fn assert_text_bindings(document: &Document) {
    let by_id: HashMap<&str, &Element> = document
        .elements()
        .iter()
        .map(|element| (element.id(), element))
        .collect();

    for element in document.elements().iter().filter(|e| e.is_shape()) {
        let texts: Vec<_> = element
            .base()
            .bound_elements()
            .iter()
            .filter(|bound| bound.kind() == BoundKind::Text)
            .collect();
        assert_eq!(texts.len(), 1, "shape {} has {} labels", element.id(), texts.len());

        let text = by_id[texts[0].id()].as_text().expect("bound text element");
        assert_eq!(text.container_id(), Some(element.id()));
    }

    for text in document.elements().iter().filter_map(Element::as_text) {
        if let Some(container) = text.container_id() {
            let shape = by_id[container];
            assert!(shape.is_shape());
            assert!(
                shape
                    .base()
                    .bound_elements()
                    .iter()
                    .any(|bound| bound.id() == text.id())
            );
        }
    }
}

/// Checks that every arrow starts and ends on its bound shapes' outlines.
fn assert_arrows_on_boundaries(document: &Document) {
    for arrow in document.elements().iter().filter_map(Element::as_arrow) {
        let start_id = arrow.start_binding().expect("start binding").element_id();
        let end_id = arrow.end_binding().expect("end binding").element_id();
        let start_shape = element_bounds(document.element(start_id).expect("start shape"));
        let end_shape = element_bounds(document.element(end_id).expect("end shape"));

        let origin = Point::new(arrow.base().x(), arrow.base().y());
        let [dx, dy] = arrow.points()[1];
        let end = origin.add_point(Point::new(dx, dy));

        assert!(start_shape.is_on_boundary(origin, 0.01), "{origin:?} not on {start_shape:?}");
        assert!(end_shape.is_on_boundary(end, 0.01), "{end:?} not on {end_shape:?}");
    }
}

#[test]
fn test_actor_above_service_scenario() {
    let source = r#"{
        "nodes": [{"id": "u", "type": "actor"}, {"id": "s", "type": "service"}],
        "connections": [{"from": "u", "to": "s", "type": "http"}],
        "layout": {"type": "hierarchical", "direction": "TB"}
    }"#;
    let builder = builder();
    let architecture = builder.parse(source).unwrap();

    let mut diagnostics = Diagnostics::new();
    let layout = builder.layout(&architecture, &mut diagnostics);

    assert_eq!(rank_names(&layout), vec![vec!["u"], vec!["s"]]);
    let user = layout.node_by_id("u").unwrap().bounds();
    let service = layout.node_by_id("s").unwrap().bounds();
    assert!(user.max_y() < service.min_y());

    let route = layout.connections()[0].route();
    assert_eq!(route.from_point(), user.bottom_center());
    assert_eq!(route.to_point(), service.top_center());

    let diagram = builder.render(&architecture).unwrap();
    assert_arrows_on_boundaries(diagram.document());
    assert_text_bindings(diagram.document());
}

#[test]
fn test_dangling_connection_is_dropped() {
    let source = r#"{
        "nodes": [{"id": "a", "type": "service"}, {"id": "b", "type": "database"}],
        "connections": [
            {"from": "a", "to": "b", "type": "query"},
            {"from": "a", "to": "ghost", "type": "http"}
        ]
    }"#;

    let diagram = builder().generate(source).unwrap();

    let arrows = diagram.document().elements().iter().filter_map(Element::as_arrow).count();
    assert_eq!(arrows, 1);
    let dangling: Vec<_> = diagram
        .diagnostics()
        .iter()
        .filter(|diagnostic| diagnostic.code() == WarningCode::W001)
        .collect();
    assert_eq!(dangling.len(), 1);
    assert!(dangling[0].message().contains("ghost"));
    assert_text_bindings(diagram.document());
}

#[test]
fn test_unknown_layout_type_falls_back() {
    let source = r#"{
        "nodes": [{"id": "a", "type": "service"}, {"id": "b", "type": "service"}],
        "connections": [{"from": "a", "to": "b", "type": "sync"}],
        "layout": {"type": "force"}
    }"#;
    let builder = builder();
    let architecture = builder.parse(source).unwrap();

    let mut diagnostics = Diagnostics::new();
    let layout = builder.layout(&architecture, &mut diagnostics);
    assert_eq!(layout.kind(), LayoutKind::Hierarchical);
    assert_eq!(layout.ranks().len(), 2);

    let diagram = builder.render(&architecture).unwrap();
    assert!(diagram.diagnostics().contains(WarningCode::W004));
    let message = diagram.diagnostics().iter().next().unwrap().message().to_string();
    assert!(message.contains("force"));
    assert_eq!(diagram.document().elements().len(), 5);
}

fn services(count: usize) -> Vec<Node> {
    (0..count)
        .map(|idx| Node::new(format!("n{idx}").as_str(), NodeKind::Service, format!("N{idx}")))
        .collect()
}

fn grid_of(count: usize) -> Architecture {
    Architecture::new(
        services(count),
        Vec::new(),
        Vec::new(),
        LayoutSpec::new("grid", Direction::TB, Spacing::default()),
    )
}

#[test]
fn test_grid_nine_is_three_by_three() {
    let architecture = grid_of(9);
    let mut diagnostics = Diagnostics::new();
    let layout = builder().layout(&architecture, &mut diagnostics);

    let rows: Vec<usize> = layout.ranks().iter().map(Vec::len).collect();
    assert_eq!(rows, vec![3, 3, 3]);
}

#[test]
fn test_grid_ten_is_four_by_three() {
    let architecture = grid_of(10);
    let mut diagnostics = Diagnostics::new();
    let layout = builder().layout(&architecture, &mut diagnostics);

    let rows: Vec<usize> = layout.ranks().iter().map(Vec::len).collect();
    assert_eq!(rows, vec![4, 4, 2]);
    assert_eq!(rank_names(&layout)[2], vec!["n8", "n9"]);
}

#[test]
fn test_layout_is_idempotent() {
    let source = r#"{
        "nodes": [
            {"id": "web", "type": "ui"},
            {"id": "api", "type": "gateway"},
            {"id": "auth", "type": "service"},
            {"id": "orders", "type": "service"},
            {"id": "db", "type": "database"},
            {"id": "lonely", "type": "external"}
        ],
        "connections": [
            {"from": "web", "to": "api", "type": "http"},
            {"from": "api", "to": "auth", "type": "http"},
            {"from": "api", "to": "orders", "type": "http"},
            {"from": "orders", "to": "db", "type": "query"}
        ]
    }"#;
    let builder = builder();
    let architecture = builder.parse(source).unwrap();

    let first = builder.layout(&architecture, &mut Diagnostics::new());
    let second = builder.layout(&architecture, &mut Diagnostics::new());

    let bounds = |layout: &PositionedLayout<'_>| -> Vec<Bounds> {
        layout.nodes().iter().map(|node| node.bounds()).collect()
    };
    assert_eq!(bounds(&first), bounds(&second));
    assert_eq!(rank_names(&first), rank_names(&second));
}

#[test]
fn test_layered_never_ranks_database_before_service() {
    let architecture = Architecture::new(
        vec![
            Node::new("db", NodeKind::Database, "DB"),
            Node::new("svc", NodeKind::Service, "Service"),
        ],
        vec![Connection::new("db", "svc", ConnectionKind::DataFlow)],
        Vec::new(),
        LayoutSpec::new("layered", Direction::TB, Spacing::default()),
    );
    let mut diagnostics = Diagnostics::new();
    let layout = builder().layout(&architecture, &mut diagnostics);

    assert_eq!(rank_names(&layout), vec![vec!["svc"], vec!["db"]]);
    let db = layout.node_by_id("db").unwrap().bounds();
    let svc = layout.node_by_id("svc").unwrap().bounds();
    assert!(svc.max_y() < db.min_y());
}

#[test]
fn test_group_box_is_padded_union() {
    let source = r#"{
        "nodes": [
            {"id": "a", "type": "service"},
            {"id": "b", "type": "queue"},
            {"id": "c", "type": "cache"}
        ],
        "connections": [{"from": "a", "to": "b", "type": "async"}],
        "groups": [
            {"id": "core", "label": "Core", "type": "layer", "members": ["a", "b", "missing"]},
            {"id": "void", "type": "cluster", "members": ["nobody"]}
        ]
    }"#;
    let builder = builder();
    let architecture = builder.parse(source).unwrap();

    let mut diagnostics = Diagnostics::new();
    let layout = builder.layout(&architecture, &mut diagnostics);

    assert_eq!(layout.groups().len(), 1);
    let a = layout.node_by_id("a").unwrap().bounds();
    let b = layout.node_by_id("b").unwrap().bounds();
    let union = a.merge(&b);
    let group = layout.groups()[0].bounds();
    assert_approx_eq!(f32, group.min_x(), union.min_x() - GROUP_PADDING);
    assert_approx_eq!(f32, group.min_y(), union.min_y() - GROUP_PADDING);
    assert_approx_eq!(f32, group.max_x(), union.max_x() + GROUP_PADDING);
    assert_approx_eq!(f32, group.max_y(), union.max_y() + GROUP_PADDING);

    assert!(diagnostics.contains(WarningCode::W002));
    assert!(diagnostics.contains(WarningCode::W003));

    let diagram = builder.render(&architecture).unwrap();
    let first = &diagram.document().elements()[0];
    assert_eq!(first.type_name(), "rectangle");
    assert_approx_eq!(f32, first.base().x(), group.min_x());
    assert_text_bindings(diagram.document());
}

#[test]
fn test_cyclic_graph_ranks_by_type() {
    let source = r#"{
        "nodes": [
            {"id": "db", "type": "database"},
            {"id": "svc", "type": "service"},
            {"id": "ui", "type": "ui"}
        ],
        "connections": [
            {"from": "db", "to": "svc", "type": "sync"},
            {"from": "svc", "to": "ui", "type": "sync"},
            {"from": "ui", "to": "db", "type": "sync"}
        ]
    }"#;
    let builder = builder();
    let architecture = builder.parse(source).unwrap();

    let mut diagnostics = Diagnostics::new();
    let layout = builder.layout(&architecture, &mut diagnostics);

    assert!(diagnostics.contains(WarningCode::W005));
    assert_eq!(rank_names(&layout), vec![vec!["ui"], vec!["svc"], vec!["db"]]);
}

#[test]
fn test_composite_node_contains_children() {
    let source = r#"{
        "nodes": [
            {"id": "platform", "type": "service", "label": "Platform", "children": [
                {"id": "auth", "type": "service", "label": "Auth"},
                {"id": "ledger", "type": "database", "label": "Ledger"}
            ]},
            {"id": "user", "type": "actor"}
        ],
        "connections": [
            {"from": "user", "to": "auth", "type": "http"},
            {"from": "auth", "to": "ledger", "type": "query"}
        ]
    }"#;
    let builder = builder();
    let architecture = builder.parse(source).unwrap();

    let mut diagnostics = Diagnostics::new();
    let layout = builder.layout(&architecture, &mut diagnostics);
    assert!(diagnostics.is_empty());

    let platform = layout.node_by_id("platform").unwrap();
    assert!(platform.has_children());
    for child in ["auth", "ledger"] {
        let bounds = layout.node_by_id(child).unwrap().bounds();
        assert!(bounds.min_x() >= platform.bounds().min_x());
        assert!(bounds.max_x() <= platform.bounds().max_x());
        assert!(bounds.min_y() >= platform.bounds().min_y());
        assert!(bounds.max_y() <= platform.bounds().max_y());
    }
    // user enters the composite from its own rank
    assert_eq!(rank_names(&layout), vec![vec!["user"], vec!["platform"]]);

    let diagram = builder.render(&architecture).unwrap();
    let document = diagram.document();
    assert_text_bindings(document);
    assert_arrows_on_boundaries(document);

    let platform_label = document
        .elements()
        .iter()
        .filter_map(Element::as_text)
        .find(|text| text.text() == "Platform")
        .unwrap();
    assert_eq!(platform_label.vertical_align(), archway::document::VerticalAlign::Top);
}

#[test]
fn test_bidirectional_and_plain_arrowheads() {
    let source = r#"{
        "nodes": [{"id": "a", "type": "service"}, {"id": "b", "type": "cache"}],
        "connections": [
            {"from": "a", "to": "b", "type": "query", "bidirectional": true},
            {"from": "a", "to": "b", "type": "none"}
        ]
    }"#;
    let diagram = builder().generate(source).unwrap();

    let arrows: Vec<_> = diagram
        .document()
        .elements()
        .iter()
        .filter_map(Element::as_arrow)
        .collect();
    assert!(arrows[0].start_arrowhead().is_some());
    assert!(arrows[0].end_arrowhead().is_some());
    assert!(arrows[1].start_arrowhead().is_none());
    assert!(arrows[1].end_arrowhead().is_none());

    let shape = diagram.document().elements()[0].base();
    let arrow_refs = shape
        .bound_elements()
        .iter()
        .filter(|bound| bound.kind() == BoundKind::Arrow)
        .count();
    assert_eq!(arrow_refs, 2);
}

const KINDS: [NodeKind; 8] = NodeKind::CANONICAL_ORDER;

/// Generated documents mix composite nodes, nested and top-level
/// connections, and groups whose members may dangle.
fn arb_architecture() -> impl Strategy<Value = Architecture> {
    (1usize..8)
        .prop_flat_map(|count| {
            (
                prop::collection::vec(0usize..KINDS.len(), count),
                prop::collection::vec(0usize..3, count),
            )
        })
        .prop_flat_map(|(kinds, children)| {
            let total = kinds.len() + children.iter().sum::<usize>();
            (
                Just(kinds),
                Just(children),
                prop::collection::vec((0..total, 0..total, any::<bool>()), 0..16),
                prop::collection::vec(
                    (prop::collection::vec(0..total, 0..4), any::<bool>()),
                    0..3,
                ),
                prop::sample::select(vec!["hierarchical", "grid", "layered", "force"]),
                prop::sample::select(vec![Direction::TB, Direction::BT, Direction::LR, Direction::RL]),
            )
        })
        .prop_map(|(kinds, children, edges, groups, layout, direction)| {
            let mut ids = Vec::new();
            let nodes = kinds
                .iter()
                .zip(&children)
                .enumerate()
                .map(|(idx, (&kind, &child_count))| {
                    let id = format!("p{idx}");
                    ids.push(id.clone());
                    let nested = (0..child_count)
                        .map(|child| {
                            let child_id = format!("p{idx}c{child}");
                            ids.push(child_id.clone());
                            Node::new(
                                child_id.as_str(),
                                KINDS[(kind + child + 1) % KINDS.len()],
                                format!("Child {child}"),
                            )
                        })
                        .collect();
                    Node::new(id.as_str(), KINDS[kind], format!("Node {idx}")).with_children(nested)
                })
                .collect();
            let connections = edges
                .into_iter()
                .map(|(from, to, labelled)| {
                    let connection = Connection::new(
                        ids[from].as_str(),
                        ids[to].as_str(),
                        ConnectionKind::Http,
                    );
                    if labelled {
                        connection.with_label("edge")
                    } else {
                        connection
                    }
                })
                .collect();
            let groups = groups
                .into_iter()
                .enumerate()
                .map(|(idx, (members, with_ghost))| {
                    let mut members: Vec<Id> =
                        members.iter().map(|&member| Id::new(&ids[member])).collect();
                    if with_ghost {
                        members.push(Id::new("ghost"));
                    }
                    Group::new(format!("g{idx}").as_str(), format!("Group {idx}"), GroupKind::Cluster, members)
                })
                .collect();
            Architecture::new(
                nodes,
                connections,
                groups,
                LayoutSpec::new(layout, direction, Spacing::default()),
            )
        })
}

/// Groups with at least one member that names a node.
fn resolvable_groups(architecture: &Architecture) -> usize {
    architecture
        .groups()
        .iter()
        .filter(|group| group.members().iter().any(|member| member != "ghost"))
        .count()
}

proptest! {
    #[test]
    fn prop_every_shape_has_one_label(architecture in arb_architecture()) {
        let diagram = builder().render(&architecture).unwrap();
        assert_text_bindings(diagram.document());

        let shapes = diagram.document().elements().iter().filter(|e| e.is_shape()).count();
        prop_assert_eq!(shapes, architecture.walk().count() + resolvable_groups(&architecture));
    }

    #[test]
    fn prop_arrows_anchor_on_boundaries(architecture in arb_architecture()) {
        let diagram = builder().render(&architecture).unwrap();
        assert_arrows_on_boundaries(diagram.document());

        let arrows = diagram.document().elements().iter().filter_map(Element::as_arrow).count();
        prop_assert_eq!(arrows, architecture.connections().len());
    }

    #[test]
    fn prop_children_stay_inside_parents(architecture in arb_architecture()) {
        let mut diagnostics = Diagnostics::new();
        let layout = builder().layout(&architecture, &mut diagnostics);

        for node in layout.nodes() {
            let Some(parent) = node.parent() else { continue };
            let outer = layout.nodes()[parent].bounds();
            let inner = node.bounds();
            prop_assert!(inner.min_x() >= outer.min_x() - 0.01);
            prop_assert!(inner.min_y() >= outer.min_y() - 0.01);
            prop_assert!(inner.max_x() <= outer.max_x() + 0.01);
            prop_assert!(inner.max_y() <= outer.max_y() + 0.01);
        }
    }

    #[test]
    fn prop_group_boxes_pad_their_members(architecture in arb_architecture()) {
        let mut diagnostics = Diagnostics::new();
        let layout = builder().layout(&architecture, &mut diagnostics);

        prop_assert_eq!(layout.groups().len(), resolvable_groups(&architecture));
        for group in layout.groups() {
            let union = group
                .members()
                .iter()
                .map(|&member| layout.nodes()[member].bounds())
                .reduce(|acc, bounds| acc.merge(&bounds))
                .expect("positioned groups have members");
            assert_approx_eq!(f32, group.bounds().min_x(), union.min_x() - GROUP_PADDING, epsilon = 0.01);
            assert_approx_eq!(f32, group.bounds().min_y(), union.min_y() - GROUP_PADDING, epsilon = 0.01);
            assert_approx_eq!(f32, group.bounds().max_x(), union.max_x() + GROUP_PADDING, epsilon = 0.01);
            assert_approx_eq!(f32, group.bounds().max_y(), union.max_y() + GROUP_PADDING, epsilon = 0.01);
        }
    }
}
