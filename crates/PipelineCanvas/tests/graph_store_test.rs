use glam::Vec2;
use pipeline_canvas::CanvasConfig;
use pipeline_canvas::math::PortKind;
use pipeline_canvas::model::{GraphState, NodeCategory};
use pipeline_canvas::palette::NodeTemplate;

fn template(ty: &str, category: NodeCategory) -> NodeTemplate {
    NodeTemplate::new(ty, category, ty.to_uppercase())
}

#[test]
fn test_add_node_copies_template() {
    let mut graph = GraphState::default();
    let t = NodeTemplate::new("sql_connector", NodeCategory::Input, "SQL Server");
    let id = graph.add_node(&t, Vec2::new(12.5, -3.0));

    let node = graph.node(id).unwrap();
    assert_eq!(node.id, id);
    assert_eq!(node.node_type, "sql_connector");
    assert_eq!(node.category, NodeCategory::Input);
    assert_eq!(node.label, "SQL Server");
    assert_eq!(node.position, Vec2::new(12.5, -3.0));
    assert_eq!(graph.node_by_uuid(node.uuid).map(|n| n.id), Some(id));
}

#[test]
fn test_nodes_iterate_in_insertion_order() {
    let mut graph = GraphState::default();
    let ids: Vec<_> = (0..5)
        .map(|i| graph.add_node(&template("sort", NodeCategory::Transform), Vec2::splat(i as f32)))
        .collect();
    graph.delete_node(ids[2]);

    let order: Vec<_> = graph.nodes().map(|n| n.id).collect();
    assert_eq!(order, vec![ids[0], ids[1], ids[3], ids[4]]);
}

#[test]
fn test_move_node_touches_only_that_node() {
    let mut graph = GraphState::default();
    let a = graph.add_node(&template("filter", NodeCategory::Transform), Vec2::ZERO);
    let b = graph.add_node(&template("sort", NodeCategory::Transform), Vec2::new(300.0, 0.0));

    assert!(graph.move_node(a, Vec2::new(40.0, 50.0)));
    assert_eq!(graph.node(a).unwrap().position, Vec2::new(40.0, 50.0));
    assert_eq!(graph.node(b).unwrap().position, Vec2::new(300.0, 0.0));

    graph.delete_node(a);
    assert!(!graph.move_node(a, Vec2::ZERO));
}

#[test]
fn test_connection_guards() {
    let mut graph = GraphState::default();
    let a = graph.add_node(&template("api_live", NodeCategory::Input), Vec2::ZERO);
    let b = graph.add_node(&template("display", NodeCategory::Output), Vec2::ZERO);

    assert!(graph.add_connection(a, a).is_none());
    let ab = graph.add_connection(a, b).unwrap();
    assert!(graph.add_connection(a, b).is_none());
    // The reverse direction is a different ordered pair
    let ba = graph.add_connection(b, a).unwrap();
    assert_ne!(ab, ba);
    assert_eq!(graph.connection_count(), 2);

    // Deleting frees the pair again
    graph.delete_connection(ab);
    assert!(!graph.has_connection(a, b));
    assert!(graph.add_connection(a, b).is_some());
}

#[test]
fn test_connection_to_missing_node_is_rejected() {
    let mut graph = GraphState::default();
    let a = graph.add_node(&template("api_live", NodeCategory::Input), Vec2::ZERO);
    let b = graph.add_node(&template("display", NodeCategory::Output), Vec2::ZERO);
    graph.delete_node(b);

    assert!(graph.add_connection(a, b).is_none());
    assert_eq!(graph.connection_count(), 0);
}

#[test]
fn test_delete_node_cascades_and_clears_selection() {
    let mut graph = GraphState::default();
    let a = graph.add_node(&template("xml_parser", NodeCategory::Input), Vec2::ZERO);
    let b = graph.add_node(&template("if_condition", NodeCategory::Logic), Vec2::ZERO);
    let c = graph.add_node(&template("webhook", NodeCategory::Output), Vec2::ZERO);
    graph.add_connection(a, b).unwrap();
    graph.add_connection(b, c).unwrap();
    let ac = graph.add_connection(a, c).unwrap();
    graph.select(Some(b));

    let removed = graph.delete_node(b).unwrap();
    assert_eq!(removed.id, b);
    assert_eq!(graph.selected(), None);
    let remaining: Vec<_> = graph.connections().map(|c| c.id).collect();
    assert_eq!(remaining, vec![ac]);
    assert_eq!(graph.connections_for_node(b).count(), 0);

    // Idempotent
    assert!(graph.delete_node(b).is_none());
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.connection_count(), 1);
}

#[test]
fn test_selection_of_other_node_survives_deletion() {
    let mut graph = GraphState::default();
    let a = graph.add_node(&template("switch", NodeCategory::Logic), Vec2::ZERO);
    let b = graph.add_node(&template("merge", NodeCategory::Logic), Vec2::ZERO);
    graph.select(Some(a));
    graph.delete_node(b);
    assert_eq!(graph.selected(), Some(a));

    graph.select(None);
    assert_eq!(graph.selected(), None);

    // Selecting a vanished id leaves nothing selected
    graph.select(Some(b));
    assert_eq!(graph.selected(), None);
}

#[test]
fn test_port_position_of_vanished_node_is_origin() {
    let config = CanvasConfig::default();
    let mut graph = GraphState::default();
    let a = graph.add_node(&template("chart", NodeCategory::Output), Vec2::new(10.0, 20.0));

    assert_eq!(
        graph.port_position(a, PortKind::Input, &config),
        Vec2::new(10.0, 84.0)
    );
    assert_eq!(
        graph.port_position(a, PortKind::Output, &config),
        Vec2::new(218.0, 84.0)
    );

    graph.delete_node(a);
    assert_eq!(graph.port_position(a, PortKind::Output, &config), Vec2::ZERO);
}

#[test]
fn test_clear() {
    let mut graph = GraphState::default();
    let a = graph.add_node(&template("sort", NodeCategory::Transform), Vec2::ZERO);
    let b = graph.add_node(&template("chart", NodeCategory::Output), Vec2::ZERO);
    graph.add_connection(a, b);
    graph.select(Some(a));

    graph.clear();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.connection_count(), 0);
    assert_eq!(graph.selected(), None);
    assert!(!graph.has_connection(a, b));
}

#[test]
fn test_connections_iterate_in_creation_order() {
    let mut graph = GraphState::default();
    let n: Vec<_> = (0..4)
        .map(|i| graph.add_node(&template("merge", NodeCategory::Logic), Vec2::splat(i as f32)))
        .collect();
    let first = graph.add_connection(n[0], n[1]).unwrap();
    let second = graph.add_connection(n[1], n[2]).unwrap();
    graph.delete_connection(first);
    // Reuses the freed arena slot but must still come last
    let third = graph.add_connection(n[2], n[3]).unwrap();

    let order: Vec<_> = graph.connections().map(|c| c.id).collect();
    assert_eq!(order, vec![second, third]);
    let touching: Vec<_> = graph.connections_for_node(n[2]).map(|c| c.id).collect();
    assert_eq!(touching, vec![second, third]);
}
