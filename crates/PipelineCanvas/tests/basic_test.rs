use glam::Vec2;
use pipeline_canvas::input::PointerEvent;
use pipeline_canvas::math::{self, Rect};
use pipeline_canvas::model::{GraphState, NodeCategory};
use pipeline_canvas::render::DrawCommand;
use pipeline_canvas::{Canvas, CanvasConfig, CanvasError, NodeTemplate};

fn node_rects(draw_list: &[DrawCommand], size: Vec2) -> Vec<Vec2> {
    draw_list
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Rect { pos, size: s, .. } if *s == size => Some(*pos),
            _ => None,
        })
        .collect()
}

fn beziers(draw_list: &[DrawCommand]) -> Vec<&DrawCommand> {
    draw_list
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Bezier { .. }))
        .collect()
}

#[test]
fn test_basic_rendering() {
    // 1. Setup Graph
    let mut graph = GraphState::default();
    graph.add_node(
        &NodeTemplate::new("filter", NodeCategory::Transform, "Smart Filter"),
        Vec2::new(100.0, 100.0),
    );

    // 2. Setup Canvas, mounted at (40, 30) and panned by (30, 20)
    let mut canvas = Canvas::new(CanvasConfig::default());
    canvas.set_canvas_rect(Some(Rect::new(
        Vec2::new(40.0, 30.0),
        Vec2::new(800.0, 600.0),
    )));
    canvas.view.set_offset(Vec2::new(30.0, 20.0));

    // 3. Render
    let draw_list = canvas.render(&graph);
    assert!(!draw_list.is_empty(), "Draw list should not be empty");

    // Screen pos = origin + offset + local
    let rects = node_rects(&draw_list, canvas.config.node_size);
    assert_eq!(rects, vec![Vec2::new(170.0, 150.0)]);

    let label = draw_list.iter().find_map(|cmd| match cmd {
        DrawCommand::Text { text, .. } if text == "Smart Filter" => Some(text.clone()),
        _ => None,
    });
    assert!(label.is_some());
}

#[test]
fn test_connections_render_band_and_stroke() {
    let mut graph = GraphState::default();
    let a = graph.add_node(
        &NodeTemplate::new("api_live", NodeCategory::Input, "Live API Feed"),
        Vec2::new(0.0, 0.0),
    );
    let b = graph.add_node(
        &NodeTemplate::new("chart", NodeCategory::Output, "Live Chart"),
        Vec2::new(400.0, 200.0),
    );
    graph.add_connection(a, b).unwrap();

    let mut canvas = Canvas::new(CanvasConfig::default());
    canvas.set_canvas_rect(Some(Rect::new(Vec2::ZERO, Vec2::new(1600.0, 1000.0))));
    let draw_list = canvas.render(&graph);

    let wires = beziers(&draw_list);
    assert_eq!(wires.len(), 2);

    let (start, end) = (Vec2::new(208.0, 64.0), Vec2::new(400.0, 264.0));
    let (cp1_expected, cp2_expected) = math::calculate_bezier_points(start, end);
    assert_eq!(cp1_expected, Vec2::new(304.0, 64.0));
    assert_eq!(cp2_expected, Vec2::new(304.0, 264.0));

    match (wires[0], wires[1]) {
        (
            DrawCommand::Bezier {
                width: band,
                dashed: false,
                start: s,
                end: e,
                ..
            },
            DrawCommand::Bezier {
                width: stroke,
                dashed: false,
                cp1,
                cp2,
                ..
            },
        ) => {
            assert_eq!(*band, canvas.config.wire_hit_width);
            assert_eq!(*stroke, canvas.config.style.wire_width);
            assert!(band > stroke);
            assert_eq!(*s, start);
            assert_eq!(*e, end);
            assert_eq!(*cp1, cp1_expected);
            assert_eq!(*cp2, cp2_expected);
        }
        _ => panic!("Expected a hit band followed by a stroke"),
    }
}

#[test]
fn test_pending_wire_renders_dashed() {
    let mut graph = GraphState::default();
    graph.add_node(
        &NodeTemplate::new("api_live", NodeCategory::Input, "Live API Feed"),
        Vec2::ZERO,
    );
    let mut canvas = Canvas::new(CanvasConfig::default());
    canvas.set_canvas_rect(Some(Rect::new(Vec2::ZERO, Vec2::new(1600.0, 1000.0))));

    canvas.handle_pointer(PointerEvent::Down { pos: Vec2::new(208.0, 64.0) }, &mut graph);
    canvas.handle_pointer(PointerEvent::Move { pos: Vec2::new(500.0, 300.0) }, &mut graph);

    let draw_list = canvas.render(&graph);
    let wires = beziers(&draw_list);
    assert_eq!(wires.len(), 1);
    match wires[0] {
        DrawCommand::Bezier {
            start, end, dashed, ..
        } => {
            assert!(*dashed);
            assert_eq!(*start, Vec2::new(208.0, 64.0));
            assert_eq!(*end, Vec2::new(500.0, 300.0));
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_selected_node_is_drawn_last() {
    let mut graph = GraphState::default();
    let a = graph.add_node(
        &NodeTemplate::new("sort", NodeCategory::Transform, "Sorting"),
        Vec2::new(0.0, 0.0),
    );
    graph.add_node(
        &NodeTemplate::new("merge", NodeCategory::Logic, "Union"),
        Vec2::new(50.0, 50.0),
    );
    graph.select(Some(a));

    let mut canvas = Canvas::new(CanvasConfig::default());
    canvas.set_canvas_rect(Some(Rect::new(Vec2::ZERO, Vec2::new(1600.0, 1000.0))));
    let rects = node_rects(&canvas.render(&graph), canvas.config.node_size);
    assert_eq!(rects, vec![Vec2::new(50.0, 50.0), Vec2::new(0.0, 0.0)]);

    // Pressing where both overlap grabs the selected (topmost) node
    canvas.handle_pointer(PointerEvent::Down { pos: Vec2::new(100.0, 90.0) }, &mut graph);
    assert_eq!(graph.selected(), Some(a));
}

#[test]
fn test_config_from_json() {
    let config = CanvasConfig::from_json_str(r#"{ "port_offset_y": 40.0, "wire_hit_width": 16.0 }"#)
        .unwrap();
    assert_eq!(config.port_offset_y, 40.0);
    assert_eq!(config.wire_hit_width, 16.0);
    assert_eq!(config.node_size, Vec2::new(208.0, 100.0));
    assert_eq!(config.style, CanvasConfig::default().style);

    assert!(matches!(
        CanvasConfig::from_json_str("{ not json"),
        Err(CanvasError::ConfigParse(_))
    ));
    assert!(matches!(
        CanvasConfig::from_json_str(r#"{ "node_size": [0.0, 100.0] }"#),
        Err(CanvasError::InvalidConfig(_))
    ));
}

fn grid_lines(draw_list: &[DrawCommand]) -> usize {
    draw_list
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
        .count()
}

#[test]
fn test_grid_follows_viewport_phase() {
    let graph = GraphState::default();
    let mut canvas = Canvas::new(CanvasConfig::default());
    canvas.set_canvas_rect(Some(Rect::new(Vec2::ZERO, Vec2::new(800.0, 600.0))));
    canvas.view.set_offset(Vec2::new(30.0, 20.0));

    // Phase (6, 20): 34 vertical lines, 25 horizontal
    assert_eq!(grid_lines(&canvas.render(&graph)), 34 + 25);
}

#[test]
fn test_degenerate_grid_spacing() {
    assert!(matches!(
        CanvasConfig::from_json_str(r#"{ "style": { "grid_spacing": 0.000001 } }"#),
        Err(CanvasError::InvalidConfig(_))
    ));
    assert!(matches!(
        CanvasConfig::from_json_str(r#"{ "style": { "grid_spacing": 0.5 } }"#),
        Err(CanvasError::InvalidConfig(_))
    ));
    assert!(CanvasConfig::from_json_str(r#"{ "style": { "grid_spacing": 1.0 } }"#).is_ok());

    // A config built in code skips validation; rendering must still terminate.
    let graph = GraphState::default();
    let mut config = CanvasConfig::default();
    config.style.grid_spacing = 0.000001;
    let mut canvas = Canvas::new(config);
    canvas.set_canvas_rect(Some(Rect::new(Vec2::ZERO, Vec2::new(800.0, 600.0))));
    assert_eq!(grid_lines(&canvas.render(&graph)), 0);

    canvas.config.style.grid_spacing = 1.0;
    canvas.set_canvas_rect(Some(Rect::new(Vec2::ZERO, Vec2::new(1.0e9, 1.0e9))));
    assert_eq!(grid_lines(&canvas.render(&graph)), 2 * 4096);
}
