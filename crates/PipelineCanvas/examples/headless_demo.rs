use glam::Vec2;
use pipeline_canvas::input::{DropEvent, PointerEvent};
use pipeline_canvas::math::{PortKind, Rect};
use pipeline_canvas::model::{GraphState, NodeId};
use pipeline_canvas::render::DrawCommand;
use pipeline_canvas::{Canvas, CanvasConfig, LogicEvent, Palette};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();
    println!("=== PipelineCanvas Headless Demo ===");

    // 1. Initialize Canvas, mounted below a 60px toolbar and right of a 250px palette
    let mut canvas = Canvas::new(CanvasConfig::default());
    canvas.set_canvas_rect(Some(Rect::new(
        Vec2::new(250.0, 60.0),
        Vec2::new(1030.0, 660.0),
    )));

    let palette = Palette::default();
    let mut graph = GraphState::default();

    for category in palette.categories() {
        let names: Vec<_> = palette
            .templates_in_category(category)
            .map(|t| t.label.as_str())
            .collect();
        println!("{category:<10} {}", names.join(", "));
    }

    // 2. Drag two templates from the palette onto the canvas
    let source = LogicEvent::created_node(&canvas.handle_drop(
        &DropEvent::new(
            Vec2::new(500.0, 300.0),
            palette.get("google_sheets").map(|t| t.to_payload()).unwrap_or_default(),
        ),
        &mut graph,
    ));
    let sink = LogicEvent::created_node(&canvas.handle_drop(
        &DropEvent::new(
            Vec2::new(900.0, 420.0),
            palette.get("display").map(|t| t.to_payload()).unwrap_or_default(),
        ),
        &mut graph,
    ));
    // A drop from a foreign drag source is ignored
    canvas.handle_drop(
        &DropEvent {
            pos: Vec2::new(700.0, 300.0),
            payload: None,
        },
        &mut graph,
    );

    let (Some(source), Some(sink)) = (source, sink) else {
        eprintln!("placement failed");
        return;
    };
    println!("Placed {} nodes", graph.node_count());

    // 3. Draw a wire from the source's output port to the sink's input port
    let to_screen = |kind: PortKind, id: NodeId| {
        let local = graph.port_position(id, kind, &canvas.config);
        canvas.view.canvas_to_screen(local)
    };
    let from = to_screen(PortKind::Output, source);
    let to = to_screen(PortKind::Input, sink);

    let gesture = [
        PointerEvent::Down { pos: from },
        PointerEvent::Move {
            pos: from.lerp(to, 0.5),
        },
        PointerEvent::Move { pos: to },
        PointerEvent::Up { pos: to },
    ];
    for event in gesture {
        for logic in canvas.handle_pointer(event, &mut graph) {
            println!("  {logic:?}");
        }
    }
    println!("Connections: {}", graph.connection_count());

    // 4. Drag the sink down by 80px
    let grab = canvas.view.canvas_to_screen(
        graph.node(sink).map(|n| n.position).unwrap_or_default() + Vec2::new(60.0, 30.0),
    );
    canvas.handle_pointer(PointerEvent::Down { pos: grab }, &mut graph);
    canvas.handle_pointer(
        PointerEvent::Move {
            pos: grab + Vec2::new(0.0, 80.0),
        },
        &mut graph,
    );
    canvas.handle_pointer(
        PointerEvent::Up {
            pos: grab + Vec2::new(0.0, 80.0),
        },
        &mut graph,
    );
    if let Some(node) = graph.node(sink) {
        println!("{} now at {:?}", node.label, node.position);
    }

    // 5. Render
    let draw_list = canvas.render(&graph);
    let wires = draw_list
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Bezier { .. }))
        .count();
    println!("Frame: {} draw commands ({} wire strokes)", draw_list.len(), wires);

    match serde_json::to_string_pretty(&canvas.snapshot(&graph)) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("snapshot failed: {err}"),
    }
}
