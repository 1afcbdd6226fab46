//! Integration tests for the DiagramBuilder API

use meshview::{
    DiagramBuilder, Inspector, MeshviewError,
    config::{AppConfig, StyleConfig, ViewConfig, WindowConfig},
    scene::NodeKind,
    topology::{BUSY_LINK_THRESHOLD, CLOSE_UP_VIEW_ZOOM, Topology},
};

#[test]
fn test_build_standard_diagram() {
    let builder = DiagramBuilder::default();
    let diagram = builder.build().expect("Failed to build diagram");

    assert_eq!(diagram.node_count(), 23);
    assert_eq!(diagram.edges().len(), 29);
    assert_eq!(diagram.router_links().len(), 12);
    assert_eq!(diagram.nodes_of_kind(NodeKind::Router).count(), 6);
    assert_eq!(diagram.nodes_of_kind(NodeKind::Cpu).count(), 4);
    assert_eq!(diagram.nodes_of_kind(NodeKind::L3Cache).count(), 4);
    assert_eq!(diagram.connectivity().component_count(), 1);
}

#[test]
fn test_busy_threshold_is_strict() {
    let diagram = DiagramBuilder::default().build().unwrap();

    let boundary = diagram
        .router_links()
        .iter()
        .find(|link| link.from() == "Router0" && link.to() == "Router1")
        .expect("Router0 -> Router1 link");
    assert_eq!(boundary.utilization(), BUSY_LINK_THRESHOLD);
    assert!(!boundary.is_busy());
    assert!(diagram.router_links().iter().all(|link| !link.is_busy()));
}

#[test]
fn test_build_from_empty_topology() {
    let builder = DiagramBuilder::default();
    let diagram = builder
        .build_from(&Topology::empty())
        .expect("an empty topology has nothing to resolve");

    assert_eq!(diagram.node_count(), 0);
    assert!(diagram.edges().is_empty());
    assert!(Topology::empty().busy_marker().is_none());
    assert!(Topology::standard().busy_marker().is_some());
}

#[test]
fn test_render_svg() {
    let builder = DiagramBuilder::default();
    let diagram = builder.build().unwrap();
    let result = builder.render_svg(&diagram);

    match result {
        Ok(svg) => {
            assert!(svg.contains("<svg"), "Output should contain SVG tag");
            assert!(svg.contains("</svg>"), "Output should be complete SVG");
            assert!(svg.contains("Three-Level Cache NUCA Topology"));
            assert!(svg.contains("Cross-node NUCA access"));
            assert!(svg.contains("id=\"detail-Memory\""));
        }
        Err(err) => panic!("Failed to render: {err:?}"),
    }
}

#[test]
fn test_write_svg_into_writer() {
    let builder = DiagramBuilder::default();
    let diagram = builder.build().unwrap();

    let buffer = builder.write_svg(&diagram, Vec::new()).unwrap();
    let rendered = builder.render_svg(&diagram).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), rendered);
}

#[test]
fn test_custom_window_and_background() {
    let config = AppConfig::new(
        WindowConfig::new("Mesh", 800.0, 600.0),
        ViewConfig::new(10.0, 1.5),
        StyleConfig::new(Some("white".to_string())),
    );
    let builder = DiagramBuilder::new(config);
    let diagram = builder.build().unwrap();
    let svg = builder.render_svg(&diagram).unwrap();

    assert!(svg.contains("<title>Mesh</title>"));
    assert!(svg.contains("viewBox=\"0 0 800 600\""));
    assert!(svg.contains("width=\"100%\""));
}

#[test]
fn test_close_up_zoom_shows_router_mesh_only() {
    let default = DiagramBuilder::default();
    let diagram = default.build().unwrap();
    let close_up = DiagramBuilder::new(AppConfig::new(
        WindowConfig::default(),
        ViewConfig::new(20.0, CLOSE_UP_VIEW_ZOOM),
        StyleConfig::default(),
    ));

    let fitted = default.viewport(&diagram).unwrap();
    let zoomed = close_up.viewport(&diagram).unwrap();
    assert!((zoomed.scale() - fitted.scale() * 2.8).abs() < 1e-4);

    let visible = zoomed.visible_bounds();
    assert!(visible.contains(diagram.node("Router3").unwrap().position()));
    assert!(!visible.contains(diagram.node("CPU0").unwrap().position()));
}

#[test]
fn test_invalid_config_values() {
    let diagram = DiagramBuilder::default().build().unwrap();

    let bad_color = DiagramBuilder::new(AppConfig::new(
        WindowConfig::default(),
        ViewConfig::default(),
        StyleConfig::new(Some("not-a-color".to_string())),
    ));
    assert!(matches!(bad_color.render_svg(&diagram), Err(MeshviewError::Export(_))));

    let bad_zoom = DiagramBuilder::new(AppConfig::new(
        WindowConfig::default(),
        ViewConfig::new(20.0, 0.0),
        StyleConfig::default(),
    ));
    assert!(matches!(bad_zoom.render_svg(&diagram), Err(MeshviewError::Config(_))));
}

#[test]
fn test_inspect_and_panel_lifecycle() {
    let builder = DiagramBuilder::default();
    let diagram = builder.build().unwrap();

    let panel = builder.inspect(&diagram, "L3Cache0").unwrap();
    assert_eq!(panel.title(), diagram.node("L3Cache0").unwrap().label());
    assert!(panel.to_plain_text().contains("NUCA index: 0/4"));

    let mut inspector = Inspector::new();
    let first = inspector.press(&diagram, "CPU0").unwrap();
    let second = inspector.press(&diagram, "Router5").unwrap();
    assert_eq!(inspector.open_count(), 2);

    inspector.close(first);
    assert_eq!(inspector.open_count(), 1);
    assert_eq!(inspector.panel(second).unwrap().title(), "Router5 (idle)");
    assert_eq!(diagram.node_count(), 23);
}

#[test]
fn test_inspect_unknown_node() {
    let builder = DiagramBuilder::default();
    let diagram = builder.build().unwrap();
    let err = builder.inspect(&diagram, "Nowhere").unwrap_err();
    assert_eq!(err.to_string(), "Unknown node `Nowhere`");
}

#[test]
fn test_build_from_invalid_topology() {
    use meshview::{
        draw::StrokeDefinition,
        geometry::{Point, Size},
        scene::Side,
        topology::{EdgeDescriptor, Endpoint, NodeDescriptor},
    };

    let mut topology = Topology::empty();
    topology.add_node(NodeDescriptor::new(
        "A",
        NodeKind::Cpu,
        Point::new(0.0, 0.0),
        Size::new(100.0, 60.0),
        &[Side::Right],
    ));
    topology.add_edge(EdgeDescriptor::new(
        Endpoint::new("A", Side::Right),
        Endpoint::new("B", Side::Left),
        StrokeDefinition::default(),
    ));

    let result = DiagramBuilder::default().build_from(&topology);
    assert!(matches!(result, Err(MeshviewError::Graph(_))));
}
