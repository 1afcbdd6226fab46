//! Static description of the memory hierarchy.
//!
//! Every coordinate, port mapping, utilization figure and hit rate here is a
//! literal. Nothing is derived from a model. [`Topology::standard`] returns
//! the shared instance, built on first use.
//!
//! Edges reference nodes through [`Endpoint`]s, a `(node, side)` pair, and are
//! resolved against the constructed nodes by [`Diagram::construct`].
//!
//! [`Diagram::construct`]: crate::diagram::Diagram::construct

use std::sync::OnceLock;

use meshview_core::{
    color::Color,
    draw::{StrokeCap, StrokeDefinition, TextDefinition},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    scene::{NodeKind, Side},
};

/// Router mesh links above this utilization are drawn as busy.
///
/// The comparison is strict: a link at exactly this value is not busy.
pub const BUSY_LINK_THRESHOLD: f64 = 0.0181;

/// Offset of a utilization label from its link midpoint.
pub const LINK_LABEL_OFFSET: Point = Point::new(-20.0, -15.0);

/// Extent of the drawing canvas.
pub const CANVAS_SIZE: Size = Size::new(1800.0, 1200.0);

/// Zoom that frames the router mesh in close-up once the content is fitted.
///
/// The default view zoom is `1.0` so the whole hierarchy is visible; set
/// `view.zoom` to this value for the close-up.
pub const CLOSE_UP_VIEW_ZOOM: f32 = 2.8;

const ROUTER_POSITIONS: [(f32, f32); 6] = [
    (700.0, 300.0),
    (900.0, 300.0),
    (900.0, 500.0),
    (700.0, 500.0),
    (500.0, 400.0),
    (1100.0, 400.0),
];
const CORE_ROWS: [f32; 4] = [200.0, 400.0, 600.0, 800.0];
const CPU_COLUMN: f32 = 200.0;
const L1_COLUMN: f32 = 350.0;
const L2_COLUMN: f32 = 500.0;
const L3_POSITIONS: [(f32, f32); 4] = [(700.0, 600.0), (900.0, 600.0), (900.0, 700.0), (700.0, 700.0)];
const MEMORY_POSITION: (f32, f32) = (500.0, 700.0);

/// Router each L2 cache's bus port is wired to.
const L2_ROUTERS: [usize; 4] = [0, 1, 3, 4];

/// Router mesh: `(from, to, utilization, from side, to side)`.
const ROUTER_LINKS: [(usize, usize, f64, Side, Side); 12] = [
    (0, 1, 0.0181, Side::Right, Side::Left),
    (0, 5, 0.0052, Side::Top, Side::Bottom),
    (1, 0, 0.0154, Side::Left, Side::Right),
    (1, 2, 0.0161, Side::Bottom, Side::Top),
    (2, 1, 0.0163, Side::Top, Side::Bottom),
    (2, 3, 0.0145, Side::Left, Side::Right),
    (3, 2, 0.0066, Side::Right, Side::Left),
    (3, 4, 0.0082, Side::Bottom, Side::Top),
    (4, 3, 0.0034, Side::Top, Side::Bottom),
    (4, 5, 0.0071, Side::Right, Side::Left),
    (5, 0, 0.0071, Side::Bottom, Side::Top),
    (5, 4, 0.0052, Side::Left, Side::Right),
];

/// `(instructions, cycles, L1 hit rate)` per core.
const CPU_PERF: [(u32, u32, f32); 4] = [
    (31189, 85339, 97.5),
    (34298, 87306, 95.0),
    (10333, 28999, 98.7),
    (9921, 27904, 98.8),
];
const L2_HIT_RATES: [f64; 4] = [0.165, 0.092, 0.056, 0.058];
const L3_HIT_RATES: [f64; 4] = [0.362, 0.385, 0.400, 0.395];

/// Fill colors for each node kind and highlighted paths.
#[derive(Debug, Clone)]
pub struct Palette {
    pub cpu: Color,
    pub l1: Color,
    pub l2: Color,
    pub l3: Color,
    pub memory: Color,
    pub router: Color,
    pub busy_path: Color,
    pub nuca_path: Color,
}

impl Palette {
    pub fn fill_for(&self, kind: NodeKind) -> Color {
        match kind {
            NodeKind::Router => self.router,
            NodeKind::Cpu => self.cpu,
            NodeKind::L1Cache => self.l1,
            NodeKind::L2Cache => self.l2,
            NodeKind::L3Cache => self.l3,
            NodeKind::Memory => self.memory,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            cpu: Color::rgb(211, 211, 211),
            l1: Color::rgb(255, 215, 0),
            l2: Color::rgb(30, 144, 255),
            l3: Color::rgb(50, 205, 50),
            memory: Color::rgb(255, 99, 71),
            router: Color::rgb(240, 248, 255),
            busy_path: Color::rgb(220, 20, 60),
            nuca_path: Color::rgb(106, 90, 205),
        }
    }
}

/// A `(node, side)` reference used by edge tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    node: Id,
    side: Side,
}

impl Endpoint {
    pub fn new(node: impl Into<Id>, side: Side) -> Self {
        Self {
            node: node.into(),
            side,
        }
    }

    pub fn node(&self) -> Id {
        self.node
    }

    pub fn side(&self) -> Side {
        self.side
    }
}

/// A node to place on the canvas.
#[derive(Debug, Clone)]
pub struct NodeDescriptor {
    id: Id,
    label: String,
    kind: NodeKind,
    origin: Point,
    size: Size,
    sides: Vec<Side>,
    detail_text: Option<String>,
}

impl NodeDescriptor {
    pub fn new(id: impl Into<Id>, kind: NodeKind, origin: Point, size: Size, sides: &[Side]) -> Self {
        let id = id.into();
        Self {
            id,
            label: id.to_string(),
            kind,
            origin,
            size,
            sides: sides.to_vec(),
            detail_text: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_detail_text(mut self, text: impl Into<String>) -> Self {
        self.detail_text = Some(text.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Attachment sides in declaration order.
    pub fn sides(&self) -> &[Side] {
        &self.sides
    }

    /// Explicit detail text, `None` keeps the node's default.
    pub fn detail_text(&self) -> Option<&str> {
        self.detail_text.as_deref()
    }
}

/// A straight hierarchy edge between two endpoints.
#[derive(Debug, Clone)]
pub struct EdgeDescriptor {
    from: Endpoint,
    to: Endpoint,
    stroke: StrokeDefinition,
}

impl EdgeDescriptor {
    pub fn new(from: Endpoint, to: Endpoint, stroke: StrokeDefinition) -> Self {
        Self { from, to, stroke }
    }

    pub fn from(&self) -> Endpoint {
        self.from
    }

    pub fn to(&self) -> Endpoint {
        self.to
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

/// A directed router-to-router link with its utilization.
#[derive(Debug, Clone, Copy)]
pub struct LinkDescriptor {
    from: Endpoint,
    to: Endpoint,
    utilization: f64,
}

impl LinkDescriptor {
    pub fn new(from: Endpoint, to: Endpoint, utilization: f64) -> Self {
        Self {
            from,
            to,
            utilization,
        }
    }

    pub fn from(&self) -> Endpoint {
        self.from
    }

    pub fn to(&self) -> Endpoint {
        self.to
    }

    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    /// True when utilization is strictly above [`BUSY_LINK_THRESHOLD`].
    pub fn is_busy(&self) -> bool {
        self.utilization > BUSY_LINK_THRESHOLD
    }
}

/// Where an annotation is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Absolute canvas position.
    Absolute(Point),
    /// Offset from a node's top-left corner.
    Node(Id, Point),
}

/// Static text overlaid on the diagram.
#[derive(Debug, Clone)]
pub struct Annotation {
    placement: Placement,
    text: String,
    definition: TextDefinition,
}

impl Annotation {
    pub fn new(placement: Placement, text: impl Into<String>, definition: TextDefinition) -> Self {
        Self {
            placement,
            text: text.into(),
            definition,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }
}

/// A color swatch and its caption.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    label: String,
    color: Color,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Legend panel geometry and entries.
#[derive(Debug, Clone)]
pub struct Legend {
    background: Bounds,
    fill: Color,
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// Top-left of the first swatch.
    pub const SWATCH_ORIGIN: Point = Point::new(70.0, 80.0);
    pub const SWATCH_SIZE: Size = Size::new(20.0, 15.0);
    /// Top-left of the first caption.
    pub const LABEL_ORIGIN: Point = Point::new(100.0, 75.0);
    pub const ROW_STEP: f32 = 25.0;

    pub fn new(background: Bounds, fill: Color, entries: Vec<LegendEntry>) -> Self {
        Self {
            background,
            fill,
            entries,
        }
    }

    pub fn background(&self) -> Bounds {
        self.background
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Swatch rectangle for row `index`.
    pub fn swatch_bounds(index: usize) -> Bounds {
        let origin = Self::SWATCH_ORIGIN.add_point(Point::new(0.0, Self::ROW_STEP * index as f32));
        Bounds::new_from_top_left(origin, Self::SWATCH_SIZE)
    }

    /// Caption position for row `index`.
    pub fn label_position(index: usize) -> Point {
        Self::LABEL_ORIGIN.add_point(Point::new(0.0, Self::ROW_STEP * index as f32))
    }
}

/// Everything needed to construct the diagram.
#[derive(Debug, Clone)]
pub struct Topology {
    canvas: Size,
    palette: Palette,
    nodes: Vec<NodeDescriptor>,
    edges: Vec<EdgeDescriptor>,
    links: Vec<LinkDescriptor>,
    annotations: Vec<Annotation>,
    legend: Legend,
    nuca_path: Vec<Endpoint>,
    nuca_label: String,
    busy_marker: Option<Endpoint>,
}

impl Topology {
    /// Creates an empty topology with the standard canvas and palette.
    pub fn empty() -> Self {
        let palette = Palette::default();
        Self {
            canvas: CANVAS_SIZE,
            legend: Legend::new(Bounds::default(), palette.router, Vec::new()),
            palette,
            nodes: Vec::new(),
            edges: Vec::new(),
            links: Vec::new(),
            annotations: Vec::new(),
            nuca_path: Vec::new(),
            nuca_label: String::new(),
            busy_marker: None,
        }
    }

    /// The fixed processor topology, built once.
    pub fn standard() -> &'static Topology {
        static STANDARD: OnceLock<Topology> = OnceLock::new();
        STANDARD.get_or_init(build_standard)
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeDescriptor] {
        &self.edges
    }

    pub fn links(&self) -> &[LinkDescriptor] {
        &self.links
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Vertices of the highlighted cross-node NUCA access path.
    pub fn nuca_path(&self) -> &[Endpoint] {
        &self.nuca_path
    }

    pub fn nuca_label(&self) -> &str {
        &self.nuca_label
    }

    /// Attachment point marked as the bottleneck, if any.
    pub fn busy_marker(&self) -> Option<Endpoint> {
        self.busy_marker
    }

    pub fn add_node(&mut self, node: NodeDescriptor) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: EdgeDescriptor) {
        self.edges.push(edge);
    }

    pub fn add_link(&mut self, link: LinkDescriptor) {
        self.links.push(link);
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn set_legend(&mut self, legend: Legend) {
        self.legend = legend;
    }

    pub fn set_nuca_path(&mut self, path: Vec<Endpoint>, label: impl Into<String>) {
        self.nuca_path = path;
        self.nuca_label = label.into();
    }

    pub fn set_busy_marker(&mut self, endpoint: Endpoint) {
        self.busy_marker = Some(endpoint);
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::standard().clone()
    }
}

fn text_style(size: u16, bold: bool, color: Option<Color>) -> TextDefinition {
    let mut definition = TextDefinition::new();
    definition.set_font_size(size);
    definition.set_bold(bold);
    definition.set_color(color);
    definition
}

fn hierarchy_stroke(color: &str, width: f32) -> StrokeDefinition {
    let color = Color::new(color).unwrap_or_default();
    StrokeDefinition::solid(color, width).with_cap(StrokeCap::Round)
}

fn router_id(index: usize) -> Id {
    Id::indexed("Router", index)
}

fn cpu_detail(index: usize) -> String {
    format!(
        "<b>CPU{index} details:</b><br>\
         • Architecture: ARMv8.2<br>\
         • Frequency: 2.5GHz<br>\
         • Cores: 4<br>\
         • Caches:<br>\
         &nbsp;&nbsp;- L1i: 32KB<br>\
         &nbsp;&nbsp;- L1d: 32KB<br>\
         • Power: 15W<br>\
         • Instructions: {}/s",
        index * 20000 + 30000
    )
}

fn l1_detail(index: usize) -> String {
    format!(
        "<b>L1_{index} cache:</b><br>\
         • Type: level-1 cache<br>\
         • Size: 64KB (32KB instruction + 32KB data)<br>\
         • Latency: 0.8ns<br>\
         • Associativity: 4-way<br>\
         • Hit rate: {}%",
        96 + index
    )
}

fn l2_detail(index: usize) -> String {
    format!(
        "<b>L2Cache{index}:</b><br>\
         • Type: level-2 cache<br>\
         • Bus port: {}<br>\
         • Ways: 8<br>\
         • Sets: 128<br>\
         • MSHRs: 8<br>\
         • Index latency: 4 cycles<br>\
         • Hit rate: {}%",
        router_id(L2_ROUTERS[index]),
        96 + index
    )
}

fn l3_detail(index: usize) -> String {
    format!(
        "<b>L3Cache{index}:</b><br>\
         • Type: shared level-3 cache<br>\
         • Bus port: {}<br>\
         • Ways: 8<br>\
         • Sets: 512<br>\
         • MSHRs: 8<br>\
         • Index latency: 10 cycles<br>\
         • NUCA index: {index}/4<br>\
         • Hit rate: {}%",
        router_id(index),
        96 + index
    )
}

const ROUTER0_DETAIL: &str = "<b>Router0 details:</b><br>\
    • Type: central router<br>\
    • Ports: 4 (top/bottom/left/right)<br>\
    • Connections: 5<br>\
    • Average latency: 3.2ns<br>\
    • Peak bandwidth: 20GB/s<br>\
    <b>Port map:</b><br>\
    • Port1: L3Cache0<br>\
    • Port2: CPU0 subsystem";

const MEMORY_DETAIL: &str = "<b>Memory subsystem:</b><br>\
    • Capacity: 16GB DDR4<br>\
    • Frequency: 3200MHz<br>\
    • Channels: 2<br>\
    • Peak bandwidth: 45GB/s<br>\
    • Average latency: 85ns<br>\
    • Current usage: 68%";

fn build_standard() -> Topology {
    let mut topology = Topology::empty();
    let palette = topology.palette().clone();

    for (index, (x, y)) in ROUTER_POSITIONS.into_iter().enumerate() {
        let mut router = NodeDescriptor::new(
            router_id(index),
            NodeKind::Router,
            Point::new(x, y),
            Size::new(120.0, 70.0),
            &Side::ALL,
        );
        if index == 5 {
            router = router.with_label("Router5 (idle)");
        }
        if index == 0 {
            router = router.with_detail_text(ROUTER0_DETAIL);
        }
        topology.add_node(router);
    }

    let core_sides = [Side::Left, Side::Right];
    for (index, row) in CORE_ROWS.into_iter().enumerate() {
        topology.add_node(
            NodeDescriptor::new(
                Id::indexed("CPU", index),
                NodeKind::Cpu,
                Point::new(CPU_COLUMN, row),
                Size::new(120.0, 60.0),
                &core_sides,
            )
            .with_detail_text(cpu_detail(index)),
        );
        topology.add_node(
            NodeDescriptor::new(
                Id::indexed("L1_", index),
                NodeKind::L1Cache,
                Point::new(L1_COLUMN, row),
                Size::new(100.0, 60.0),
                &core_sides,
            )
            .with_detail_text(l1_detail(index)),
        );
        topology.add_node(
            NodeDescriptor::new(
                Id::indexed("L2Cache", index),
                NodeKind::L2Cache,
                Point::new(L2_COLUMN, row),
                Size::new(120.0, 50.0),
                &core_sides,
            )
            .with_detail_text(l2_detail(index)),
        );

        topology.add_edge(EdgeDescriptor::new(
            Endpoint::new(Id::indexed("CPU", index), Side::Right),
            Endpoint::new(Id::indexed("L1_", index), Side::Left),
            hierarchy_stroke("black", 2.0),
        ));
        topology.add_edge(EdgeDescriptor::new(
            Endpoint::new(Id::indexed("L1_", index), Side::Right),
            Endpoint::new(Id::indexed("L2Cache", index), Side::Left),
            hierarchy_stroke("darkgray", 2.0),
        ));
        topology.add_edge(EdgeDescriptor::new(
            Endpoint::new(Id::indexed("L2Cache", index), Side::Right),
            Endpoint::new(router_id(L2_ROUTERS[index]), Side::Left),
            hierarchy_stroke("black", 2.0),
        ));
    }

    for (index, (x, y)) in L3_POSITIONS.into_iter().enumerate() {
        topology.add_node(
            NodeDescriptor::new(
                Id::indexed("L3Cache", index),
                NodeKind::L3Cache,
                Point::new(x, y),
                Size::new(150.0, 60.0),
                &[Side::Left, Side::Right, Side::Top],
            )
            .with_detail_text(l3_detail(index)),
        );
        topology.add_edge(EdgeDescriptor::new(
            Endpoint::new(Id::indexed("L3Cache", index), Side::Top),
            Endpoint::new(router_id(index), Side::Bottom),
            hierarchy_stroke("darkgreen", 2.0),
        ));
    }

    topology.add_node(
        NodeDescriptor::new(
            "Memory",
            NodeKind::Memory,
            Point::new(MEMORY_POSITION.0, MEMORY_POSITION.1),
            Size::new(200.0, 80.0),
            &[Side::Left, Side::Right, Side::Top],
        )
        .with_detail_text(MEMORY_DETAIL),
    );
    topology.add_edge(EdgeDescriptor::new(
        Endpoint::new("Memory", Side::Top),
        Endpoint::new(router_id(2), Side::Bottom),
        hierarchy_stroke("darkred", 3.0),
    ));

    for (from, to, utilization, from_side, to_side) in ROUTER_LINKS {
        topology.add_link(LinkDescriptor::new(
            Endpoint::new(router_id(from), from_side),
            Endpoint::new(router_id(to), to_side),
            utilization,
        ));
    }

    add_annotations(&mut topology);

    topology.set_legend(Legend::new(
        Bounds::new_from_top_left(Point::new(50.0, 50.0), Size::new(300.0, 200.0)),
        Color::rgba(240, 240, 240, 220),
        vec![
            LegendEntry::new("CPU", palette.cpu),
            LegendEntry::new("L1 cache", palette.l1),
            LegendEntry::new("L2 cache", palette.l2),
            LegendEntry::new("L3 cache", palette.l3),
            LegendEntry::new("Router", palette.router),
            LegendEntry::new("Memory", palette.memory),
            LegendEntry::new("Busy path", palette.busy_path),
            LegendEntry::new("NUCA access", palette.nuca_path),
        ],
    ));

    topology.set_nuca_path(
        vec![
            Endpoint::new("CPU0", Side::Right),
            Endpoint::new("L1_0", Side::Left),
            Endpoint::new("L2Cache0", Side::Right),
            Endpoint::new("Router0", Side::Right),
            Endpoint::new("Router1", Side::Left),
            Endpoint::new("L3Cache1", Side::Top),
        ],
        "Cross-node NUCA access",
    );
    topology.set_busy_marker(Endpoint::new("Router0", Side::Right));

    topology
}

fn add_annotations(topology: &mut Topology) {
    let dark_blue = Color::new("darkblue").ok();

    topology.add_annotation(Annotation::new(
        Placement::Node(router_id(0), Point::new(130.0, 10.0)),
        "Port1: L3Cache0",
        text_style(10, false, dark_blue),
    ));

    for (index, (instructions, cycles, l1_hit)) in CPU_PERF.into_iter().enumerate() {
        topology.add_annotation(Annotation::new(
            Placement::Node(Id::indexed("CPU", index), Point::new(-50.0, 70.0)),
            format!("Instructions: {instructions}\nCycles: {cycles}\nL1 hit rate: {l1_hit:.1}%"),
            text_style(8, false, None),
        ));
    }

    for (index, rate) in L2_HIT_RATES.into_iter().enumerate() {
        topology.add_annotation(Annotation::new(
            Placement::Node(Id::indexed("L2Cache", index), Point::new(130.0, 10.0)),
            format!("L2 hit rate: {:.1}%", rate * 100.0),
            TextDefinition::new(),
        ));
    }

    for (index, rate) in L3_HIT_RATES.into_iter().enumerate() {
        topology.add_annotation(Annotation::new(
            Placement::Node(Id::indexed("L3Cache", index), Point::new(160.0, 10.0)),
            format!("L3 hit rate: {:.1}%", rate * 100.0),
            TextDefinition::new(),
        ));
    }

    topology.add_annotation(Annotation::new(
        Placement::Absolute(Point::new(500.0, 790.0)),
        "Memory usage: 0.8%",
        TextDefinition::new(),
    ));

    topology.add_annotation(Annotation::new(
        Placement::Absolute(Point::new(650.0, 50.0)),
        "Three-Level Cache NUCA Topology",
        text_style(18, true, None),
    ));
}
