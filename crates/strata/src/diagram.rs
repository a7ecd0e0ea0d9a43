//! The laid-out network diagram.
//!
//! A [`Diagram`] owns its [`Layer`]s, each layer owns its [`Node`]s, and the
//! diagram owns one [`EdgeGroup`] per pair of adjacent layers. Nodes refer to
//! their connectors through [`EdgeId`] indices rather than owning them, so
//! the whole structure is plain data that can be cloned, compared and
//! serialized as a unit.
//!
//! Diagrams are produced by [`layout`](crate::layout::layout), then filled in
//! by [`connect`](crate::connect::connect) and
//! [`annotate`](crate::annotate::annotate). Those later passes only attach
//! derived data; the node topology never changes after layout.

use serde::Serialize;

use strata_core::{
    color::Color,
    geometry::{Bounds, Insets, Point, Size},
    network::{LayerKind, LayerSpec},
    stroke::StrokeDefinition,
};

use crate::config::LayoutConfig;

/// Identifies a node by its layer and its position within that layer.
///
/// For visible nodes `index` runs from 0 at the top of the layer. The
/// overflow placeholder of a truncated layer takes the index one past the
/// last visible node, so every id within a layer is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId {
    layer: usize,
    index: usize,
}

impl NodeId {
    pub fn new(layer: usize, index: usize) -> Self {
        Self { layer, index }
    }

    pub fn layer(self) -> usize {
        self.layer
    }

    pub fn index(self) -> usize {
        self.index
    }
}

/// Identifies an edge by its group (the index of its source layer) and its
/// position within the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeId {
    group: usize,
    index: usize,
}

impl EdgeId {
    pub fn new(group: usize, index: usize) -> Self {
        Self { group, index }
    }

    pub fn group(self) -> usize {
        self.group
    }

    pub fn index(self) -> usize {
        self.index
    }
}

/// One drawn unit of a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: NodeId,
    center: Point,
    radius: f32,
    is_overflow_placeholder: bool,
    edges_in: Vec<EdgeId>,
    edges_out: Vec<EdgeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, center: Point, radius: f32) -> Self {
        Self {
            id,
            center,
            radius,
            is_overflow_placeholder: false,
            edges_in: Vec::new(),
            edges_out: Vec::new(),
        }
    }

    pub(crate) fn placeholder(id: NodeId, center: Point, radius: f32) -> Self {
        Self {
            is_overflow_placeholder: true,
            ..Self::new(id, center, radius)
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn bounds(&self) -> Bounds {
        self.center.to_bounds(Size::square(2.0 * self.radius))
    }

    pub fn is_overflow_placeholder(&self) -> bool {
        self.is_overflow_placeholder
    }

    /// Edges arriving from the previous layer, in generation order.
    pub fn edges_in(&self) -> &[EdgeId] {
        &self.edges_in
    }

    /// Edges leaving toward the next layer, in generation order.
    pub fn edges_out(&self) -> &[EdgeId] {
        &self.edges_out
    }

    pub(crate) fn clear_edges(&mut self) {
        self.edges_in.clear();
        self.edges_out.clear();
    }

    pub(crate) fn push_edge_in(&mut self, edge: EdgeId) {
        self.edges_in.push(edge);
    }

    pub(crate) fn push_edge_out(&mut self, edge: EdgeId) {
        self.edges_out.push(edge);
    }
}

/// Elision details of a layer whose size exceeds the display cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overflow {
    placeholder: Node,
    /// The true layer size, shown once next to the layer.
    label: String,
    label_anchor: Point,
    head: usize,
    tail: usize,
}

impl Overflow {
    pub(crate) fn new(
        placeholder: Node,
        label: String,
        label_anchor: Point,
        head: usize,
        tail: usize,
    ) -> Self {
        Self {
            placeholder,
            label,
            label_anchor,
            head,
            tail,
        }
    }

    pub fn placeholder(&self) -> &Node {
        &self.placeholder
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Point to the left of the layer where the count label belongs.
    pub fn label_anchor(&self) -> Point {
        self.label_anchor
    }

    /// Number of visible nodes above the placeholder.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Number of visible nodes below the placeholder.
    pub fn tail(&self) -> usize {
        self.tail
    }
}

/// Resolved visual style of a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerStyle {
    stroke: StrokeDefinition,
    fill: Color,
}

impl LayerStyle {
    pub fn new(stroke: StrokeDefinition, fill: Color) -> Self {
        Self { stroke, fill }
    }

    /// Node outline stroke.
    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    /// Node fill color, including its opacity.
    pub fn fill(&self) -> Color {
        self.fill
    }
}

/// One stage of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    index: usize,
    spec: LayerSpec,
    center_x: f32,
    nodes: Vec<Node>,
    overflow: Option<Overflow>,
    style: Option<LayerStyle>,
}

impl Layer {
    pub(crate) fn new(
        index: usize,
        spec: LayerSpec,
        center_x: f32,
        nodes: Vec<Node>,
        overflow: Option<Overflow>,
    ) -> Self {
        Self {
            index,
            spec,
            center_x,
            nodes,
            overflow,
            style: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn spec(&self) -> &LayerSpec {
        &self.spec
    }

    pub fn kind(&self) -> &LayerKind {
        self.spec.kind()
    }

    /// Horizontal coordinate shared by every node of the layer.
    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    /// Visible nodes from top to bottom. Never includes the placeholder.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Number of visible nodes.
    pub fn displayed_count(&self) -> usize {
        self.nodes.len()
    }

    /// The size the layer was described with.
    pub fn total_count(&self) -> usize {
        self.spec.size()
    }

    pub fn is_truncated(&self) -> bool {
        self.overflow.is_some()
    }

    pub fn overflow(&self) -> Option<&Overflow> {
        self.overflow.as_ref()
    }

    /// Nodes above the placeholder; every node when the layer is not truncated.
    pub fn head_nodes(&self) -> &[Node] {
        match &self.overflow {
            Some(overflow) => &self.nodes[..overflow.head],
            None => &self.nodes,
        }
    }

    /// Nodes below the placeholder; empty when the layer is not truncated.
    pub fn tail_nodes(&self) -> &[Node] {
        match &self.overflow {
            Some(overflow) => &self.nodes[overflow.head..],
            None => &[],
        }
    }

    /// Style resolved by the annotation pass, if it has run.
    pub fn style(&self) -> Option<&LayerStyle> {
        self.style.as_ref()
    }

    pub(crate) fn set_style(&mut self, style: LayerStyle) {
        self.style = Some(style);
    }

    /// Bounding box of the visible nodes and the placeholder.
    pub fn bounds(&self) -> Bounds {
        let placeholder = self.overflow.as_ref().map(Overflow::placeholder);
        self.nodes
            .iter()
            .chain(placeholder)
            .map(Node::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_else(|| Point::new(self.center_x, 0.0).to_bounds(Size::default()))
    }
}

/// A connector from a node of layer *i* to a node of layer *i + 1*.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    start: Point,
    end: Point,
}

impl Edge {
    pub(crate) fn new(
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        start: Point,
        end: Point,
    ) -> Self {
        Self {
            id,
            source,
            target,
            start,
            end,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Point on the source node's outline where the connector starts.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Point on the target node's outline where the connector ends.
    pub fn end(&self) -> Point {
        self.end
    }
}

/// All connectors between one pair of adjacent layers, in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeGroup {
    source_layer: usize,
    edges: Vec<Edge>,
}

impl EdgeGroup {
    pub(crate) fn new(source_layer: usize, edges: Vec<Edge>) -> Self {
        Self {
            source_layer,
            edges,
        }
    }

    pub fn source_layer(&self) -> usize {
        self.source_layer
    }

    pub fn target_layer(&self) -> usize {
        self.source_layer + 1
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// What a [`Marker`] signals about its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// The layer reduces spatial resolution. Drawn as a triangle.
    Downsample,
    /// The layer is the final classification stage. Drawn as a star.
    Terminal,
}

/// A glyph placed above a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    kind: MarkerKind,
    layer: usize,
    center: Point,
    height: f32,
    color: Color,
}

impl Marker {
    pub(crate) fn new(
        kind: MarkerKind,
        layer: usize,
        center: Point,
        height: f32,
        color: Color,
    ) -> Self {
        Self {
            kind,
            layer,
            center,
            height,
            color,
        }
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn bounds(&self) -> Bounds {
        self.center.to_bounds(Size::square(self.height))
    }
}

/// Multi-line description placed below a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Caption {
    layer: usize,
    lines: Vec<String>,
    /// Top-center point of the caption text block.
    anchor: Point,
}

impl Caption {
    pub(crate) fn new(layer: usize, lines: Vec<String>, anchor: Point) -> Self {
        Self {
            layer,
            lines,
            anchor,
        }
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

/// One row of the diagram legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    color: Color,
    label: String,
}

impl LegendEntry {
    pub fn new(color: Color, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Horizontal alignment of a [`NodeLabel`] relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAlign {
    /// Text centered on the anchor, drawn inside the node.
    Center,
    /// Text starting at the anchor, drawn beside the node.
    Start,
}

/// Text attached to a single node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLabel {
    node: NodeId,
    text: String,
    anchor: Point,
    /// Text height in diagram units.
    height: f32,
    align: LabelAlign,
}

impl NodeLabel {
    pub(crate) fn new(
        node: NodeId,
        text: String,
        anchor: Point,
        height: f32,
        align: LabelAlign,
    ) -> Self {
        Self {
            node,
            text,
            anchor,
            height,
            align,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn align(&self) -> LabelAlign {
        self.align
    }
}

/// Styling shared by every connector of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorStyle {
    stroke: StrokeDefinition,
    highlight: Color,
    /// Arrowhead length at the target end; `None` draws plain lines.
    arrow_tip: Option<f32>,
}

impl ConnectorStyle {
    pub fn new(stroke: StrokeDefinition, highlight: Color) -> Self {
        Self {
            stroke,
            highlight,
            arrow_tip: None,
        }
    }

    pub fn with_arrow_tip(mut self, length: f32) -> Self {
        self.arrow_tip = Some(length);
        self
    }

    pub fn arrow_tip(&self) -> Option<f32> {
        self.arrow_tip
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    /// Stroke color for connectors on a highlighted data flow.
    pub fn highlight(&self) -> Color {
        self.highlight
    }
}

/// The complete, renderable network diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    layout: LayoutConfig,
    layers: Vec<Layer>,
    edge_groups: Vec<EdgeGroup>,
    connector_style: Option<ConnectorStyle>,
    markers: Vec<Marker>,
    captions: Vec<Caption>,
    labels: Vec<NodeLabel>,
    legend: Vec<LegendEntry>,
}

impl Diagram {
    pub(crate) fn new(layout: LayoutConfig, layers: Vec<Layer>) -> Self {
        Self {
            layout,
            layers,
            edge_groups: Vec::new(),
            connector_style: None,
            markers: Vec::new(),
            captions: Vec::new(),
            labels: Vec::new(),
            legend: Vec::new(),
        }
    }

    /// The layout parameters the diagram was built with.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Edge groups in layer order; empty until the connect pass has run.
    pub fn edge_groups(&self) -> &[EdgeGroup] {
        &self.edge_groups
    }

    pub(crate) fn set_edge_groups(&mut self, edge_groups: Vec<EdgeGroup>) {
        self.edge_groups = edge_groups;
    }

    /// Total number of connectors across all groups.
    pub fn edge_count(&self) -> usize {
        self.edge_groups.iter().map(EdgeGroup::len).sum()
    }

    /// Looks up a visible node. Overflow placeholders are reached through
    /// [`Layer::overflow`] instead.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let layer = self.layers.get(id.layer)?;
        layer.nodes.get(id.index)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let layer = self.layers.get_mut(id.layer)?;
        layer.nodes.get_mut(id.index)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_groups.get(id.group)?.edges.get(id.index)
    }

    pub fn connector_style(&self) -> Option<&ConnectorStyle> {
        self.connector_style.as_ref()
    }

    pub(crate) fn set_connector_style(&mut self, style: ConnectorStyle) {
        self.connector_style = Some(style);
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers attached to one layer, bottom-most first.
    pub fn markers_for(&self, layer: usize) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |marker| marker.layer == layer)
    }

    pub(crate) fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    pub(crate) fn set_captions(&mut self, captions: Vec<Caption>) {
        self.captions = captions;
    }

    /// Node labels in layer order, top to bottom within a layer.
    pub fn labels(&self) -> &[NodeLabel] {
        &self.labels
    }

    pub(crate) fn set_labels(&mut self, labels: Vec<NodeLabel>) {
        self.labels = labels;
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub(crate) fn set_legend(&mut self, legend: Vec<LegendEntry>) {
        self.legend = legend;
    }

    /// Bounding box of all layers and markers.
    ///
    /// Captions and overflow labels are excluded because their extent
    /// depends on the renderer's text metrics.
    pub fn bounds(&self) -> Bounds {
        let layer_bounds = self.layers.iter().map(Layer::bounds);
        let marker_bounds = self.markers.iter().map(Marker::bounds);
        layer_bounds
            .chain(marker_bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }

    /// Bounds grown by `padding`, suitable as a canvas viewport.
    pub fn canvas_bounds(&self, padding: Insets) -> Bounds {
        self.bounds().add_padding(padding)
    }
}
