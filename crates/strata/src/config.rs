//! Configuration types for Strata diagram layout.
//!
//! This module provides configuration structures that control how network
//! diagrams are laid out, styled, marked and captioned. All types implement
//! [`serde::Deserialize`] for loading from external sources, and every field
//! falls back to the canonical MobileNet skin when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`LayoutConfig`] - Display cap and spacing used by the layout engine.
//! - [`StyleConfig`] - Layer kind to color mapping and connector styling.
//! - [`CaptionConfig`] - Input resolution used to describe each layer.
//! - [`LabelConfig`] - Per-node symbols and output texts.
//! - [`MarkerRule`] - Rules that attach downsampling and terminal markers.
//!
//! # Example
//!
//! ```
//! # use strata::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().max_shown_nodes(), 16);
//! assert!(config.layout().validate().is_ok());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{StrataError, annotate::MarkerRule};

/// Top-level configuration combining layout, style, marker and caption settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    /// Marker rules, evaluated in order for every layer.
    #[serde(default = "MarkerRule::canonical")]
    markers: Vec<MarkerRule>,

    #[serde(default)]
    captions: CaptionConfig,

    #[serde(default)]
    labels: LabelConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            style: StyleConfig::default(),
            markers: MarkerRule::canonical(),
            captions: CaptionConfig::default(),
            labels: LabelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        layout: LayoutConfig,
        style: StyleConfig,
        markers: Vec<MarkerRule>,
        captions: CaptionConfig,
    ) -> Self {
        Self {
            layout,
            style,
            markers,
            captions,
            labels: LabelConfig::default(),
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn markers(&self) -> &[MarkerRule] {
        &self.markers
    }

    pub fn captions(&self) -> &CaptionConfig {
        &self.captions
    }

    pub fn labels(&self) -> &LabelConfig {
        &self.labels
    }

    /// Returns a copy of this configuration with a different layout section.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    pub fn with_markers(mut self, markers: Vec<MarkerRule>) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_labels(mut self, labels: LabelConfig) -> Self {
        self.labels = labels;
        self
    }
}

/// Display cap and spacing parameters for the layout engine.
///
/// Lengths are in diagram units (SVG pixels when rendered 1:1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Largest number of nodes drawn for one layer before it is truncated.
    max_shown_nodes: usize,
    node_radius: f32,
    /// Vertical gap between neighbouring nodes of a layer.
    node_gap: f32,
    /// Horizontal gap between neighbouring layers.
    layer_gap: f32,
    /// Gap between a layer's bounds and the markers stacked above it.
    marker_gap: f32,
    /// Gap between a layer's bounds and its caption below it.
    caption_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_shown_nodes: 16,
            node_radius: 15.0,
            node_gap: 20.0,
            layer_gap: 130.0,
            marker_gap: 10.0,
            caption_gap: 20.0,
        }
    }
}

impl LayoutConfig {
    pub fn max_shown_nodes(&self) -> usize {
        self.max_shown_nodes
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    pub fn node_gap(&self) -> f32 {
        self.node_gap
    }

    pub fn layer_gap(&self) -> f32 {
        self.layer_gap
    }

    pub fn marker_gap(&self) -> f32 {
        self.marker_gap
    }

    pub fn caption_gap(&self) -> f32 {
        self.caption_gap
    }

    /// Width of a layer column, i.e. one node diameter.
    pub fn layer_width(&self) -> f32 {
        2.0 * self.node_radius
    }

    /// Vertical distance between the centers of neighbouring nodes.
    pub fn node_pitch(&self) -> f32 {
        2.0 * self.node_radius + self.node_gap
    }

    /// Horizontal distance between the centers of neighbouring layers.
    pub fn layer_pitch(&self) -> f32 {
        self.layer_width() + self.layer_gap
    }

    pub fn with_max_shown_nodes(mut self, max_shown_nodes: usize) -> Self {
        self.max_shown_nodes = max_shown_nodes;
        self
    }

    pub fn with_node_radius(mut self, node_radius: f32) -> Self {
        self.node_radius = node_radius;
        self
    }

    pub fn with_node_gap(mut self, node_gap: f32) -> Self {
        self.node_gap = node_gap;
        self
    }

    pub fn with_layer_gap(mut self, layer_gap: f32) -> Self {
        self.layer_gap = layer_gap;
        self
    }

    /// Checks that the configuration can produce a layout.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::InvalidConfig`] when `max_shown_nodes` is below
    /// 2, when `node_radius`, `node_gap` or `layer_gap` is not strictly
    /// positive, or when a marker or caption gap is negative or not finite.
    pub fn validate(&self) -> Result<(), StrataError> {
        if self.max_shown_nodes < 2 {
            return Err(StrataError::invalid_config(format!(
                "max_shown_nodes must be at least 2, got {}",
                self.max_shown_nodes
            )));
        }

        for (name, value) in [
            ("node_radius", self.node_radius),
            ("node_gap", self.node_gap),
            ("layer_gap", self.layer_gap),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(StrataError::invalid_config(format!(
                    "{name} must be strictly positive, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("marker_gap", self.marker_gap),
            ("caption_gap", self.caption_gap),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(StrataError::invalid_config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Visual styling configuration, as CSS color strings.
///
/// Colors are parsed when a [`StyleResolver`](crate::annotate::StyleResolver)
/// is created from this section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Outline color per layer kind name (`"input"`, `"dw"`, ...).
    layer_colors: IndexMap<String, String>,
    /// Outline color for kinds missing from `layer_colors`.
    default_color: String,
    node_stroke_width: f32,
    node_fill: String,
    node_fill_opacity: f32,
    edge_color: String,
    edge_width: f32,
    edge_style: String,
    /// Draw connectors as arrows pointing at the next layer.
    edge_arrow: bool,
    /// Arrowhead length, used when `edge_arrow` is set.
    arrow_tip_size: f32,
    /// Color used by renderers to highlight a traced data flow.
    highlight_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let layer_colors = [
            ("input", "#FFFFFF"),
            ("conv", "#58C4DD"),
            ("dw", "#83C167"),
            ("pw", "#5CD0B3"),
            ("fc", "#F0AC5F"),
            ("hidden", "#BBBBBB"),
        ]
        .into_iter()
        .map(|(kind, color)| (kind.to_string(), color.to_string()))
        .collect();

        Self {
            layer_colors,
            default_color: "#BBBBBB".to_string(),
            node_stroke_width: 2.0,
            node_fill: "black".to_string(),
            node_fill_opacity: 0.8,
            edge_color: "#BBBBBB".to_string(),
            edge_width: 1.5,
            edge_style: "solid".to_string(),
            edge_arrow: false,
            arrow_tip_size: 10.0,
            highlight_color: "#FFFF00".to_string(),
        }
    }
}

impl StyleConfig {
    pub fn layer_colors(&self) -> &IndexMap<String, String> {
        &self.layer_colors
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    pub fn node_stroke_width(&self) -> f32 {
        self.node_stroke_width
    }

    pub fn node_fill(&self) -> &str {
        &self.node_fill
    }

    pub fn node_fill_opacity(&self) -> f32 {
        self.node_fill_opacity
    }

    pub fn edge_color(&self) -> &str {
        &self.edge_color
    }

    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }

    pub fn edge_style(&self) -> &str {
        &self.edge_style
    }

    pub fn edge_arrow(&self) -> bool {
        self.edge_arrow
    }

    pub fn arrow_tip_size(&self) -> f32 {
        self.arrow_tip_size
    }

    pub fn highlight_color(&self) -> &str {
        &self.highlight_color
    }

    /// Sets the outline color for one layer kind, replacing any previous entry.
    pub fn with_layer_color(mut self, kind: impl Into<String>, color: impl Into<String>) -> Self {
        self.layer_colors.insert(kind.into(), color.into());
        self
    }

    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    /// Turns connectors into arrows with the given tip length.
    pub fn with_arrows(mut self, tip_size: f32) -> Self {
        self.edge_arrow = true;
        self.arrow_tip_size = tip_size;
        self
    }
}

/// Settings for per-layer captions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    enabled: bool,
    /// Side length of the (square) input image.
    input_resolution: u32,
    input_channels: u32,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            input_resolution: 224,
            input_channels: 3,
        }
    }
}

impl CaptionConfig {
    pub fn new(enabled: bool, input_resolution: u32, input_channels: u32) -> Self {
        Self {
            enabled,
            input_resolution,
            input_channels,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn input_resolution(&self) -> u32 {
        self.input_resolution
    }

    pub fn input_channels(&self) -> u32 {
        self.input_channels
    }
}

/// Per-node labels.
///
/// Symbols are numbered by unit, so `inputs = "x"` labels the nodes of the
/// first layer `x_{1}`, `x_{2}`, ... In a truncated layer the tail nodes
/// carry the numbers of the last units. Nothing is labelled by default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Symbol for the nodes of the first layer.
    inputs: Option<String>,
    /// Symbol for the nodes of every layer between the first and the last.
    hidden: Option<String>,
    /// Symbol for the nodes of the last layer.
    outputs: Option<String>,
    /// Text per unit of the last layer, drawn to the right of the node.
    /// Takes the place of `outputs` when not empty.
    output_texts: Vec<String>,
}

impl LabelConfig {
    pub fn inputs(&self) -> Option<&str> {
        self.inputs.as_deref()
    }

    pub fn hidden(&self) -> Option<&str> {
        self.hidden.as_deref()
    }

    pub fn outputs(&self) -> Option<&str> {
        self.outputs.as_deref()
    }

    pub fn output_texts(&self) -> &[String] {
        &self.output_texts
    }

    /// Returns true when no layer would receive labels.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_none()
            && self.hidden.is_none()
            && self.outputs.is_none()
            && self.output_texts.is_empty()
    }

    pub fn with_inputs(mut self, symbol: impl Into<String>) -> Self {
        self.inputs = Some(symbol.into());
        self
    }

    pub fn with_hidden(mut self, symbol: impl Into<String>) -> Self {
        self.hidden = Some(symbol.into());
        self
    }

    pub fn with_outputs(mut self, symbol: impl Into<String>) -> Self {
        self.outputs = Some(symbol.into());
        self
    }

    pub fn with_output_texts<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_texts = texts.into_iter().map(Into::into).collect();
        self
    }
}
