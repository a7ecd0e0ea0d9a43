//! Strata - deterministic layout for layered network diagrams.
//!
//! Strata turns an ordered list of layer descriptions into a fully positioned
//! [`Diagram`](diagram::Diagram): one column of nodes per layer, dense
//! connectors between neighbouring layers, per-kind styling, markers,
//! captions, node labels and a legend. It does not draw anything itself; the
//! diagram is plain data handed to an external renderer, usually as JSON.
//!
//! The pipeline has five passes, each usable on its own:
//!
//! 1. [`layout::layout`] builds every layer and places its nodes.
//! 2. [`connect::connect`] generates the connectors.
//! 3. [`annotate::annotate`] resolves styles, markers and the legend.
//! 4. [`caption::caption`] describes each layer below it.
//! 5. [`label::label`] attaches symbols or texts to individual nodes.
//!
//! [`DiagramBuilder`] runs them in order.

pub mod annotate;
pub mod caption;
pub mod config;
pub mod connect;
pub mod diagram;
pub mod label;
pub mod layout;
pub mod preset;
pub mod trace;

mod error;

pub use strata_core::{color, geometry, network, stroke};

pub use error::StrataError;

use log::{debug, info, trace};

use annotate::{MarkerRules, StyleResolver};
use config::AppConfig;
use diagram::Diagram;
use network::LayerSpec;

/// Builder running the full layout pipeline.
///
/// # Examples
///
/// ```rust
/// use strata::{DiagramBuilder, config::AppConfig, preset};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let diagram = builder.build(&preset::mobilenet_v1())
///     .expect("Failed to lay out network");
///
/// assert_eq!(diagram.layers().len(), 21);
/// let json = builder.render_json(&diagram).expect("Failed to export");
/// assert!(json.starts_with('{'));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out, connect, annotate, caption and label a network.
    ///
    /// Styles and marker rules are validated before layout starts, so a bad
    /// configuration is reported even for an otherwise valid network.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::InvalidConfig`] for unusable style, marker or
    /// layout settings, [`StrataError::EmptyNetwork`] when `layers` is empty
    /// and [`StrataError::InvalidSpec`] for a layer of size zero.
    pub fn build(&self, layers: &[LayerSpec]) -> Result<Diagram, StrataError> {
        info!(layers = layers.len(); "Building diagram");

        let styles = StyleResolver::from_config(self.config.style())?;
        let markers = MarkerRules::compile(self.config.markers())?;
        debug!(rules = self.config.markers().len(); "Style configuration resolved");

        let mut diagram = layout::layout(layers, self.config.layout())?;
        connect::connect(&mut diagram);
        annotate::annotate(&mut diagram, &styles, &markers);

        let captions = self.config.captions();
        if captions.enabled() {
            caption::caption(&mut diagram, captions);
        }

        let labels = self.config.labels();
        if !labels.is_empty() {
            label::label(&mut diagram, labels);
        }

        info!(
            layers = diagram.layers().len(),
            edges = diagram.edge_count(),
            markers = diagram.markers().len();
            "Diagram built"
        );
        trace!(diagram:?; "Built diagram");

        Ok(diagram)
    }

    /// Serialize a diagram to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Export`] when serialization fails.
    pub fn render_json(&self, diagram: &Diagram) -> Result<String, StrataError> {
        let json = serde_json::to_string_pretty(diagram)
            .map_err(|err| StrataError::Export(err.to_string()))?;
        debug!(bytes = json.len(); "Diagram serialized");
        Ok(json)
    }
}
