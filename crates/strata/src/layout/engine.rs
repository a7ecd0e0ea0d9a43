//! Whole-network layout.

use log::{debug, info};

use strata_core::network::LayerSpec;

use crate::{StrataError, config::LayoutConfig, diagram::Diagram, layout::build_layer};

/// Lays out every layer of a network, left to right.
///
/// All input is validated before the first layer is built, so either a
/// complete diagram is returned or nothing is. The result is a pure function
/// of `specs` and `config`: the same input always yields identical
/// coordinates.
///
/// The returned diagram has no connectors or styles yet; run
/// [`connect`](crate::connect::connect) and
/// [`annotate`](crate::annotate::annotate) on it, or use
/// [`DiagramBuilder`](crate::DiagramBuilder) to run the full pipeline.
///
/// # Errors
///
/// - [`StrataError::EmptyNetwork`] when `specs` is empty.
/// - [`StrataError::InvalidConfig`] when `config` fails
///   [`LayoutConfig::validate`].
/// - [`StrataError::InvalidSpec`] for the first layer with a size of zero.
pub fn layout(specs: &[LayerSpec], config: &LayoutConfig) -> Result<Diagram, StrataError> {
    if specs.is_empty() {
        return Err(StrataError::EmptyNetwork);
    }
    config.validate()?;
    if let Some(index) = specs.iter().position(|spec| spec.size() == 0) {
        return Err(StrataError::InvalidSpec { index, size: 0 });
    }

    info!(layers = specs.len(); "Laying out network");

    let layers = specs
        .iter()
        .enumerate()
        .map(|(position, spec)| build_layer(spec, position, config))
        .collect::<Result<Vec<_>, _>>()?;

    let truncated = layers.iter().filter(|layer| layer.is_truncated()).count();
    debug!(layers = layers.len(), truncated; "Layout calculated");

    Ok(Diagram::new(*config, layers))
}
