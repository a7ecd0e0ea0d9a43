//! CLI logic for the Strata layout tool.
//!
//! This module contains the core CLI logic: load configuration, read the
//! network, run the layout pipeline and write the diagram as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use strata::{DiagramBuilder, StrataError, network::LayerSpec, preset::Preset};

/// Run the Strata CLI application
///
/// This function lays out the network named by `args` (an input file or a
/// preset) and writes the resulting diagram to the output file as JSON.
///
/// # Errors
///
/// Returns `StrataError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unknown presets
/// - Invalid network descriptions
/// - Export errors
pub fn run(args: &Args) -> Result<(), StrataError> {
    info!(
        input_path:? = args.input,
        preset:? = args.preset,
        output_path = args.output;
        "Processing network"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let layers = read_layers(args)?;

    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.build(&layers)?;
    let json = builder.render_json(&diagram)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}

fn read_layers(args: &Args) -> Result<Vec<LayerSpec>, StrataError> {
    match (&args.input, &args.preset) {
        (Some(path), _) => config::load_network(path),
        (None, Some(name)) => {
            let preset: Preset = name.parse()?;
            info!(preset = preset.name(); "Using built-in network");
            Ok(preset.layers())
        }
        (None, None) => Err(StrataError::invalid_config(
            "no input file or preset given",
        )),
    }
}
