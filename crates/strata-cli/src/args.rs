//! Command-line argument definitions for the Strata CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the network to lay out (a TOML file or a
//! built-in preset), the output path, the configuration file and the logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the Strata layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the network description (TOML)
    #[arg(
        help = "Path to the network description file",
        required_unless_present = "preset",
        conflicts_with = "preset"
    )]
    pub input: Option<String>,

    /// Built-in network to lay out instead of an input file
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
