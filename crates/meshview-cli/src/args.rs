//! Command-line argument definitions for the Meshview CLI.
//!
//! Arguments control the output path, configuration file selection, an
//! optional node to inspect, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Meshview topology renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the detail panel of a node, e.g. `Router0`
    #[arg(long, value_name = "NODE")]
    pub inspect: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
