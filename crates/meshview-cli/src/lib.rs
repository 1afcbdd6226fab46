//! CLI logic for the Meshview topology renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::BufWriter};

use log::info;

use meshview::{DiagramBuilder, MeshviewError};

/// Run the Meshview CLI application
///
/// Builds the standard diagram, writes the SVG to the output path and, when
/// a node is given with `--inspect`, prints its detail panel to stdout.
///
/// # Errors
///
/// Returns `MeshviewError` for:
/// - Configuration loading errors
/// - Unknown nodes passed to `--inspect`
/// - Rendering and file I/O errors
pub fn run(args: &Args) -> Result<(), MeshviewError> {
    info!(output_path = args.output; "Rendering topology");

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.build()?;

    if let Some(node) = &args.inspect {
        let panel = builder.inspect(&diagram, node.as_str())?;
        println!("{}", panel.to_plain_text());
    }

    let file = fs::File::create(&args.output)?;
    builder.write_svg(&diagram, BufWriter::new(file))?;

    info!(output_file = args.output; "SVG exported successfully");
    Ok(())
}
