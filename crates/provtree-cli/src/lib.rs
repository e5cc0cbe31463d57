//! CLI logic for the provtree renderer.
//!
//! Reads a tree document, groups and lays it out around its current node and
//! writes the result as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use provtree::{ProvtreeError, ViewBuilder};

/// Run the provtree CLI application
///
/// Processes the input document through the provtree pipeline and writes
/// the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `ProvtreeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Document errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ProvtreeError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing tree document"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = ViewBuilder::new(app_config);
    let document = builder.parse(&source)?;
    let view = builder.build_view(document.tree(), document.current())?;

    builder.export_svg(&view, &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
