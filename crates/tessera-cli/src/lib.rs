//! CLI logic for the Tessera class diagram inspector.
//!
//! The CLI reads a TOML model description, builds a
//! [`ClassDiagram`](tessera::ClassDiagram) from it and prints a report of
//! positional indices, anchors, override resolution and relationships.

pub mod error_adapter;
pub mod model;
pub mod report;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use tessera::TesseraError;

use report::Report;

/// Run the Tessera CLI application
///
/// # Errors
///
/// Returns `TesseraError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid model descriptions
pub fn run(args: &Args) -> Result<(), TesseraError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing model"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let diagram = model::build_diagram(&source, app_config.diagram())?;
    let report = Report::from_diagram(&diagram)?.to_string();

    match &args.output {
        Some(path) => {
            fs::write(path, report)?;
            info!(output_file = path; "Report written");
        }
        None => {
            io::stdout().lock().write_all(report.as_bytes())?;
        }
    }

    Ok(())
}
