//! CLI logic for the Archway diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fmt, fs};

use log::{info, warn};

use archway::{ArchwayError, DiagramBuilder};

/// A failed run, with the input text when it was read.
///
/// The input text lets schema diagnostics point at the offending position.
#[derive(Debug)]
pub struct RunError {
    error: ArchwayError,
    source: Option<String>,
}

impl RunError {
    pub fn error(&self) -> &ArchwayError {
        &self.error
    }

    pub fn source_text(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl From<ArchwayError> for RunError {
    fn from(error: ArchwayError) -> Self {
        Self {
            error,
            source: None,
        }
    }
}

impl From<std::io::Error> for RunError {
    fn from(err: std::io::Error) -> Self {
        ArchwayError::from(err).into()
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Run the Archway CLI application
///
/// Validates the input document, lays it out, renders it and writes the
/// resulting whiteboard document to the output file. Every recovered data
/// issue is logged as a warning.
///
/// # Errors
///
/// Returns [`RunError`] for file I/O errors, configuration errors and schema
/// violations in the input document.
pub fn run(args: &Args) -> Result<(), RunError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing architecture document"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        app_config = app_config.with_seed(seed);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let diagram = match builder.generate(source.as_str()) {
        Ok(diagram) => diagram,
        Err(error) => {
            return Err(RunError {
                error,
                source: Some(source),
            });
        }
    };

    if !diagram.diagnostics().is_empty() {
        warn!(
            diagnostics_len = diagram.diagnostics().len();
            "Diagram produced with recovered issues"
        );
    }

    let json = diagram.document().to_json_pretty()?;
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Document exported successfully");

    Ok(())
}
