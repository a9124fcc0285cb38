mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod svg;

use clap::Parser;
use serde_json::Value;
use valband_core::Envelope;

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    let envelope = commands::run(&cli)?;
    output::render(&envelope, cli.format, cli.pretty)?;

    enforce_strict(&envelope, cli.strict)
}

/// Under `--strict`, any warning or envelope error fails the run after output is written.
fn enforce_strict(envelope: &Envelope<Value>, strict: bool) -> Result<(), CliError> {
    if strict && (!envelope.meta.warnings.is_empty() || !envelope.errors.is_empty()) {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.meta.warnings.len(),
            error_count: envelope.errors.len(),
        });
    }

    Ok(())
}
