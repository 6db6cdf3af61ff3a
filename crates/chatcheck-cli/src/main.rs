//! Chatcheck CLI - structural validation of chat conversations
//!
//! This is the main entry point for the Chatcheck CLI application, providing
//! commands for validating single chat completion requests and JSONL
//! fine-tuning datasets.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Load configuration before logging so the file can pick the log level
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // Initialize logging
    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the application
    match run(cli, config) {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e),
    }
}

/// Report a failure and exit with its code
fn exit_with(e: &error::Error) -> ! {
    if !e.is_reported() {
        eprintln!("{}", error::format_error(e, control::SHOULD_COLORIZE.should_colorize()));

        if e.should_show_help() {
            eprintln!("\nFor more information, try '--help'");
        }
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    // Create output writer
    let format = cli.output.unwrap_or(config.output.format);
    let use_color = cli.use_color() && config.output.color;
    let mut output = OutputWriter::new(format, use_color, cli.quiet, cli.verbosity_level());

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output),
        Commands::Dataset(args) => handlers::handle_dataset(args, &config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    // Start from the configuration file, then let -v flags win
    let mut logging_config = LoggingConfig::from_settings(&config.logging, cli.verbosity_level());

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    // Initialize the logging system
    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        // Test verbose flag
        let cli = Cli::parse_from(["chatcheck", "-vv", "validate", "request.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        // Test quiet flag
        let cli = Cli::parse_from(["chatcheck", "--quiet", "dataset", "train.jsonl"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_help_requires_subcommand() {
        assert!(Cli::try_parse_from(["chatcheck"]).is_err());
    }
}
