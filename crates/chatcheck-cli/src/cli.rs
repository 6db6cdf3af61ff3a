//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use chatcheck_core::ValidationMode;
use chatcheck_validation::ValidatorProfile;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Chatcheck CLI - structural validation of chat conversations
///
/// Checks chat completion requests before serving and fine-tuning datasets
/// before training: message order, tool call balance, identifiers and tool
/// schemas.
#[derive(Parser, Debug)]
#[command(
    name = "chatcheck",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CHATCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (overrides the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a single chat completion request (JSON or YAML)
    Validate(ValidateArgs),

    /// Validate every example of a JSONL fine-tuning dataset
    Dataset(DatasetArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the request file (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validation mode (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Validator profile (defaults to the configured profile)
    #[arg(short, long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Show detailed validation errors
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the dataset command
#[derive(Parser, Debug)]
pub struct DatasetArgs {
    /// Path to the dataset, one JSON request per line
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validation mode (datasets hold fine-tuning examples, so the
    /// configured `validation.mode` does not apply here)
    #[arg(short, long, value_enum, default_value = "finetuning")]
    pub mode: ModeArg,

    /// Validator profile (defaults to the configured profile)
    #[arg(short, long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Stop at the first invalid example
    #[arg(long)]
    pub fail_fast: bool,

    /// Stop after this many invalid examples (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub max_errors: Option<usize>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the configuration (defaults to ./.chatcheck.yaml)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    #[default]
    Human,
    /// JSON output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
    /// YAML output
    Yaml,
}

/// Validation mode as accepted on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Requests about to be served
    Serving,
    /// Fine-tuning examples
    Finetuning,
    /// Permissive checks
    Test,
}

/// Validator profile as accepted on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Name checks only
    Base,
    /// Name checks plus tool call ids
    Strict,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<ModeArg> for ValidationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Serving => ValidationMode::Serving,
            ModeArg::Finetuning => ValidationMode::Finetuning,
            ModeArg::Test => ValidationMode::Test,
        }
    }
}

impl From<ProfileArg> for ValidatorProfile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Base => ValidatorProfile::Base,
            ProfileArg::Strict => ValidatorProfile::Strict,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
