//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod dataset;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use dataset::handle_dataset;
pub use validate::handle_validate;

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read an input file, reporting a missing file as such
fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Read input file");
    Ok(content)
}

/// Whether the file extension marks a YAML document
fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}
