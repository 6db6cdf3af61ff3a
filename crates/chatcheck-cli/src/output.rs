//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) with support for
//! validation errors, batch reports and progress indicators.

use crate::cli::OutputFormat;
use crate::error::Result;
use chatcheck_validation::{BatchReport, ValidationError};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a single validation error, with its violations when `detailed`
    fn format_validation_error(&self, error: &ValidationError, detailed: bool) -> Result<String>;

    /// Format the outcome of a dataset run
    fn format_batch_report(&self, report: &BatchReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_validation_error(&self, error: &ValidationError, detailed: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_error_human(error, detailed)),
            _ => self.format(error),
        }
    }

    fn format_batch_report(&self, report: &BatchReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_batch_report_human(report)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stderr().is_terminal(),
            quiet,
            verbose,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[allow(dead_code)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            verbose,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("✓ {}", message).green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("✗ {}", message).red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!("Outputting data: {}", formatted);

        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write a single validation error
    pub fn validation_error(&mut self, error: &ValidationError, detailed: bool) -> Result<()> {
        let formatted = self.format.format_validation_error(error, detailed || self.verbose > 0)?;
        self.writeln(formatted.trim_end())
    }

    /// Write the outcome of a dataset run
    pub fn batch_report(&mut self, report: &BatchReport) -> Result<()> {
        let formatted = self.format.format_batch_report(report)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a key/value line (human format only)
    pub fn key_value(&mut self, key: &str, value: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("  {}: {}", key.bold(), value))
        } else {
            self.writeln(&format!("  {}: {}", key, value))
        }
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Format a single validation error for human reading
fn format_validation_error_human(error: &ValidationError, detailed: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("❌ {}\n", error.kind));
    output.push_str(&format!("📍 Path: {}\n", error.path));
    output.push_str(&format!("💬 Message: {}\n", error.message));

    if detailed && !error.schema_violations.is_empty() {
        output.push_str("🔍 Violations:\n");

        for violation in &error.schema_violations {
            output.push_str(&format!("  • Rule: {}\n", violation.rule));
            output.push_str(&format!("    Expected: {}\n", violation.expected));
            output.push_str(&format!("    Actual: {}\n", violation.actual));
        }
    }

    output
}

/// Format a dataset report for human reading
fn format_batch_report_human(report: &BatchReport) -> String {
    let mut output = String::new();

    output.push_str("📊 Summary:\n");
    output.push_str(&format!("  Examples: {}\n", report.total));
    output.push_str(&format!("  Checked: {}\n", report.checked));
    output.push_str(&format!("  Valid: {}\n", report.valid));
    output.push_str(&format!("  Invalid: {}\n", report.invalid()));

    if report.checked < report.total {
        output.push_str(&format!(
            "  Stopped early: {} example(s) not checked\n",
            report.total - report.checked
        ));
    }

    if !report.errors.is_empty() {
        output.push('\n');
        for (i, error) in report.errors.errors.iter().enumerate() {
            output.push_str(&format!(
                "{}. [{}] {}: {}\n",
                i + 1,
                error.path,
                error.kind,
                error.message
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
