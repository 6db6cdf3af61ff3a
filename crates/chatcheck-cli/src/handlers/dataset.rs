//! Dataset command handler
//!
//! A dataset is a JSONL file holding one request per line. Blank lines are
//! skipped; error paths are rooted at the zero-based line number, so an error
//! in the first message on line 4 reads `$[3].messages[0]`.

use super::read_input;
use crate::cli::DatasetArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use chatcheck_validation::{
    validate_value, BatchReport, ValidationConfig, ValidationError, ValidationErrorKind,
};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Handle the dataset command
#[instrument(skip(config, output), fields(file = %args.file.display()))]
pub fn handle_dataset(args: DatasetArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("dataset_command", &format!("file: {}", args.file.display()));
    output.info(&format!("Validating dataset: {}", args.file.display()))?;

    let content = read_input(&args.file)?;
    let settings = dataset_config(&args, config);
    let report = validate_lines(&content, &settings, output);

    info!(
        total = report.total,
        checked = report.checked,
        valid = report.valid,
        invalid = report.invalid(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Dataset validation finished"
    );

    if report.is_valid() {
        output.success(&format!("All {} example(s) are valid", report.total))?;
    }

    output.section("Dataset Report")?;
    output.batch_report(&report)?;

    if report.is_valid() {
        Ok(())
    } else {
        Err(Error::DatasetInvalid {
            invalid: report.invalid(),
            checked: report.checked,
        })
    }
}

/// Merge command-line flags over the configured validation defaults
///
/// The mode always comes from `--mode`, which defaults to finetuning.
fn dataset_config(args: &DatasetArgs, config: &Config) -> ValidationConfig {
    ValidationConfig {
        mode: args.mode.into(),
        profile: args.profile.map(Into::into).unwrap_or(config.validation.profile),
        fail_fast: args.fail_fast || config.validation.fail_fast,
        max_errors: args.max_errors.unwrap_or(config.validation.max_errors),
    }
}

/// Validate every non-blank line of a JSONL document
fn validate_lines(content: &str, settings: &ValidationConfig, output: &OutputWriter) -> BatchReport {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let validator = settings.validator();
    let mut report = BatchReport::new(lines.len());
    let progress = output.progress_bar(lines.len() as u64, "validating examples");

    for (index, line) in lines {
        let outcome = serde_json::from_str::<Value>(line)
            .map_err(|e| {
                ValidationError::new(
                    ValidationErrorKind::InvalidRequest,
                    "$",
                    format!("Line {} is not valid JSON: {}", index + 1, e),
                )
            })
            .and_then(|value| validate_value(&value, &validator));

        if let Err(error) = &outcome {
            debug!(line = index + 1, kind = ?error.kind, "Invalid example");
        }

        let keep_going = report.record(index, outcome, settings);

        if let Some(pb) = &progress {
            pb.inc(1);
        }

        if !keep_going {
            break;
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    report
}
