//! Validation command handler

use super::{is_yaml, read_input};
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use chatcheck_validation::{parse_request, RequestValidator, ValidationError, ValidationErrorKind};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.file.display()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("file: {}", args.file.display()));
    output.info(&format!("Validating request: {}", args.file.display()))?;

    let content = read_input(&args.file)?;
    let value = parse_document(&args, &content)?;

    let mode = args.mode.map(Into::into).unwrap_or(config.validation.mode);
    let profile = args.profile.map(Into::into).unwrap_or(config.validation.profile);
    let validator = RequestValidator::new(mode, profile);
    debug!(%mode, %profile, "Using validator");

    let outcome = parse_request(&value).and_then(|request| {
        validator.validate_request(&request)?;
        Ok(request)
    });

    match outcome {
        Ok(request) => {
            info!("Request is valid");
            if output.format() == OutputFormat::Human {
                output.success(&format!("Request is valid ({} mode, {} profile)", mode, profile))?;

                if args.detailed {
                    output.section("Request Details")?;
                    output.key_value("Model", request.model.as_deref().unwrap_or("-"))?;
                    output.key_value("Messages", &request.messages.len().to_string())?;
                    output.key_value("Tools", &request.tools.as_ref().map_or(0, Vec::len).to_string())?;
                }
            } else {
                output.data(&serde_json::json!({
                    "valid": true,
                    "mode": mode,
                    "profile": profile,
                }))?;
            }
            Ok(())
        }
        Err(error) => {
            warn!(kind = ?error.kind, path = %error.path, "Request validation failed");
            output.error("Request validation failed")?;
            output.validation_error(&error, args.detailed)?;
            Err(Error::Validation(error))
        }
    }
}

/// Decode the request document, YAML or JSON by extension
///
/// Syntax errors are reported as an invalid request so they share the
/// validation exit code.
fn parse_document(args: &ValidateArgs, content: &str) -> Result<Value> {
    let decoded = if is_yaml(&args.file) {
        serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<Value>(content).map_err(|e| e.to_string())
    };

    decoded.map_err(|message| {
        Error::Validation(ValidationError::new(
            ValidationErrorKind::InvalidRequest,
            "$",
            format!("Could not decode {}: {}", args.file.display(), message),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ModeArg, ProfileArg};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn quiet_writer() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, true, 0, Box::new(std::io::sink()))
    }

    fn args(file: PathBuf, mode: ModeArg) -> ValidateArgs {
        ValidateArgs {
            file,
            mode: Some(mode),
            profile: Some(ProfileArg::Strict),
            detailed: false,
        }
    }

    #[test]
    fn test_valid_request_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(
            &path,
            r#"{"model": "m", "messages": [{"role": "user", "content": "Hello"}]}"#,
        )
        .unwrap();

        let result = handle_validate(args(path, ModeArg::Serving), &Config::default(), &mut quiet_writer());
        assert!(result.is_ok());
    }

    #[test]
    fn test_yaml_request_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.yaml");
        std::fs::write(
            &path,
            "messages:\n  - role: user\n    content: Hi\n  - role: assistant\n    content: Hello\n",
        )
        .unwrap();

        let result = handle_validate(args(path, ModeArg::Finetuning), &Config::default(), &mut quiet_writer());
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_request_exit_code() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, r#"{"messages": []}"#).unwrap();

        let err = handle_validate(args(path, ModeArg::Test), &Config::default(), &mut quiet_writer())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        match err {
            Error::Validation(error) => {
                assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_undecodable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = handle_validate(args(path, ModeArg::Test), &Config::default(), &mut quiet_writer())
            .unwrap_err();
        match err {
            Error::Validation(error) => assert_eq!(error.kind, ValidationErrorKind::InvalidRequest),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = handle_validate(
            args(PathBuf::from("missing-request.json"), ModeArg::Test),
            &Config::default(),
            &mut quiet_writer(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
