//! Batch validation of independent requests, such as the lines of a
//! fine-tuning dataset
//!
//! Each request is still validated fail-fast; the batch only decides whether
//! to keep going after a failing request.

use crate::error::{ValidationErrors, ValidationResult};
use crate::parse::parse_request;
use crate::profile::ValidatorProfile;
use crate::request::RequestValidator;
use chatcheck_core::ValidationMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Validation configuration for batch operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Validation mode to use
    pub mode: ValidationMode,
    /// Rule set to run
    pub profile: ValidatorProfile,
    /// Stop at the first failing request
    pub fail_fast: bool,
    /// Maximum number of errors to collect (0 = unlimited)
    pub max_errors: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Test,
            profile: ValidatorProfile::Strict,
            fail_fast: false,
            max_errors: 0,
        }
    }
}

impl ValidationConfig {
    /// Configuration for requests about to be served
    pub fn serving() -> Self {
        Self {
            mode: ValidationMode::Serving,
            ..Self::default()
        }
    }

    /// Configuration for fine-tuning datasets
    pub fn finetuning() -> Self {
        Self {
            mode: ValidationMode::Finetuning,
            ..Self::default()
        }
    }

    /// Permissive configuration
    pub fn test() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: ValidatorProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Build the validator this configuration describes
    pub fn validator(&self) -> RequestValidator {
        RequestValidator::new(self.mode, self.profile)
    }
}

/// Outcome of validating a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of requests in the batch
    pub total: usize,
    /// Number of requests validated before stopping
    pub checked: usize,
    /// Number of valid requests
    pub valid: usize,
    /// One error per failing request, paths rooted at `$[index]`
    pub errors: ValidationErrors,
}

impl BatchReport {
    /// Empty report for a batch of `total` requests
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn invalid(&self) -> usize {
        self.errors.len()
    }

    /// Record the outcome of the request at `index`
    ///
    /// Returns `false` once `config` says the batch should stop.
    pub fn record(&mut self, index: usize, outcome: ValidationResult<()>, config: &ValidationConfig) -> bool {
        self.checked += 1;

        match outcome {
            Ok(()) => {
                self.valid += 1;
                true
            }
            Err(error) => {
                self.errors.add(error.rebased(&format!("$[{}]", index)));

                if config.fail_fast {
                    return false;
                }

                !(config.max_errors > 0 && self.errors.len() >= config.max_errors)
            }
        }
    }

    /// True when every request was checked and none failed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.checked == self.total
    }

    /// Convert to result - Ok if no request failed
    pub fn into_result(self) -> Result<Self, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(self.errors)
        }
    }
}

/// Parse and validate one request
pub fn validate_value(value: &Value, validator: &RequestValidator) -> ValidationResult<()> {
    let request = parse_request(value)?;
    validator.validate_request(&request).map(|_| ())
}

/// Batch validation for multiple requests
pub fn validate_requests_batch(requests: &[Value], config: &ValidationConfig) -> BatchReport {
    let validator = config.validator();
    let mut report = BatchReport::new(requests.len());

    for (i, request) in requests.iter().enumerate() {
        if !report.record(i, validate_value(request, &validator), config) {
            break;
        }
    }

    debug!(
        total = report.total,
        checked = report.checked,
        valid = report.valid,
        invalid = report.invalid(),
        "Batch validation finished"
    );

    report
}
