//! Validation error types for chat requests and conversations
//!
//! Validation is fail-fast: a single [`ValidationError`] describes the first
//! violated rule. [`ValidationErrors`] only appears when many independent
//! requests are validated as a batch.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Malformed top-level request or unsupported message role
    InvalidRequest,
    /// Empty conversation, bad first/last role, illegal adjacency or unbalanced tool calls
    InvalidMessageStructure,
    /// Content/tool_calls exclusivity, misplaced prefix or bad weight
    InvalidAssistantMessage,
    /// Bad tool message name or tool_call_id
    InvalidToolMessage,
    /// Bad offered tool name
    InvalidTool,
    /// Bad tool call name or id
    InvalidFunctionCall,
    /// Tool parameters are not a legal JSON schema
    InvalidToolSchema,
    /// System message without content
    InvalidSystemPrompt,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValidationErrorKind::InvalidRequest => "Invalid request",
            ValidationErrorKind::InvalidMessageStructure => "Invalid message structure",
            ValidationErrorKind::InvalidAssistantMessage => "Invalid assistant message",
            ValidationErrorKind::InvalidToolMessage => "Invalid tool message",
            ValidationErrorKind::InvalidTool => "Invalid tool",
            ValidationErrorKind::InvalidFunctionCall => "Invalid function call",
            ValidationErrorKind::InvalidToolSchema => "Invalid tool schema",
            ValidationErrorKind::InvalidSystemPrompt => "Invalid system prompt",
        };
        f.write_str(label)
    }
}

/// A validation violation with detailed context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The validation rule that was violated
    pub rule: String,
    /// What was expected
    pub expected: String,
    /// What was actually found
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rule '{}' violated: expected {}, but found {}",
            self.rule, self.expected, self.actual
        )
    }
}

/// Validation failure with its kind, JSON path and detailed violations
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// What kind of rule failed
    pub kind: ValidationErrorKind,
    /// JSON path where the error occurred
    pub path: String,
    /// Human-readable error message
    pub message: String,
    /// Detailed violations, naming the offending value where helpful
    pub schema_violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}': {}", self.kind, self.path, self.message)?;

        if !self.schema_violations.is_empty() {
            write!(f, "\nViolations:")?;
            for violation in &self.schema_violations {
                write!(f, "\n  - {}", violation)?;
            }
        }

        Ok(())
    }
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P, M>(kind: ValidationErrorKind, path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
            schema_violations: Vec::new(),
        }
    }

    /// Create a validation error carrying a single violation
    pub fn with_violation<P, M>(
        kind: ValidationErrorKind,
        path: P,
        message: M,
        violation: Violation,
    ) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
            schema_violations: vec![violation],
        }
    }

    /// Create a violation for a specific rule
    pub fn create_violation<R, E, A>(rule: R, expected: E, actual: A) -> Violation
    where
        R: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Violation {
            rule: rule.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Re-root the error path under `prefix`, e.g. `$.messages[0]` under `$[3]`
    pub fn rebased(mut self, prefix: &str) -> Self {
        self.path = match self.path.strip_prefix('$') {
            Some(rest) => format!("{}{}", prefix, rest),
            None => format!("{}.{}", prefix, self.path),
        };
        self
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors collected while validating a batch of independent requests
#[derive(Debug, Clone, Default, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// List of validation errors
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multiple validation errors occurred:")?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Convert to result - Ok if no errors, Err if any errors exist
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}
