//! Validator profiles
//!
//! A profile picks the set of pluggable rules a validator runs. The base
//! profile checks names only; the strict profile also requires tool call ids
//! to be present and well formed, with per-mode strictness.

use crate::content::{invalid_name, validate_function_call, validate_tool_call_function, validate_tool_message_name};
use crate::context::ValidationContext;
use crate::error::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::format::{check_schema_syntax, is_valid_call_id, is_valid_identifier, CALL_ID_PATTERN};
use crate::structure::validate_last_message_role;
use chatcheck_core::{Message, ToolCall, ToolMessage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Checks one tool call; the flag tells whether its message is the last one
pub type ToolCallRule = fn(&ToolCall, bool, &ValidationContext) -> ValidationResult<()>;

/// Checks one tool message
pub type ToolMessageRule = fn(&ToolMessage, &ValidationContext) -> ValidationResult<()>;

/// Checks the final message of a conversation
pub type LastMessageRule = fn(&Message, &ValidationContext) -> ValidationResult<()>;

/// Checks that a tool's parameters document is a legal JSON schema
pub type SchemaSyntaxRule = fn(&Value) -> Result<(), String>;

/// Which rule set a validator runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorProfile {
    /// Name checks only; tool call ids are not inspected
    Base,
    /// Tool call ids must be present and match `^[a-zA-Z0-9]{9}$`
    #[default]
    Strict,
}

impl ValidatorProfile {
    /// The rule set installed by this profile
    pub fn rules(self) -> ValidationRules {
        match self {
            ValidatorProfile::Base => ValidationRules::base(),
            ValidatorProfile::Strict => ValidationRules::strict(),
        }
    }
}

impl fmt::Display for ValidatorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorProfile::Base => write!(f, "base"),
            ValidatorProfile::Strict => write!(f, "strict"),
        }
    }
}

/// Pluggable rules that differ between profiles
#[derive(Clone, Copy)]
pub struct ValidationRules {
    pub tool_call: ToolCallRule,
    pub tool_message: ToolMessageRule,
    pub last_message: LastMessageRule,
    pub schema_syntax: SchemaSyntaxRule,
}

impl ValidationRules {
    pub fn base() -> Self {
        Self {
            tool_call: validate_tool_call_function,
            tool_message: validate_tool_message_name,
            last_message: validate_last_message_role,
            schema_syntax: check_schema_syntax,
        }
    }

    pub fn strict() -> Self {
        Self {
            tool_call: validate_tool_call_strict,
            tool_message: validate_tool_message_strict,
            last_message: validate_last_message_strict,
            schema_syntax: check_schema_syntax,
        }
    }
}

impl fmt::Debug for ValidationRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRules").finish_non_exhaustive()
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidatorProfile::default().rules()
    }
}

/// Strict tool call rule
///
/// A set id must match the call id pattern. The `"null"` sentinel is refused
/// when serving, and mid-conversation when fine-tuning; the last message of a
/// fine-tuning example may leave its ids unset.
pub fn validate_tool_call_strict(
    tool_call: &ToolCall,
    is_last_message: bool,
    ctx: &ValidationContext,
) -> ValidationResult<()> {
    let id_ctx = ctx.child("id");

    if !tool_call.has_null_id() && !is_valid_call_id(&tool_call.id) {
        return Err(ValidationError::with_violation(
            ValidationErrorKind::InvalidFunctionCall,
            &id_ctx.path,
            format!(
                "Tool call id was {} but must be a-z, A-Z, 0-9, with a length of 9.",
                tool_call.id
            ),
            ValidationError::create_violation("call_id_format", CALL_ID_PATTERN, tool_call.id.as_str()),
        ));
    }

    if ctx.is_finetuning() && !is_last_message && tool_call.has_null_id() {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidFunctionCall,
            &id_ctx.path,
            "Tool call id of assistant message that is not last has to be defined in finetuning mode.",
        ));
    }

    if ctx.is_serving() && tool_call.has_null_id() {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidFunctionCall,
            &id_ctx.path,
            "Tool call id has to be defined in serving mode.",
        ));
    }

    validate_function_call(&tool_call.function, &ctx.child("function"))
}

/// Strict tool message rule: valid name if present, mandatory well-formed id
pub fn validate_tool_message_strict(message: &ToolMessage, ctx: &ValidationContext) -> ValidationResult<()> {
    if let Some(name) = &message.name {
        if !is_valid_identifier(name) {
            return Err(invalid_name(ValidationErrorKind::InvalidToolMessage, name, &ctx.child("name")));
        }
    }

    let id_ctx = ctx.child("tool_call_id");
    let Some(tool_call_id) = &message.tool_call_id else {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidRequest,
            &id_ctx.path,
            "Tool call id has to be defined.",
        ));
    };

    if !is_valid_call_id(tool_call_id) {
        return Err(ValidationError::with_violation(
            ValidationErrorKind::InvalidToolMessage,
            &id_ctx.path,
            format!(
                "Tool call id was {} but must be a-z, A-Z, 0-9, with a length of 9.",
                tool_call_id
            ),
            ValidationError::create_violation("call_id_format", CALL_ID_PATTERN, tool_call_id.as_str()),
        ));
    }

    Ok(())
}

/// Strict last-message rule
///
/// On top of the role check, the closing assistant turn of a fine-tuning
/// example has its tool calls checked as the last message.
pub fn validate_last_message_strict(message: &Message, ctx: &ValidationContext) -> ValidationResult<()> {
    validate_last_message_role(message, ctx)?;

    if ctx.is_finetuning() {
        if let Some(tool_calls) = message.tool_calls() {
            let calls_ctx = ctx.child("tool_calls");
            for (index, tool_call) in tool_calls.iter().enumerate() {
                validate_tool_call_strict(tool_call, true, &calls_ctx.child_index(index))?;
            }
        }
    }

    Ok(())
}
