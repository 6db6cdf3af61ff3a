//! Per-message content rules, dispatched by role

use crate::context::ValidationContext;
use crate::error::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::format::{is_valid_identifier, IDENTIFIER_PATTERN};
use crate::profile::ValidationRules;
use chatcheck_core::{
    AssistantMessage, FunctionCall, Message, SystemMessage, ToolCall, ToolMessage, UserMessage,
};

/// Validate the content of every message in `messages`
pub fn validate_message_list_content(
    messages: &[Message],
    rules: &ValidationRules,
    ctx: &ValidationContext,
) -> ValidationResult<()> {
    let last_index = messages.len().saturating_sub(1);

    for (index, message) in messages.iter().enumerate() {
        let message_ctx = ctx.child_index(index);

        match message {
            Message::User(user) => validate_user_message(user, &message_ctx)?,
            Message::Assistant(assistant) => {
                validate_assistant_message(assistant, index == last_index, rules, &message_ctx)?
            }
            Message::Tool(tool) => (rules.tool_message)(tool, &message_ctx)?,
            Message::System(system) => validate_system_message(system, &message_ctx)?,
        }
    }

    Ok(())
}

/// User messages carry no rule of their own
pub fn validate_user_message(_message: &UserMessage, _ctx: &ValidationContext) -> ValidationResult<()> {
    Ok(())
}

/// Assistant rules:
/// - exactly one of content or tool_calls
/// - every tool call passes the profile's tool call rule
/// - in finetuning mode, a weight is 0 or 1
/// - a prefix turn is the last message
pub fn validate_assistant_message(
    message: &AssistantMessage,
    is_last_message: bool,
    rules: &ValidationRules,
    ctx: &ValidationContext,
) -> ValidationResult<()> {
    if message.has_content() == message.has_tool_calls() {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidAssistantMessage,
            &ctx.path,
            "Assistant message must have either content or tool_calls, but not both.",
        ));
    }

    if let Some(tool_calls) = &message.tool_calls {
        let calls_ctx = ctx.child("tool_calls");
        for (index, tool_call) in tool_calls.iter().enumerate() {
            (rules.tool_call)(tool_call, is_last_message, &calls_ctx.child_index(index))?;
        }
    }

    if ctx.is_finetuning() {
        if let Some(weight) = message.weight {
            if weight != 0.0 && weight != 1.0 {
                return Err(ValidationError::with_violation(
                    ValidationErrorKind::InvalidAssistantMessage,
                    ctx.child("weight").path,
                    "Assistant message weight must be either 0 or 1",
                    ValidationError::create_violation("weight", "0 or 1", weight.to_string()),
                ));
            }
        }
    }

    if message.prefix && !is_last_message {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidAssistantMessage,
            ctx.child("prefix").path,
            "Assistant message with prefix True must be last message",
        ));
    }

    Ok(())
}

/// Tool message rule of the base profile: a present name must be well formed
pub fn validate_tool_message_name(message: &ToolMessage, ctx: &ValidationContext) -> ValidationResult<()> {
    if let Some(name) = &message.name {
        if !is_valid_identifier(name) {
            return Err(invalid_name(ValidationErrorKind::InvalidToolMessage, name, &ctx.child("name")));
        }
    }
    Ok(())
}

/// System prompts must have content
pub fn validate_system_message(message: &SystemMessage, ctx: &ValidationContext) -> ValidationResult<()> {
    if message.content.is_none() {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidSystemPrompt,
            ctx.child("content").path,
            "System prompt must have content",
        ));
    }
    Ok(())
}

/// Tool call rule of the base profile: only the function name is checked
pub fn validate_tool_call_function(
    tool_call: &ToolCall,
    _is_last_message: bool,
    ctx: &ValidationContext,
) -> ValidationResult<()> {
    validate_function_call(&tool_call.function, &ctx.child("function"))
}

/// The called function's name must be well formed
pub fn validate_function_call(function_call: &FunctionCall, ctx: &ValidationContext) -> ValidationResult<()> {
    if !is_valid_identifier(&function_call.name) {
        return Err(invalid_name(
            ValidationErrorKind::InvalidFunctionCall,
            &function_call.name,
            &ctx.child("name"),
        ));
    }
    Ok(())
}

/// Name format error shared by tools, tool messages and function calls
pub(crate) fn invalid_name(kind: ValidationErrorKind, name: &str, ctx: &ValidationContext) -> ValidationError {
    ValidationError::with_violation(
        kind,
        &ctx.path,
        format!(
            "Function name was {} but must be a-z, A-Z, 0-9, or contain underscores and dashes, with a maximum length of 64.",
            name
        ),
        ValidationError::create_violation("identifier_format", IDENTIFIER_PATTERN, name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ValidatorProfile;
    use chatcheck_core::{ValidationMode, NULL_TOOL_CALL_ID};
    use serde_json::Map;

    fn call(id: &str, name: &str) -> ToolCall {
        ToolCall::new(id, FunctionCall::new(name, Map::new()))
    }

    #[test]
    fn test_assistant_exclusivity() {
        let rules = ValidatorProfile::Base.rules();
        let ctx = ValidationContext::new(ValidationMode::Test);

        let neither = AssistantMessage::default();
        let both = AssistantMessage {
            content: Some("ok".to_string()),
            tool_calls: Some(vec![call("abc123xyz", "f")]),
            ..AssistantMessage::default()
        };
        let text = AssistantMessage {
            content: Some("ok".to_string()),
            ..AssistantMessage::default()
        };

        assert!(validate_assistant_message(&neither, true, &rules, &ctx).is_err());
        assert!(validate_assistant_message(&both, true, &rules, &ctx).is_err());
        assert!(validate_assistant_message(&text, true, &rules, &ctx).is_ok());
    }

    #[test]
    fn test_weight_only_checked_in_finetuning() {
        let rules = ValidatorProfile::Base.rules();
        let message = AssistantMessage {
            content: Some("ok".to_string()),
            weight: Some(0.5),
            ..AssistantMessage::default()
        };

        let finetuning = ValidationContext::new(ValidationMode::Finetuning);
        let error = validate_assistant_message(&message, true, &rules, &finetuning).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidAssistantMessage);
        assert_eq!(error.path, "$.weight");

        let serving = ValidationContext::new(ValidationMode::Serving);
        assert!(validate_assistant_message(&message, true, &rules, &serving).is_ok());
    }

    #[test]
    fn test_prefix_must_be_last() {
        let rules = ValidatorProfile::Base.rules();
        let ctx = ValidationContext::new(ValidationMode::Test);
        let message = AssistantMessage {
            content: Some("Once upon".to_string()),
            prefix: true,
            ..AssistantMessage::default()
        };

        assert!(validate_assistant_message(&message, true, &rules, &ctx).is_ok());
        let error = validate_assistant_message(&message, false, &rules, &ctx).unwrap_err();
        assert!(error.message.contains("prefix True must be last message"));
    }

    #[test]
    fn test_base_tool_call_ignores_id() {
        let ctx = ValidationContext::new(ValidationMode::Serving);
        assert!(validate_tool_call_function(&call(NULL_TOOL_CALL_ID, "lookup"), false, &ctx).is_ok());
        assert!(validate_tool_call_function(&call("whatever!", "lookup"), false, &ctx).is_ok());

        let error = validate_tool_call_function(&call("abc123xyz", "bad name!"), false, &ctx).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidFunctionCall);
        assert_eq!(error.path, "$.function.name");
    }

    #[test]
    fn test_system_message_needs_content() {
        let ctx = ValidationContext::default();
        let error = validate_system_message(&SystemMessage { content: None }, &ctx).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidSystemPrompt);

        let empty = SystemMessage {
            content: Some(String::new()),
        };
        assert!(validate_system_message(&empty, &ctx).is_ok());
    }

    #[test]
    fn test_tool_message_name() {
        let ctx = ValidationContext::default();
        let mut message = ToolMessage {
            content: "42".to_string(),
            tool_call_id: None,
            name: None,
        };
        assert!(validate_tool_message_name(&message, &ctx).is_ok());

        message.name = Some("get_weather".to_string());
        assert!(validate_tool_message_name(&message, &ctx).is_ok());

        message.name = Some("get weather".to_string());
        let error = validate_tool_message_name(&message, &ctx).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidToolMessage);
        assert_eq!(error.schema_violations[0].actual, "get weather");
    }
}
