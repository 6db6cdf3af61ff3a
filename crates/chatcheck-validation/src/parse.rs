//! Building typed requests from raw JSON
//!
//! `Message` is a closed enum, so an unknown role can only show up here, at
//! the deserialization boundary. It is reported as an unsupported message
//! type rather than a generic parse failure.

use crate::context::ValidationContext;
use crate::error::{ValidationError, ValidationErrorKind, ValidationResult};
use chatcheck_core::{ChatCompletionRequest, Role};
use serde::Deserialize;
use serde_json::Value;

/// Deserialize a request, rejecting unknown message roles first
pub fn parse_request(value: &Value) -> ValidationResult<ChatCompletionRequest> {
    let ctx = ValidationContext::default();

    if let Some(messages) = value.get("messages").and_then(Value::as_array) {
        let messages_ctx = ctx.child("messages");
        for (index, message) in messages.iter().enumerate() {
            let role = message.get("role").and_then(Value::as_str);
            if role.and_then(Role::from_name).is_none() {
                return Err(ValidationError::with_violation(
                    ValidationErrorKind::InvalidRequest,
                    messages_ctx.child_index(index).child("role").path,
                    format!("Unsupported message type {}", role.unwrap_or("<missing>")),
                    ValidationError::create_violation(
                        "message_role",
                        "one of: system, user, assistant, tool",
                        role.unwrap_or("<missing>"),
                    ),
                ));
            }
        }
    }

    ChatCompletionRequest::deserialize(value).map_err(|error| {
        ValidationError::new(
            ValidationErrorKind::InvalidRequest,
            &ctx.path,
            format!("Malformed request: {}", error),
        )
    })
}

/// Parse a JSON document into a request
pub fn parse_request_str(input: &str) -> ValidationResult<ChatCompletionRequest> {
    let value: Value = serde_json::from_str(input).map_err(|error| {
        ValidationError::new(
            ValidationErrorKind::InvalidRequest,
            "$",
            format!("Malformed request: {}", error),
        )
    })?;
    parse_request(&value)
}
