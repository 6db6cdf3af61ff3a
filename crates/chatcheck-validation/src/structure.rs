//! Conversation shape validation
//!
//! The structural passes run over the whole message list before any
//! per-message content rule:
//!
//! 1. the conversation is non-empty and a lone message is `user` or `system`
//! 2. the last message suits the mode (delegated to the profile's rule)
//! 3. every role follows a legal predecessor
//! 4. assistant tool calls are answered by as many tool messages

use crate::context::ValidationContext;
use crate::error::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::profile::ValidationRules;
use chatcheck_core::{Message, Role, ValidationMode};
use tracing::trace;

/// Run all structural passes over `messages`
///
/// `ctx` points at the message list itself; errors on individual messages are
/// reported at `ctx.path[index]`.
pub fn validate_message_list_structure(
    messages: &[Message],
    rules: &ValidationRules,
    ctx: &ValidationContext,
) -> ValidationResult<()> {
    let Some(last) = messages.last() else {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidMessageStructure,
            &ctx.path,
            "Conversation must have at least one message",
        ));
    };

    if messages.len() == 1 && !matches!(last.role(), Role::User | Role::System) {
        return Err(ValidationError::with_violation(
            ValidationErrorKind::InvalidMessageStructure,
            ctx.child_index(0).path,
            "Conversation must start with a user message or system message",
            ValidationError::create_violation("first_role", "user or system", last.role().as_str()),
        ));
    }

    // Fine-tuning examples always end on an assistant turn, even when alone
    if ctx.is_finetuning() || messages.len() > 1 {
        trace!(path = %ctx.path, "Checking last message");
        (rules.last_message)(last, &ctx.child_index(messages.len() - 1))?;
    }

    trace!(path = %ctx.path, "Checking role order");
    validate_message_order(messages, ctx)?;

    trace!(path = %ctx.path, "Checking tool call balance");
    validate_tool_call_balance(messages, ctx)
}

/// Roles that may directly follow `previous`
pub fn allowed_successors(previous: Role) -> &'static [Role] {
    match previous {
        Role::System | Role::User => &[Role::System, Role::User, Role::Assistant],
        Role::Assistant => &[Role::Assistant, Role::User, Role::Tool],
        Role::Tool => &[Role::Assistant, Role::Tool],
    }
}

/// True iff `current` may directly follow `previous`
pub fn is_allowed_transition(previous: Role, current: Role) -> bool {
    allowed_successors(previous).contains(&current)
}

/// Last-message rule shared by both profiles
///
/// Fine-tuning examples must end on an assistant turn. Otherwise the
/// conversation must hand the turn to the model: a user or tool message, or an
/// assistant prefix to be continued.
pub fn validate_last_message_role(message: &Message, ctx: &ValidationContext) -> ValidationResult<()> {
    let role = message.role();

    if ctx.is_finetuning() {
        if role != Role::Assistant {
            return Err(ValidationError::with_violation(
                ValidationErrorKind::InvalidMessageStructure,
                &ctx.path,
                format!("Expected last role Assistant for finetuning but got {}", role),
                ValidationError::create_violation("last_role", "assistant", role.as_str()),
            ));
        }
        return Ok(());
    }

    let hands_over_turn = match message {
        Message::User(_) | Message::Tool(_) => true,
        Message::Assistant(assistant) => assistant.prefix,
        Message::System(_) => false,
    };

    if !hands_over_turn {
        return Err(ValidationError::with_violation(
            ValidationErrorKind::InvalidMessageStructure,
            &ctx.path,
            format!(
                "Expected last role User or Tool (or Assistant with prefix True) for {} but got {}",
                ctx.mode, role
            ),
            ValidationError::create_violation(
                "last_role",
                "user, tool or assistant with prefix",
                role.as_str(),
            ),
        ));
    }

    Ok(())
}

fn validate_message_order(messages: &[Message], ctx: &ValidationContext) -> ValidationResult<()> {
    for (index, pair) in messages.windows(2).enumerate() {
        let previous = pair[0].role();
        let current = pair[1].role();

        if !is_allowed_transition(previous, current) {
            let expected = allowed_successors(previous)
                .iter()
                .map(Role::as_str)
                .collect::<Vec<_>>()
                .join(", ");

            return Err(ValidationError::with_violation(
                ValidationErrorKind::InvalidMessageStructure,
                ctx.child_index(index + 1).path,
                format!("Unexpected role '{}' after role '{}'", current, previous),
                ValidationError::create_violation("role_order", format!("one of: {}", expected), current.as_str()),
            ));
        }
    }

    Ok(())
}

fn validate_tool_call_balance(messages: &[Message], ctx: &ValidationContext) -> ValidationResult<()> {
    // The first message only seeds the walk; nothing before it can owe responses
    let outstanding = messages
        .iter()
        .enumerate()
        .skip(1)
        .try_fold(0isize, |expected, (index, message)| match message {
            Message::Tool(_) => Ok(expected - 1),
            Message::Assistant(assistant) => {
                if expected != 0 {
                    return Err(unbalanced(
                        ctx.child_index(index).path,
                        "Not the same number of function calls and responses",
                        expected,
                    ));
                }
                Ok(assistant.tool_calls.as_ref().map_or(0, |calls| calls.len() as isize))
            }
            Message::System(_) | Message::User(_) => Ok(expected),
        })?;

    match ctx.mode {
        ValidationMode::Serving if outstanding != 0 => Err(unbalanced(
            ctx.path.clone(),
            "Not the same number of function calls and responses",
            outstanding,
        )),
        // A fine-tuning example may end right after a single outstanding call
        ValidationMode::Finetuning if !matches!(outstanding, 0 | 1) => Err(unbalanced(
            ctx.path.clone(),
            "Too many function calls and too few responses",
            outstanding,
        )),
        _ => Ok(()),
    }
}

fn unbalanced(path: String, message: &str, outstanding: isize) -> ValidationError {
    ValidationError::with_violation(
        ValidationErrorKind::InvalidMessageStructure,
        path,
        message,
        ValidationError::create_violation(
            "tool_call_balance",
            "every tool call answered by one tool message",
            format!("{} outstanding tool response(s)", outstanding),
        ),
    )
}
