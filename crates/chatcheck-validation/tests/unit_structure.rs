//! Unit tests for conversation structure validation
//!
//! Covers the single-message rule, last-message rules per mode, role
//! adjacency and the balance between tool calls and tool responses.

use chatcheck_core::{FunctionCall, Message, ToolCall, ValidationMode};
use chatcheck_validation::{RequestValidator, ValidationErrorKind, ValidatorProfile};
use serde_json::Map;

fn call(id: &str) -> ToolCall {
    ToolCall::new(id, FunctionCall::new("get_weather", Map::new()))
}

fn validator(mode: ValidationMode) -> RequestValidator {
    RequestValidator::new(mode, ValidatorProfile::Strict)
}

#[cfg(test)]
mod single_message {
    use super::*;

    #[test]
    fn test_lone_system_message_is_valid() {
        for mode in [ValidationMode::Serving, ValidationMode::Test] {
            let result = validator(mode).validate_messages(&[Message::system("hi")]);
            assert!(result.is_ok(), "{}: {:?}", mode, result);
        }
    }

    #[test]
    fn test_lone_user_message_is_valid() {
        assert!(validator(ValidationMode::Serving).validate_messages(&[Message::user("hi")]).is_ok());
    }

    #[test]
    fn test_lone_assistant_or_tool_message_fails() {
        let messages = [
            Message::assistant("hello"),
            Message::tool("sunny", "abc123xyz"),
        ];

        for message in messages {
            let error = validator(ValidationMode::Test).validate_messages(&[message]).unwrap_err();
            assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
            assert_eq!(error.path, "$[0]");
            assert!(error.message.contains("must start with a user message or system message"));
        }
    }

    #[test]
    fn test_lone_user_message_fails_in_finetuning() {
        let error = validator(ValidationMode::Finetuning)
            .validate_messages(&[Message::user("hi")])
            .unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
        assert!(error.message.contains("Expected last role Assistant for finetuning"));
    }

    #[test]
    fn test_empty_conversation_fails() {
        let error = validator(ValidationMode::Test).validate_messages(&[]).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
        assert!(error.message.contains("at least one message"));
    }
}

#[cfg(test)]
mod last_message {
    use super::*;

    #[test]
    fn test_serving_accepts_user_and_tool_endings() {
        let conversations = vec![
            vec![Message::system("be brief"), Message::user("hi")],
            vec![
                Message::user("weather?"),
                Message::assistant_tool_calls(vec![call("abc123xyz")]),
                Message::tool("sunny", "abc123xyz"),
            ],
        ];

        for messages in conversations {
            let result = validator(ValidationMode::Serving).validate_messages(&messages);
            assert!(result.is_ok(), "{:?}", result);
        }
    }

    #[test]
    fn test_serving_rejects_assistant_ending_without_prefix() {
        let messages = [Message::user("hi"), Message::assistant("hello")];
        let error = validator(ValidationMode::Serving).validate_messages(&messages).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
        assert_eq!(error.path, "$[1]");
        assert!(error.message.contains("Expected last role User or Tool"));
    }

    #[test]
    fn test_serving_accepts_assistant_prefix_ending() {
        let mut prefix = Message::assistant("Once upon a time");
        if let Message::Assistant(assistant) = &mut prefix {
            assistant.prefix = true;
        }

        let result = validator(ValidationMode::Serving).validate_messages(&[Message::user("story"), prefix]);
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_system_ending_fails_outside_finetuning() {
        let messages = [Message::user("hi"), Message::system("late instruction")];
        let error = validator(ValidationMode::Test).validate_messages(&messages).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
    }

    #[test]
    fn test_finetuning_requires_assistant_ending() {
        let messages = [Message::user("hi"), Message::assistant("hello")];
        assert!(validator(ValidationMode::Finetuning).validate_messages(&messages).is_ok());

        let messages = [Message::user("hi"), Message::assistant("hello"), Message::user("bye")];
        let error = validator(ValidationMode::Finetuning).validate_messages(&messages).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
        assert_eq!(error.path, "$[2]");
    }
}

#[cfg(test)]
mod role_order {
    use super::*;

    #[test]
    fn test_user_cannot_be_followed_by_tool() {
        let messages = [
            Message::user("hi"),
            Message::tool("sunny", "abc123xyz"),
            Message::user("thanks"),
        ];
        let error = validator(ValidationMode::Test).validate_messages(&messages).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
        assert_eq!(error.path, "$[1]");
        assert!(error.message.contains("Unexpected role 'tool' after role 'user'"));
    }

    #[test]
    fn test_tool_cannot_be_followed_by_user() {
        let messages = [
            Message::user("weather?"),
            Message::assistant_tool_calls(vec![call("abc123xyz")]),
            Message::tool("sunny", "abc123xyz"),
            Message::user("thanks"),
        ];
        let error = validator(ValidationMode::Test).validate_messages(&messages).unwrap_err();

        assert_eq!(error.path, "$[3]");
        assert!(error.schema_violations[0].expected.contains("assistant, tool"));
    }

    #[test]
    fn test_consecutive_users_and_systems_are_legal() {
        let messages = [
            Message::system("a"),
            Message::system("b"),
            Message::user("c"),
            Message::user("d"),
        ];
        assert!(validator(ValidationMode::Serving).validate_messages(&messages).is_ok());
    }
}

#[cfg(test)]
mod tool_call_balance {
    use super::*;

    #[test]
    fn test_serving_rejects_unanswered_calls() {
        let messages = [
            Message::user("hi"),
            Message::assistant_tool_calls(vec![call("abc123xyz"), call("def456uvw")]),
        ];
        let error = validator(ValidationMode::Serving).validate_messages(&messages).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
    }

    #[test]
    fn test_serving_rejects_partially_answered_calls() {
        let messages = [
            Message::user("hi"),
            Message::assistant_tool_calls(vec![call("abc123xyz"), call("def456uvw")]),
            Message::tool("sunny", "abc123xyz"),
        ];
        let error = RequestValidator::new(ValidationMode::Serving, ValidatorProfile::Base)
            .validate_messages(&messages)
            .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
        assert_eq!(error.path, "$");
        assert!(error.message.contains("Not the same number of function calls and responses"));
        assert!(error.schema_violations[0].actual.starts_with("1 outstanding"));
    }

    #[test]
    fn test_serving_accepts_answered_calls() {
        let messages = [
            Message::user("hi"),
            Message::assistant_tool_calls(vec![call("abc123xyz")]),
            Message::tool("sunny", "abc123xyz"),
        ];
        assert!(validator(ValidationMode::Serving).validate_messages(&messages).is_ok());
    }

    #[test]
    fn test_calls_in_first_message_are_not_counted() {
        let messages = [
            Message::assistant_tool_calls(vec![call("abc123xyz")]),
            Message::tool("sunny", "abc123xyz"),
        ];
        let error = validator(ValidationMode::Serving).validate_messages(&messages).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
        assert!(error.message.contains("Not the same number of function calls and responses"));
    }

    #[test]
    fn test_surplus_tool_response_fails() {
        let messages = [
            Message::user("hi"),
            Message::assistant_tool_calls(vec![call("abc123xyz")]),
            Message::tool("sunny", "abc123xyz"),
            Message::tool("rainy", "abc123xyz"),
        ];

        let error = validator(ValidationMode::Serving).validate_messages(&messages).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
        assert!(error.message.contains("Not the same number of function calls and responses"));

        let error = validator(ValidationMode::Finetuning).validate_messages(&messages).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
    }

    #[test]
    fn test_assistant_before_all_responses_fails() {
        let messages = [
            Message::user("hi"),
            Message::assistant_tool_calls(vec![call("abc123xyz"), call("def456uvw")]),
            Message::tool("sunny", "abc123xyz"),
            Message::assistant("it is sunny"),
            Message::user("thanks"),
        ];
        let error = validator(ValidationMode::Test).validate_messages(&messages).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
        assert_eq!(error.path, "$[3]");
    }

    #[test]
    fn test_finetuning_tolerates_one_outstanding_call() {
        let messages = [
            Message::user("hi"),
            Message::assistant_tool_calls(vec![ToolCall::without_id(FunctionCall::new("get_weather", Map::new()))]),
        ];
        let result = validator(ValidationMode::Finetuning).validate_messages(&messages);
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_finetuning_rejects_several_outstanding_calls() {
        let messages = [
            Message::user("hi"),
            Message::assistant_tool_calls(vec![call("abc123xyz"), call("def456uvw")]),
        ];
        let error = validator(ValidationMode::Finetuning).validate_messages(&messages).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::InvalidMessageStructure);
        assert!(error.message.contains("Too many function calls and too few responses"));
    }

    #[test]
    fn test_test_mode_skips_trailing_balance() {
        let messages = [
            Message::user("hi"),
            Message::assistant_tool_calls(vec![call("abc123xyz"), call("def456uvw")]),
            Message::tool("sunny", "abc123xyz"),
        ];
        assert!(validator(ValidationMode::Test).validate_messages(&messages).is_ok());
    }
}
