//! Chatcheck Core - message model for chat conversation validation
//!
//! This crate defines the typed values the validators in
//! `chatcheck-validation` inspect. Everything here is plain data: the
//! caller builds (or deserializes) a conversation and hands it over for
//! validation, which never mutates it.
//!
//! # Main Components
//!
//! - **Messages**: a closed, role-tagged union of system, user, assistant and
//!   tool turns
//! - **Tool calls**: assistant-issued function invocations with identifiers
//! - **Tools**: offered functions described by a JSON-schema document
//! - **Requests**: the chat completion envelope carrying messages and tools
//!
//! # Example
//!
//! ```
//! use chatcheck_core::{ChatCompletionRequest, Message, Role};
//!
//! let request = ChatCompletionRequest::new(vec![
//!     Message::system("You are terse."),
//!     Message::user("Hello"),
//! ])
//! .with_model("my-model");
//!
//! assert_eq!(request.messages[1].role(), Role::User);
//! ```

pub mod types;

pub use types::{
    // Messages
    Message, Role, SystemMessage, UserMessage, UserContent, ContentChunk, ImageUrl,
    AssistantMessage, ToolMessage,

    // Tool calls and definitions
    ToolCall, ToolType, FunctionCall, FunctionArguments, Tool, Function,
    NULL_TOOL_CALL_ID,

    // Requests
    ChatCompletionRequest, ValidationMode,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
