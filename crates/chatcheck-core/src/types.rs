//! Core types for chat conversations submitted to a language model
//!
//! This module defines the message model that the validators inspect:
//! role-tagged messages, assistant tool calls, offered tool definitions and
//! the chat completion request that carries them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Sentinel id used by tool calls that were not assigned an identifier
pub const NULL_TOOL_CALL_ID: &str = "null";

/// Message role enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 4] = [Role::System, Role::User, Role::Assistant, Role::Tool];

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }

    /// Look up a role by its wire name
    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects which invariant set a validator enforces
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Requests about to be sent for inference
    Serving,
    /// Conversations used as fine-tuning examples
    Finetuning,
    /// Permissive mode for tests and tooling
    #[default]
    Test,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Serving => write!(f, "serving"),
            ValidationMode::Finetuning => write!(f, "finetuning"),
            ValidationMode::Test => write!(f, "test"),
        }
    }
}

/// A single turn of a conversation, tagged by its role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System(SystemMessage),
    User(UserMessage),
    Assistant(AssistantMessage),
    Tool(ToolMessage),
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Message::System(SystemMessage {
            content: Some(content.into()),
        })
    }

    /// Create a plain-text user message
    pub fn user(content: impl Into<String>) -> Self {
        Message::User(UserMessage {
            content: UserContent::Text(content.into()),
        })
    }

    /// Create an assistant message carrying text
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant(AssistantMessage {
            content: Some(content.into()),
            ..AssistantMessage::default()
        })
    }

    /// Create an assistant message issuing tool calls
    pub fn assistant_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Message::Assistant(AssistantMessage {
            tool_calls: Some(tool_calls),
            ..AssistantMessage::default()
        })
    }

    /// Create a tool response answering the call with `tool_call_id`
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Message::Tool(ToolMessage {
            content: content.into(),
            tool_call_id: Some(tool_call_id.into()),
            name: None,
        })
    }

    /// Role of this message
    pub fn role(&self) -> Role {
        match self {
            Message::System(_) => Role::System,
            Message::User(_) => Role::User,
            Message::Assistant(_) => Role::Assistant,
            Message::Tool(_) => Role::Tool,
        }
    }

    /// Tool calls issued by an assistant message, if any
    pub fn tool_calls(&self) -> Option<&[ToolCall]> {
        match self {
            Message::Assistant(message) => message.tool_calls.as_deref(),
            _ => None,
        }
    }
}

/// System prompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// User turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub content: UserContent,
}

/// User content is either plain text or a list of chunks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Chunks(Vec<ContentChunk>),
}

/// A chunk of multimodal user content
///
/// Media payloads are carried as-is; decoding them is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentChunk {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
    Image { image: String },
}

/// Image reference, either a bare URL or a URL with a detail hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageUrl {
    Url(String),
    Detailed {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

/// Assistant turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// Marks a partial assistant turn the model should continue
    #[serde(default)]
    pub prefix: bool,

    /// Loss weight of the turn in a fine-tuning example
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl AssistantMessage {
    /// True when the message carries non-empty text
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|content| !content.is_empty())
    }

    /// True when the message carries at least one tool call
    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls.as_ref().is_some_and(|calls| !calls.is_empty())
    }
}

/// Tool response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Kind of a tool; only functions exist today
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    #[default]
    Function,
}

/// Tool call issued by the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default = "default_tool_call_id")]
    pub id: String,

    #[serde(rename = "type", default)]
    pub tool_type: ToolType,

    pub function: FunctionCall,
}

fn default_tool_call_id() -> String {
    NULL_TOOL_CALL_ID.to_string()
}

impl ToolCall {
    /// Create a tool call with an explicit id
    pub fn new(id: impl Into<String>, function: FunctionCall) -> Self {
        Self {
            id: id.into(),
            tool_type: ToolType::Function,
            function,
        }
    }

    /// Create a tool call without an id
    pub fn without_id(function: FunctionCall) -> Self {
        Self::new(NULL_TOOL_CALL_ID, function)
    }

    /// True when the id is the `"null"` sentinel
    pub fn has_null_id(&self) -> bool {
        self.id == NULL_TOOL_CALL_ID
    }
}

/// Named function invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: FunctionArguments,
}

impl FunctionCall {
    /// Create a call with JSON-object arguments
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments: FunctionArguments::Json(arguments),
        }
    }
}

/// Arguments are either a JSON object or its encoded string form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionArguments {
    Json(Map<String, Value>),
    Text(String),
}

/// Tool offered to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type", default)]
    pub tool_type: ToolType,

    pub function: Function,
}

impl Tool {
    /// Wrap a function definition as a tool
    pub fn function(function: Function) -> Self {
        Self {
            tool_type: ToolType::Function,
            function,
        }
    }
}

/// Function definition with a JSON-schema description of its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "empty_schema")]
    pub parameters: Value,
}

fn empty_schema() -> Value {
    Value::Object(Map::new())
}

impl Function {
    pub fn new(name: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Chat completion request
///
/// Only `model`, `messages` and `tools` take part in validation; the sampling
/// fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub messages: Vec<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,

    #[serde(default)]
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Create a request without a model or tools
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            model: None,
            messages,
            tools: None,
            temperature: None,
            top_p: None,
            max_tokens: None,
            random_seed: None,
            stream: false,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }
}
