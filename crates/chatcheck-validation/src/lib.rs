//! Chatcheck Validation - structural validation of chat conversations
//!
//! This crate checks that a chat completion request is well formed before it
//! is tokenized for serving or accepted into a fine-tuning dataset:
//! - **Structure**: first/last message roles, legal role adjacency and
//!   balanced tool calls and tool responses
//! - **Content**: per-role message rules such as content/tool_calls
//!   exclusivity, prefix placement and training weights
//! - **Tools**: identifier format of function names and legal JSON-schema
//!   parameter documents
//!
//! ## Features
//!
//! - **Three Validation Modes**: Serving, Finetuning and Test
//! - **Two Profiles**: Base (names only) and Strict (tool call ids too)
//! - **Fail-Fast Errors**: the first violation wins, with its kind and JSON path
//! - **Batch Processing**: validation of whole datasets, one error per example
//!
//! ## Quick Start
//!
//! ```rust
//! use chatcheck_validation::{parse_request, RequestValidator, ValidatorProfile};
//! use chatcheck_core::ValidationMode;
//! use serde_json::json;
//!
//! let request = parse_request(&json!({
//!     "model": "my-model",
//!     "messages": [
//!         {"role": "user", "content": "Hello, world!"}
//!     ]
//! }))
//! .unwrap();
//!
//! let validator = RequestValidator::new(ValidationMode::Serving, ValidatorProfile::Strict);
//! match validator.validate_request(&request) {
//!     Ok(_) => println!("Valid request!"),
//!     Err(e) => println!("Validation error: {}", e),
//! }
//! ```
//!
//! ## Validation Modes
//!
//! - **Serving**: a model name is required and every tool call must be answered
//! - **Finetuning**: the example must end with an assistant turn; weights are checked
//! - **Test**: permissive, for building conversations by hand
//!
//! Copyright (c) 2025 Chatcheck Team
//! Licensed under the Apache-2.0 license

pub mod batch;
pub mod content;
pub mod context;
pub mod error;
pub mod format;
pub mod parse;
pub mod profile;
pub mod request;
pub mod structure;
pub mod tools;

// Re-export commonly used types for convenience
pub use batch::{validate_requests_batch, validate_value, BatchReport, ValidationConfig};
pub use context::ValidationContext;
pub use error::{ValidationError, ValidationErrorKind, ValidationErrors, ValidationResult, Violation};
pub use format::{check_schema_syntax, is_valid_call_id, is_valid_identifier, CALL_ID_PATTERN, IDENTIFIER_PATTERN};
pub use parse::{parse_request, parse_request_str};
pub use profile::{ValidationRules, ValidatorProfile};
pub use request::RequestValidator;

pub use chatcheck_core::ValidationMode;
