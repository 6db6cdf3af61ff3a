//! Validation demonstration example
//!
//! Copyright (c) 2025 Chatcheck Team
//! Licensed under the Apache-2.0 license

use chatcheck_core::{ChatCompletionRequest, FunctionCall, Message, ToolCall, ValidationMode};
use chatcheck_validation::{
    validate_requests_batch, RequestValidator, ValidationConfig, ValidatorProfile,
};
use serde_json::{json, Map};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Chatcheck Validation Demo ===\n");

    demo_serving_request();

    println!();

    demo_tool_round_trip();

    println!();

    demo_dataset();

    Ok(())
}

fn demo_serving_request() {
    println!("--- Serving Request Demo ---");

    let validator = RequestValidator::new(ValidationMode::Serving, ValidatorProfile::Strict);

    let valid = ChatCompletionRequest::new(vec![Message::user("Hello, world!")]).with_model("demo-model");
    println!("✅ Validating request ending with a user message:");
    match validator.validate_request(&valid) {
        Ok(_) => println!("   Valid!"),
        Err(e) => println!("   Error: {}", e),
    }

    let missing_model = ChatCompletionRequest::new(vec![Message::user("Hello, world!")]);
    println!("\n❌ Validating request without a model:");
    match validator.validate_request(&missing_model) {
        Ok(_) => println!("   Unexpectedly valid!"),
        Err(e) => println!("   Error: {}", e),
    }
}

fn demo_tool_round_trip() {
    println!("--- Tool Call Demo ---");

    let call = ToolCall::new("abc123def", FunctionCall::new("get_weather", Map::new()));
    let messages = vec![
        Message::user("What's the weather?"),
        Message::assistant_tool_calls(vec![call]),
        Message::tool("Sunny", "abc123def"),
        Message::assistant("It is sunny."),
    ];

    for profile in [ValidatorProfile::Base, ValidatorProfile::Strict] {
        let validator = RequestValidator::new(ValidationMode::Finetuning, profile);
        match validator.validate_messages(&messages) {
            Ok(()) => println!("✅ {} profile: valid", profile),
            Err(e) => println!("❌ {} profile: {}", profile, e),
        }
    }

    let bad_id = vec![
        Message::user("What's the weather?"),
        Message::assistant_tool_calls(vec![ToolCall::new("call-1", FunctionCall::new("get_weather", Map::new()))]),
        Message::tool("Sunny", "call-1"),
        Message::assistant("It is sunny."),
    ];
    let validator = RequestValidator::new(ValidationMode::Finetuning, ValidatorProfile::Strict);
    println!("\n❌ Validating tool call with a malformed id:");
    if let Err(e) = validator.validate_messages(&bad_id) {
        println!("   Error: {}", e);
    }
}

fn demo_dataset() {
    println!("--- Dataset Demo ---");

    let examples = vec![
        json!({"messages": [{"role": "user", "content": "Hi"}, {"role": "assistant", "content": "Hello"}]}),
        json!({"messages": [{"role": "user", "content": "Hi"}, {"role": "user", "content": "Anyone?"}]}),
        json!({"messages": [{"role": "system"}, {"role": "user", "content": "Hi"}]}),
    ];

    let report = validate_requests_batch(&examples, &ValidationConfig::finetuning());
    println!("Checked {} example(s), {} valid", report.checked, report.valid);
    for error in &report.errors.errors {
        println!("   [{}] {}", error.path, error.message);
    }
}
