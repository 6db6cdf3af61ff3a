//! Top-level request validation
//!
//! [`RequestValidator`] ties the passes together: the serving model check,
//! structural validation, per-message content validation and tool
//! validation. Each step stops at the first violation.

use crate::content::validate_message_list_content;
use crate::context::ValidationContext;
use crate::error::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::profile::{ValidationRules, ValidatorProfile};
use crate::structure::validate_message_list_structure;
use crate::tools;
use chatcheck_core::{ChatCompletionRequest, Message, Tool, ValidationMode};
use tracing::debug;

/// Validates chat requests under a fixed mode and profile
///
/// The validator holds no state besides its configuration and can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct RequestValidator {
    mode: ValidationMode,
    profile: ValidatorProfile,
    rules: ValidationRules,
}

impl RequestValidator {
    /// Create a validator for `mode` running the rules of `profile`
    pub fn new(mode: ValidationMode, profile: ValidatorProfile) -> Self {
        Self {
            mode,
            profile,
            rules: profile.rules(),
        }
    }

    /// Create a validator with a custom rule set
    pub fn with_rules(mode: ValidationMode, profile: ValidatorProfile, rules: ValidationRules) -> Self {
        Self { mode, profile, rules }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn profile(&self) -> ValidatorProfile {
        self.profile
    }

    /// Validate a full request and hand it back unchanged
    ///
    /// # Examples
    ///
    /// ```
    /// use chatcheck_core::{ChatCompletionRequest, Message, ValidationMode};
    /// use chatcheck_validation::{RequestValidator, ValidatorProfile};
    ///
    /// let validator = RequestValidator::new(ValidationMode::Serving, ValidatorProfile::Strict);
    /// let request = ChatCompletionRequest::new(vec![Message::user("Hello")]).with_model("my-model");
    ///
    /// assert!(validator.validate_request(&request).is_ok());
    /// ```
    pub fn validate_request<'a>(
        &self,
        request: &'a ChatCompletionRequest,
    ) -> ValidationResult<&'a ChatCompletionRequest> {
        debug!(
            mode = %self.mode,
            profile = %self.profile,
            model = request.model.as_deref().unwrap_or(""),
            message_count = request.messages.len(),
            tool_count = request.tools.as_ref().map_or(0, Vec::len),
            "Validating request"
        );

        let ctx = ValidationContext::new(self.mode);

        let result = self
            .validate_model(request, &ctx)
            .and_then(|_| self.validate_messages_with_context(&request.messages, &ctx.child("messages")))
            .and_then(|_| {
                let tools = request.tools.as_deref().unwrap_or_default();
                tools::validate_tools(tools, &self.rules, &ctx.child("tools"))
            });

        match result {
            Ok(()) => Ok(request),
            Err(error) => {
                debug!(kind = ?error.kind, path = %error.path, "Request validation failed");
                Err(error)
            }
        }
    }

    /// Validate a conversation: structure first, then message content
    pub fn validate_messages(&self, messages: &[Message]) -> ValidationResult<()> {
        self.validate_messages_with_context(messages, &ValidationContext::new(self.mode))
    }

    /// Validate the tools offered alongside a conversation
    pub fn validate_tools(&self, tools: &[Tool]) -> ValidationResult<()> {
        tools::validate_tools(tools, &self.rules, &ValidationContext::new(self.mode))
    }

    fn validate_messages_with_context(
        &self,
        messages: &[Message],
        ctx: &ValidationContext,
    ) -> ValidationResult<()> {
        validate_message_list_structure(messages, &self.rules, ctx)?;
        validate_message_list_content(messages, &self.rules, ctx)
    }

    fn validate_model(&self, request: &ChatCompletionRequest, ctx: &ValidationContext) -> ValidationResult<()> {
        if ctx.is_serving() && request.model.is_none() {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidRequest,
                ctx.child("model").path,
                "Model name parameter is required for serving mode",
            ));
        }
        Ok(())
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new(ValidationMode::default(), ValidatorProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RequestValidator>();
    }

    #[test]
    fn test_default_validator() {
        let validator = RequestValidator::default();
        assert_eq!(validator.mode(), ValidationMode::Test);
        assert_eq!(validator.profile(), ValidatorProfile::Strict);
    }

    #[test]
    fn test_serving_requires_model() {
        let validator = RequestValidator::new(ValidationMode::Serving, ValidatorProfile::Base);
        let request = ChatCompletionRequest::new(vec![Message::user("hi")]);

        let error = validator.validate_request(&request).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidRequest);
        assert_eq!(error.path, "$.model");

        let test_mode = RequestValidator::new(ValidationMode::Test, ValidatorProfile::Base);
        assert!(test_mode.validate_request(&request).is_ok());
    }

    #[test]
    fn test_returns_same_request() {
        let validator = RequestValidator::default();
        let request = ChatCompletionRequest::new(vec![Message::system("be brief")]);
        let validated = validator.validate_request(&request).unwrap();
        assert!(std::ptr::eq(validated, &request));
    }

    #[test]
    fn test_message_paths_are_rooted_at_messages() {
        let validator = RequestValidator::new(ValidationMode::Test, ValidatorProfile::Base);
        let request = ChatCompletionRequest::new(vec![Message::user("hi"), Message::tool("x", "abc123xyz")]);

        let error = validator.validate_request(&request).unwrap_err();
        assert_eq!(error.path, "$.messages[1]");

        let error = validator.validate_messages(&request.messages).unwrap_err();
        assert_eq!(error.path, "$[1]");
    }

    #[test]
    fn test_custom_rules_replace_schema_check() {
        fn reject_all(_: &serde_json::Value) -> Result<(), String> {
            Err("schemas are disabled".to_string())
        }

        let rules = ValidationRules {
            schema_syntax: reject_all,
            ..ValidationRules::base()
        };
        let tools = vec![Tool::function(chatcheck_core::Function::new(
            "get_weather",
            serde_json::json!({"type": "object", "properties": {"city": {"type": "string"}}}),
        ))];

        let stock = RequestValidator::new(ValidationMode::Test, ValidatorProfile::Base);
        assert!(stock.validate_tools(&tools).is_ok());

        let custom = RequestValidator::with_rules(ValidationMode::Test, ValidatorProfile::Base, rules);
        assert_eq!(custom.profile(), ValidatorProfile::Base);

        let error = custom.validate_tools(&tools).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::InvalidToolSchema);
        assert!(error.path.starts_with("$[0]"));
    }
}
