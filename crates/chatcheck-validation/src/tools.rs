//! Validation of the tools offered in a request

use crate::content::invalid_name;
use crate::context::ValidationContext;
use crate::error::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::format::is_valid_identifier;
use crate::profile::ValidationRules;
use chatcheck_core::{Function, Tool};

/// Check a function definition: legal parameter schema first, then name
pub fn validate_function(
    function: &Function,
    rules: &ValidationRules,
    ctx: &ValidationContext,
) -> ValidationResult<()> {
    if let Err(message) = (rules.schema_syntax)(&function.parameters) {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidToolSchema,
            ctx.child("parameters").path,
            format!("Invalid tool schema: {}", message),
        ));
    }

    if !is_valid_identifier(&function.name) {
        return Err(invalid_name(ValidationErrorKind::InvalidTool, &function.name, &ctx.child("name")));
    }

    Ok(())
}

/// Check every tool in order; the first failure wins
pub fn validate_tools(tools: &[Tool], rules: &ValidationRules, ctx: &ValidationContext) -> ValidationResult<()> {
    tools.iter().enumerate().try_for_each(|(index, tool)| {
        validate_function(&tool.function, rules, &ctx.child_index(index).child("function"))
    })
}
