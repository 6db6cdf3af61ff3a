//! Format checkers for names, tool call ids and tool parameter schemas

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Pattern for function, tool and tool message names
pub const IDENTIFIER_PATTERN: &str = r"^[a-zA-Z0-9_-]{1,64}$";

/// Pattern for tool call ids checked by the strict profile
pub const CALL_ID_PATTERN: &str = r"^[a-zA-Z0-9]{9}$";

static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();
static CALL_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn identifier_regex() -> &'static Regex {
    IDENTIFIER_REGEX.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).unwrap())
}

fn call_id_regex() -> &'static Regex {
    CALL_ID_REGEX.get_or_init(|| Regex::new(CALL_ID_PATTERN).unwrap())
}

/// True iff `name` is 1 to 64 ASCII letters, digits, underscores or dashes
pub fn is_valid_identifier(name: &str) -> bool {
    identifier_regex().is_match(name)
}

/// True iff `id` is exactly 9 ASCII letters or digits
pub fn is_valid_call_id(id: &str) -> bool {
    call_id_regex().is_match(id)
}

/// Check that `schema` is itself a legal Draft 7 JSON schema
///
/// Returns the checker's message on failure. Only the document's syntax is
/// checked; no instance is validated against it.
pub fn check_schema_syntax(schema: &Value) -> Result<(), String> {
    jsonschema::draft7::meta::validate(schema).map_err(|error| error.to_string())
}
