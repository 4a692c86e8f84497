//! Before/after value classification
//!
//! Decides which rendering path an attribute takes: identical text, a
//! structural JSON diff, or two plain pretty-printed blocks.

use serde_json::Value;

/// Outcome of classifying one attribute's before/after text
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Both sides are the same text
    Identical,
    /// Both sides parse as JSON
    BothJson(Value, Value),
    /// At least one side is not JSON
    Mixed,
}

/// Classify a before/after pair.
///
/// A JSON parse failure is an outcome, not an error: it selects `Mixed`.
pub fn classify(before: &str, after: &str) -> Classification {
    if before == after {
        return Classification::Identical;
    }

    match (try_parse_json(before), try_parse_json(after)) {
        (Some(before), Some(after)) => Classification::BothJson(before, after),
        _ => Classification::Mixed,
    }
}

/// Pretty-print a value for display.
///
/// Valid JSON is re-serialized with two-space indentation; anything else is
/// emitted as a quoted JSON string literal.
pub fn prettify(input: &str) -> String {
    match try_parse_json(input) {
        Some(value) => format!("{:#}", value),
        None => Value::String(input.to_string()).to_string(),
    }
}

fn try_parse_json(input: &str) -> Option<Value> {
    serde_json::from_str(input).ok()
}
