use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn re_json_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)```json(.*?)```").unwrap())
}

/// Returns the inner content of the first ```json fence, or the whole text
fn parse_target(text: &str) -> &str {
    re_json_fence()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

/// Interprets model output as a strict JSON array of candidate objects
///
/// Malformed JSON and non-array values yield an empty list, which callers
/// treat as "try the next parser" rather than an error.
pub fn parse_json_candidates(text: &str) -> Vec<Value> {
    let target = parse_target(text).trim();

    match serde_json::from_str::<Value>(target) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "Model JSON is not an array");
            Vec::new()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Model output is not strict JSON");
            Vec::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
