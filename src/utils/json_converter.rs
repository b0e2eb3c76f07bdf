use serde_json::Value;

/// Convert a JSON value to a short, display-friendly string.
pub fn value_to_short_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(value_to_short_string)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(obj) => obj
            .iter()
            .map(|(key, val)| format!("{}: {}", key, value_to_short_string(val)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
    }
}
