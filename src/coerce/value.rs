use serde_json::Value;

/// Scalar rendered as text; `None` for containers.
pub(super) fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Any value rendered as text, containers joined with single spaces.
pub(super) fn flat_text(v: &Value) -> String {
    match v {
        Value::Array(items) => join_texts(items.iter()),
        Value::Object(map) => join_texts(map.values()),
        other => scalar_text(other).unwrap_or_default(),
    }
}

fn join_texts<'a>(items: impl Iterator<Item = &'a Value>) -> String {
    items
        .map(flat_text)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Value as a list of strings: arrays item-wise, `null` as empty, anything else as one item.
pub(super) fn text_list(v: &Value) -> Vec<String> {
    match v {
        Value::Array(items) => items.iter().map(flat_text).collect(),
        Value::Null => Vec::new(),
        other => vec![flat_text(other)],
    }
}

/// Numeric reading of a value; numeric strings (with an optional trailing `%`) are accepted.
pub(super) fn number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let t = s.trim();
            let t = t.strip_suffix('%').unwrap_or(t).trim_end();
            t.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

pub(super) fn str_value(s: impl Into<String>) -> Value {
    Value::String(s.into())
}
