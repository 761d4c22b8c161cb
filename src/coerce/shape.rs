use serde_json::{Map, Value, json};

use crate::coerce::engine::Work;
use crate::coerce::value::{flat_text, scalar_text, str_value, text_list};
use crate::foundation::diagnostic::{DiagnosticKind, DiagnosticLog};
use crate::foundation::text::{split_delimited, split_fragments};
use crate::schema::rule::{BucketRule, FieldKind, FieldRule, GroupRule, ListRule};

/// Bring every present field into the container shape its rule expects.
pub(super) fn shape_pass(work: &mut Work<'_>) {
    let catalog = work.catalog;
    for rule in catalog.fields() {
        let Some(value) = work.fields.remove(&rule.name) else {
            continue;
        };
        if let Some(shaped) = shape_field(rule, value, &mut work.log) {
            work.fields.insert(rule.name.clone(), shaped);
        }
    }
}

fn shape_field(rule: &FieldRule, value: Value, log: &mut DiagnosticLog) -> Option<Value> {
    let name = rule.name.as_str();
    if value.is_null() {
        log.record(DiagnosticKind::ShapeCoerced, name, Value::Null, "dropped null value");
        return None;
    }
    match &rule.kind {
        FieldKind::Text { .. } => shape_text(name, value, log),
        FieldKind::List(list) => Some(shape_list(name, list, value, log)),
        FieldKind::Groups(groups) => shape_groups(name, groups, value, log),
        FieldKind::Buckets(buckets) => shape_buckets(name, buckets, value, log),
        FieldKind::Series(_) => shape_series(name, value, log),
        FieldKind::Percentages(_) => shape_numbers(name, value, log),
    }
}

fn shape_text(name: &str, value: Value, log: &mut DiagnosticLog) -> Option<Value> {
    match value {
        Value::String(_) => Some(value),
        Value::Number(_) | Value::Bool(_) => scalar_text(&value).map(Value::String),
        Value::Array(items) if items.iter().all(|v| scalar_text(v).is_some()) => {
            let value = Value::Array(items);
            let joined = flat_text(&value);
            log.record(
                DiagnosticKind::ShapeCoerced,
                name,
                value,
                "joined list into text",
            );
            Some(Value::String(joined))
        }
        other => {
            log.record(
                DiagnosticKind::ShapeCoerced,
                name,
                other,
                "dropped structured value where text was expected",
            );
            None
        }
    }
}

fn shape_list(name: &str, rule: &ListRule, value: Value, log: &mut DiagnosticLog) -> Value {
    let widened = rule.width.is_some();
    let items: Vec<Value> = match value {
        Value::Array(items) => items,
        Value::Object(map) => {
            let items = if widened {
                map.iter().map(|(k, v)| json!([k, v])).collect()
            } else {
                map.values().cloned().collect()
            };
            log.record(
                DiagnosticKind::ShapeCoerced,
                name,
                Value::Object(map),
                "converted mapping to list",
            );
            items
        }
        Value::String(s) => {
            let parts = if rule.split_text {
                split_fragments(&s)
            } else if widened {
                split_delimited(&s, '|')
            } else {
                vec![s.clone()]
            };
            let count = parts.len();
            let items = match &rule.lone_label {
                Some(label) if widened && count == 1 => vec![json!([label, s.as_str()])],
                _ => parts.into_iter().map(Value::String).collect(),
            };
            log.record(
                DiagnosticKind::ShapeCoerced,
                name,
                Value::String(s),
                format!("split text into {count} item(s)"),
            );
            items
        }
        other => {
            log.record(
                DiagnosticKind::ShapeCoerced,
                name,
                other.clone(),
                "wrapped scalar into list",
            );
            vec![other]
        }
    };

    if !widened {
        return Value::Array(items);
    }
    let mut reshaped = false;
    let rows: Vec<Value> = items
        .into_iter()
        .map(|item| match item {
            Value::Array(cells) => {
                if cells.iter().any(Value::is_array) {
                    reshaped = true;
                    Value::Array(flatten_row(cells))
                } else {
                    Value::Array(cells)
                }
            }
            Value::Object(map) => {
                reshaped = true;
                Value::Array(map.into_iter().map(|(_, v)| v).collect())
            }
            scalar => {
                reshaped = true;
                Value::Array(vec![scalar])
            }
        })
        .collect();
    if reshaped {
        log.record(
            DiagnosticKind::ShapeCoerced,
            name,
            Value::Null,
            "converted items to rows",
        );
    }
    Value::Array(rows)
}

fn flatten_row(cells: Vec<Value>) -> Vec<Value> {
    cells
        .into_iter()
        .flat_map(|c| match c {
            Value::Array(inner) => inner,
            other => vec![other],
        })
        .collect()
}

fn shape_groups(
    name: &str,
    rule: &GroupRule,
    value: Value,
    log: &mut DiagnosticLog,
) -> Option<Value> {
    let raw: Vec<Value> = match value {
        Value::Array(items) => items,
        Value::Object(map)
            if map.contains_key(&rule.label_key) || map.contains_key(&rule.items_key) =>
        {
            vec![Value::Object(map)]
        }
        Value::Object(map) => {
            let groups = map
                .iter()
                .map(|(k, v)| group_value(rule, str_value(k.as_str()), text_list(v)))
                .collect();
            log.record(
                DiagnosticKind::ShapeCoerced,
                name,
                Value::Object(map),
                "converted mapping to labelled groups",
            );
            groups
        }
        other => {
            log.record(
                DiagnosticKind::ShapeCoerced,
                name,
                other,
                "dropped value where groups were expected",
            );
            return None;
        }
    };
    Some(Value::Array(
        raw.into_iter()
            .enumerate()
            .map(|(i, g)| normalize_group(&format!("{name}[{i}]"), rule, g, log))
            .collect(),
    ))
}

fn normalize_group(
    path: &str,
    rule: &GroupRule,
    group: Value,
    log: &mut DiagnosticLog,
) -> Value {
    match group {
        Value::Object(map) => {
            let known = [rule.label_key.as_str(), rule.items_key.as_str()];
            drop_extra_keys(path, &map, &known, log);
            let label = map
                .get(&rule.label_key)
                .map(flat_text)
                .unwrap_or_else(|| rule.label_default.clone());
            let items = map.get(&rule.items_key).map(text_list).unwrap_or_default();
            group_value(rule, Value::String(label), items)
        }
        Value::Array(mut cells) if !cells.is_empty() => {
            let label = flat_text(&cells.remove(0));
            let items = match cells.as_slice() {
                [Value::Array(inner)] => inner.iter().map(flat_text).collect(),
                rest => rest.iter().map(flat_text).collect(),
            };
            group_value(rule, Value::String(label), items)
        }
        other => group_value(rule, Value::String(flat_text(&other)), Vec::new()),
    }
}

fn group_value(rule: &GroupRule, label: Value, items: Vec<String>) -> Value {
    let mut map = Map::new();
    map.insert(rule.label_key.clone(), label);
    map.insert(
        rule.items_key.clone(),
        Value::Array(items.into_iter().map(Value::String).collect()),
    );
    Value::Object(map)
}

fn shape_buckets(
    name: &str,
    rule: &BucketRule,
    value: Value,
    log: &mut DiagnosticLog,
) -> Option<Value> {
    let Value::Object(map) = value else {
        log.record(
            DiagnosticKind::ShapeCoerced,
            name,
            value,
            "dropped value where a mapping was expected",
        );
        return None;
    };
    let mut out = Map::new();
    for (key, v) in map {
        let bucket = key.trim().to_lowercase();
        if rule.names.contains(&bucket) && !out.contains_key(&bucket) {
            out.insert(
                bucket,
                Value::Array(text_list(&v).into_iter().map(Value::String).collect()),
            );
        } else {
            log.record(
                DiagnosticKind::UnknownKey,
                &format!("{name}.{key}"),
                v,
                "dropped unknown bucket",
            );
        }
    }
    Some(Value::Object(out))
}

fn shape_series(name: &str, value: Value, log: &mut DiagnosticLog) -> Option<Value> {
    let raw: Vec<Value> = match value {
        Value::Array(items) => items,
        Value::Object(map) if map.contains_key("values") => vec![Value::Object(map)],
        Value::Object(map) => {
            let series = map
                .iter()
                .map(|(k, v)| json!({ "name": k, "values": v }))
                .collect();
            log.record(
                DiagnosticKind::ShapeCoerced,
                name,
                Value::Object(map),
                "converted mapping to named series",
            );
            series
        }
        other => {
            log.record(
                DiagnosticKind::ShapeCoerced,
                name,
                other,
                "dropped value where series were expected",
            );
            return None;
        }
    };
    Some(Value::Array(
        raw.into_iter()
            .enumerate()
            .map(|(i, s)| normalize_series(&format!("{name}[{i}]"), i + 1, s, log))
            .collect(),
    ))
}

fn normalize_series(path: &str, pos: usize, series: Value, log: &mut DiagnosticLog) -> Value {
    let default_name = || format!("Series {pos}");
    let (name, values) = match series {
        Value::Object(map) => {
            drop_extra_keys(path, &map, &["name", "values"], log);
            let name = map
                .get("name")
                .map(flat_text)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(default_name);
            let values = match map.get("values") {
                Some(Value::Array(v)) => v.clone(),
                Some(Value::Null) | None => Vec::new(),
                Some(other) => vec![other.clone()],
            };
            (name, values)
        }
        Value::Array(mut cells) => {
            let named = matches!(cells.first(), Some(Value::String(s)) if s.trim().parse::<f64>().is_err());
            if named {
                let name = flat_text(&cells.remove(0));
                (name, cells)
            } else {
                (default_name(), cells)
            }
        }
        other => (default_name(), vec![other]),
    };
    json!({ "name": name, "values": values })
}

fn drop_extra_keys(
    path: &str,
    map: &Map<String, Value>,
    known: &[&str],
    log: &mut DiagnosticLog,
) {
    for (key, v) in map {
        if !known.contains(&key.as_str()) {
            log.record(
                DiagnosticKind::UnknownKey,
                &format!("{path}.{key}"),
                v.clone(),
                "dropped unknown key",
            );
        }
    }
}

fn shape_numbers(name: &str, value: Value, log: &mut DiagnosticLog) -> Option<Value> {
    let items: Vec<Value> = match value {
        Value::Array(items) => return Some(Value::Array(items)),
        Value::Object(ref map) => map.values().cloned().collect(),
        Value::String(ref s) => s.split(',').map(|p| str_value(p.trim())).collect(),
        ref other => vec![other.clone()],
    };
    log.record(
        DiagnosticKind::ShapeCoerced,
        name,
        value,
        "converted value to a number list",
    );
    Some(Value::Array(items))
}
