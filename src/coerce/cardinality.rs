use serde_json::{Map, Value, json};

use crate::coerce::engine::Work;
use crate::coerce::value::str_value;
use crate::foundation::diagnostic::{DiagnosticKind, DiagnosticLog};
use crate::schema::rule::{BucketRule, FieldKind, GroupRule, ListBounds, ListRule, PadWith};

/// Enforce exact lengths: fixed lists, groups and buckets.
pub(super) fn fixed_pass(work: &mut Work<'_>) {
    let Work {
        catalog,
        fields,
        log,
    } = work;
    for rule in catalog.fields() {
        let Some(value) = fields.get_mut(&rule.name) else {
            continue;
        };
        match &rule.kind {
            FieldKind::List(list) => {
                if let ListBounds::Exact { len } = list.bounds {
                    fit_list(&rule.name, list, len, len, value, log);
                }
            }
            FieldKind::Groups(groups) => fit_groups(&rule.name, groups, value, log),
            FieldKind::Buckets(buckets) => fit_buckets(&rule.name, buckets, value, log),
            _ => {}
        }
    }
}

/// Clamp ranged lists and percentage sets into their bounds.
pub(super) fn dynamic_pass(work: &mut Work<'_>) {
    let Work {
        catalog,
        fields,
        log,
    } = work;
    for rule in catalog.fields() {
        let Some(value) = fields.get_mut(&rule.name) else {
            continue;
        };
        match &rule.kind {
            FieldKind::List(list) => {
                if let ListBounds::Range { min, max } = list.bounds {
                    fit_list(&rule.name, list, min, max, value, log);
                }
            }
            FieldKind::Percentages(p) => {
                if let Value::Array(items) = value {
                    fit_len(&rule.name, items, p.min, p.max, |_| json!(0), log);
                }
            }
            _ => {}
        }
    }
}

fn fit_list(
    name: &str,
    rule: &ListRule,
    min: usize,
    max: usize,
    value: &mut Value,
    log: &mut DiagnosticLog,
) {
    let Value::Array(items) = value else {
        return;
    };
    fit_len(name, items, min, max, |pos| pad_item(rule, pos), log);
    if let Some(width) = rule.width {
        fit_width(name, items, width, log);
    }
}

/// Truncate to `max` or pad up to `min` with generated items (1-based positions).
pub(super) fn fit_len(
    name: &str,
    items: &mut Vec<Value>,
    min: usize,
    max: usize,
    pad: impl Fn(usize) -> Value,
    log: &mut DiagnosticLog,
) {
    let len = items.len();
    if len > max {
        let dropped = items.split_off(max);
        log.record(
            DiagnosticKind::Truncated,
            name,
            Value::Array(dropped),
            format!("cut {len} items to {max}"),
        );
    } else if len < min {
        items.extend((len + 1..=min).map(pad));
        log.record(
            DiagnosticKind::Padded,
            name,
            json!(len),
            format!("padded {len} items to {min}"),
        );
    }
}

fn pad_item(rule: &ListRule, pos: usize) -> Value {
    let head = match &rule.pad {
        PadWith::Item { item } => return item.clone(),
        PadWith::Numbered { prefix } => str_value(format!("{prefix} {pos}")),
        PadWith::Zero => json!(0),
        PadWith::Boilerplate { text } => str_value(format!("{text} ({pos})")),
    };
    match rule.width {
        None => head,
        Some(width) => {
            let mut row = vec![head];
            row.extend((1..width).map(|i| rule.cell(i).map(|c| c.fill()).unwrap_or_default()));
            Value::Array(row)
        }
    }
}

fn fit_width(name: &str, rows: &mut [Value], width: usize, log: &mut DiagnosticLog) {
    let (mut padded, mut cut) = (0, 0);
    for row in rows.iter_mut() {
        if !row.is_array() {
            *row = Value::Array(vec![row.take()]);
        }
        let Value::Array(cells) = row else {
            continue;
        };
        if cells.len() < width {
            cells.resize(width, str_value(""));
            padded += 1;
        } else if cells.len() > width {
            cells.truncate(width);
            cut += 1;
        }
    }
    if padded > 0 {
        log.record(
            DiagnosticKind::Padded,
            name,
            Value::Null,
            format!("padded {padded} item(s) to width {width}"),
        );
    }
    if cut > 0 {
        log.record(
            DiagnosticKind::Truncated,
            name,
            Value::Null,
            format!("cut {cut} item(s) to width {width}"),
        );
    }
}

fn fit_groups(name: &str, rule: &GroupRule, value: &mut Value, log: &mut DiagnosticLog) {
    let Value::Array(groups) = value else {
        return;
    };
    let empty_group = |_: usize| {
        let mut map = Map::new();
        map.insert(rule.label_key.clone(), str_value(rule.label_default.as_str()));
        map.insert(rule.items_key.clone(), Value::Array(Vec::new()));
        Value::Object(map)
    };
    fit_len(name, groups, rule.len, rule.len, empty_group, log);

    let Some(items_len) = rule.items_len else {
        return;
    };
    for (i, group) in groups.iter_mut().enumerate() {
        if let Some(Value::Array(items)) = group.get_mut(&rule.items_key) {
            let path = format!("{name}[{i}].{}", rule.items_key);
            fit_len(&path, items, items_len, items_len, |_| str_value(""), log);
        }
    }
}

fn fit_buckets(name: &str, rule: &BucketRule, value: &mut Value, log: &mut DiagnosticLog) {
    let Value::Object(map) = value else {
        return;
    };
    let mut ordered = Map::new();
    for bucket in &rule.names {
        let path = format!("{name}.{bucket}");
        let mut items = match map.remove(bucket) {
            Some(Value::Array(items)) => items,
            _ => {
                log.record(
                    DiagnosticKind::Padded,
                    &path,
                    Value::Null,
                    "added missing bucket",
                );
                Vec::new()
            }
        };
        fit_len(&path, &mut items, rule.len, rule.len, |_| str_value(""), log);
        ordered.insert(bucket.clone(), Value::Array(items));
    }
    *map = ordered;
}
