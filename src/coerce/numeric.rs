use serde_json::{Value, json};

use crate::coerce::cardinality::fit_len;
use crate::coerce::engine::Work;
use crate::coerce::value::{flat_text, number, scalar_text, str_value};
use crate::foundation::diagnostic::DiagnosticKind;
use crate::schema::rule::{CellKind, CellRule, FieldKind, UNIT_FALLBACK};

/// Rescale non-negative values to integers summing to exactly 100.
///
/// Sets already summing to 100 only get rounded; otherwise each value is rescaled with
/// round-half-to-even and floored at 1 (no floor past 100 values). All-zero sets are split
/// evenly. A shortfall is added to the first maximal element; an overshoot is taken one point
/// at a time from the largest elements.
pub fn normalize_percentages(raw: &[f64]) -> Vec<u32> {
    if raw.is_empty() {
        return Vec::new();
    }
    let clean: Vec<f64> = raw
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .collect();
    let floor = i64::from(clean.len() <= 100);
    let peak = clean.iter().copied().fold(0.0, f64::max);
    let total: f64 = clean.iter().sum();

    let mut out: Vec<i64> = if peak <= 0.0 {
        vec![100 / clean.len() as i64; clean.len()]
    } else if (total - 100.0).abs() < f64::EPSILON {
        clean.iter().map(|v| v.round_ties_even() as i64).collect()
    } else {
        // Relative to the peak, so the sum stays finite for any finite input.
        let relative_total: f64 = clean.iter().map(|v| v / peak).sum();
        clean
            .iter()
            .map(|v| {
                let share = v / peak / relative_total * 100.0;
                (share.round_ties_even() as i64).clamp(0, 100).max(floor)
            })
            .collect()
    };

    settle_residual(&mut out, floor);
    out.into_iter()
        .map(|v| u32::try_from(v).unwrap_or(0))
        .collect()
}

fn settle_residual(values: &mut [i64], floor: i64) {
    let mut residual = 100 - values.iter().sum::<i64>();
    if residual > 0 {
        let top = first_max(values);
        values[top] += residual;
        return;
    }
    while residual < 0 {
        let top = first_max(values);
        if values[top] <= floor {
            break;
        }
        values[top] -= 1;
        residual += 1;
    }
}

fn first_max(values: &[i64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Normalize percentage sets, align their labels and regenerate the legend.
pub(super) fn percentage_pass(work: &mut Work<'_>) {
    let Work {
        catalog,
        fields,
        log,
    } = work;
    for rule in catalog.fields() {
        let FieldKind::Percentages(p) = &rule.kind else {
            continue;
        };
        let Some(Value::Array(items)) = fields.get(&rule.name).cloned() else {
            continue;
        };

        let raw: Vec<f64> = items
            .iter()
            .map(|v| number(v).filter(|n| *n >= 0.0).unwrap_or(0.0))
            .collect();
        if items.iter().zip(&raw).any(|(v, r)| number(v) != Some(*r)) {
            log.record(
                DiagnosticKind::Clamped,
                &rule.name,
                Value::Array(items.clone()),
                "replaced negative or non-numeric values with 0",
            );
        }
        let values = normalize_percentages(&raw);
        if values.iter().zip(&raw).any(|(v, r)| f64::from(*v) != *r) {
            log.record(
                DiagnosticKind::Rescaled,
                &rule.name,
                Value::Array(items),
                format!("rescaled to {values:?}"),
            );
        }
        fields.insert(
            rule.name.clone(),
            Value::Array(values.iter().map(|v| json!(v)).collect()),
        );

        let mut labels = match fields.get(&p.labels) {
            Some(Value::Array(labels)) => labels.clone(),
            _ => Vec::new(),
        };
        let prefix = p.label_prefix.as_str();
        let n = values.len();
        fit_len(
            &p.labels,
            &mut labels,
            n,
            n,
            |pos| str_value(format!("{prefix} {pos}")),
            log,
        );

        if let Some(legend) = &p.legend {
            let lines: Vec<Value> = labels
                .iter()
                .zip(&values)
                .map(|(label, v)| str_value(format!("{} ({v}%)", flat_text(label))))
                .collect();
            if let Some(previous) = fields.get(legend) {
                if previous.as_array() != Some(&lines) {
                    log.record(
                        DiagnosticKind::ShapeCoerced,
                        legend,
                        previous.clone(),
                        "regenerated legend from labels and values",
                    );
                }
            }
            fields.insert(legend.clone(), Value::Array(lines));
        }
        fields.insert(p.labels.clone(), Value::Array(labels));
    }
}

/// Align every series to its category axis.
pub(super) fn series_pass(work: &mut Work<'_>) {
    let Work {
        catalog,
        fields,
        log,
    } = work;
    for rule in catalog.fields() {
        let FieldKind::Series(s) = &rule.kind else {
            continue;
        };
        let categories = fields
            .get(&s.categories)
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        let n = categories.max(s.min_categories);
        let Some(Value::Array(series)) = fields.get_mut(&rule.name) else {
            continue;
        };

        let zero_series = |pos: usize| json!({ "name": format!("Series {pos}"), "values": vec![0; n] });
        fit_len(&rule.name, series, s.min_series, s.max_series, zero_series, log);

        let (mut replaced, mut realigned) = (0, 0);
        for entry in series.iter_mut() {
            let Some(Value::Array(values)) = entry.get_mut("values") else {
                continue;
            };
            for v in values.iter_mut() {
                match number(v) {
                    Some(_) if v.is_number() => {}
                    Some(x) => *v = json!(x),
                    None => {
                        *v = json!(0);
                        replaced += 1;
                    }
                }
            }
            if values.len() != n {
                values.resize(n, json!(0));
                realigned += 1;
            }
        }
        if replaced > 0 {
            log.record(
                DiagnosticKind::Clamped,
                &rule.name,
                Value::Null,
                format!("replaced {replaced} non-numeric value(s) with 0"),
            );
        }
        if realigned > 0 {
            log.record(
                DiagnosticKind::Padded,
                &rule.name,
                Value::Null,
                format!("aligned {realigned} series to {n} categories"),
            );
        }
    }
}

/// Apply per-position value rules to every list item.
pub(super) fn cell_pass(work: &mut Work<'_>) {
    let Work {
        catalog,
        fields,
        log,
    } = work;
    for rule in catalog.fields() {
        let Some(list) = rule.as_list() else {
            continue;
        };
        let Some(Value::Array(items)) = fields.get_mut(&rule.name) else {
            continue;
        };
        for (i, item) in items.iter_mut().enumerate() {
            match (list.width, item) {
                (None, item) => {
                    let Some(cell) = list.cell(0) else {
                        continue;
                    };
                    if let Some((kind, original, action)) = normalize_cell(cell, item) {
                        log.record(kind, &format!("{}[{i}]", rule.name), original, action);
                    }
                }
                (Some(_), Value::Array(cells)) => {
                    for (j, value) in cells.iter_mut().enumerate() {
                        let Some(cell) = list.cell(j) else {
                            continue;
                        };
                        if let Some((kind, original, action)) = normalize_cell(cell, value) {
                            log.record(kind, &format!("{}[{i}][{j}]", rule.name), original, action);
                        }
                    }
                }
                (Some(_), _) => {}
            }
        }
    }
}

type CellRepair = (DiagnosticKind, Value, String);

fn normalize_cell(rule: &CellRule, v: &mut Value) -> Option<CellRepair> {
    match &rule.kind {
        CellKind::Text => match v {
            Value::String(_) => None,
            Value::Array(_) | Value::Object(_) => {
                let original = v.take();
                *v = str_value(flat_text(&original));
                Some((
                    DiagnosticKind::ShapeCoerced,
                    original,
                    "flattened to text".to_string(),
                ))
            }
            other => {
                *other = str_value(scalar_text(other).unwrap_or_default());
                None
            }
        },
        CellKind::Unit => match unit_reading(v) {
            Some(x) if (0.0..=1.0).contains(&x) => {
                *v = json!(x);
                None
            }
            Some(x) => {
                let clamped = x.clamp(0.0, 1.0);
                let original = std::mem::replace(v, json!(clamped));
                Some((DiagnosticKind::Clamped, original, format!("clamped to {clamped}")))
            }
            None => {
                let original = std::mem::replace(v, json!(UNIT_FALLBACK));
                Some((
                    DiagnosticKind::Clamped,
                    original,
                    format!("replaced with {UNIT_FALLBACK}"),
                ))
            }
        },
        CellKind::Number { default } => match number(v) {
            Some(x) => {
                *v = json!(x);
                None
            }
            None => {
                let original = std::mem::replace(v, json!(*default));
                Some((DiagnosticKind::Clamped, original, format!("replaced with {default}")))
            }
        },
        CellKind::Choice { choices, default } => {
            let chosen = flat_text(v).trim().to_lowercase();
            if choices.contains(&chosen) {
                *v = str_value(chosen);
                None
            } else {
                let original = std::mem::replace(v, str_value(default.as_str()));
                Some((
                    DiagnosticKind::EnumReplaced,
                    original,
                    format!("replaced with '{default}'"),
                ))
            }
        }
    }
}

/// Unit-interval reading; `"85%"` reads as `0.85`.
fn unit_reading(v: &Value) -> Option<f64> {
    match v {
        Value::String(s) if s.trim_end().ends_with('%') => number(v).map(|x| x / 100.0),
        _ => number(v),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/coerce/numeric.rs"]
mod tests;
