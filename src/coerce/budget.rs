use serde_json::Value;

use crate::coerce::engine::Work;
use crate::foundation::diagnostic::{DiagnosticKind, DiagnosticLog};
use crate::foundation::text::truncate_to_budget;
use crate::schema::rule::FieldKind;

/// Cut every string that exceeds its character budget.
pub(super) fn budget_pass(work: &mut Work<'_>) {
    let Work {
        catalog,
        fields,
        log,
    } = work;
    for rule in catalog.fields() {
        let name = rule.name.as_str();
        let Some(value) = fields.get_mut(name) else {
            continue;
        };
        match &rule.kind {
            FieldKind::Text { .. } => {
                if let Some(budget) = catalog.text_budget(name) {
                    cut(name, value, budget, log);
                }
            }
            FieldKind::List(list) => {
                let Value::Array(items) = value else {
                    continue;
                };
                for (i, item) in items.iter_mut().enumerate() {
                    match item {
                        Value::Array(cells) => {
                            for (j, cell) in cells.iter_mut().enumerate() {
                                if let Some(budget) = list.cell(j).and_then(|c| c.budget) {
                                    cut(&format!("{name}[{i}][{j}]"), cell, budget, log);
                                }
                            }
                        }
                        scalar => {
                            if let Some(budget) = list.cell(0).and_then(|c| c.budget) {
                                cut(&format!("{name}[{i}]"), scalar, budget, log);
                            }
                        }
                    }
                }
            }
            FieldKind::Groups(g) => {
                let (Some(budget), Value::Array(groups)) = (g.item_budget, value) else {
                    continue;
                };
                for (i, group) in groups.iter_mut().enumerate() {
                    if let Some(Value::Array(items)) = group.get_mut(&g.items_key) {
                        for (j, item) in items.iter_mut().enumerate() {
                            cut(&format!("{name}[{i}][{j}]"), item, budget, log);
                        }
                    }
                }
            }
            FieldKind::Buckets(b) => {
                let (Some(budget), Value::Object(buckets)) = (b.budget, value) else {
                    continue;
                };
                for (bucket, items) in buckets.iter_mut() {
                    let Value::Array(items) = items else {
                        continue;
                    };
                    for (j, item) in items.iter_mut().enumerate() {
                        cut(&format!("{name}.{bucket}[{j}]"), item, budget, log);
                    }
                }
            }
            FieldKind::Series(_) | FieldKind::Percentages(_) => {}
        }
    }
}

fn cut(path: &str, value: &mut Value, budget: usize, log: &mut DiagnosticLog) {
    let Value::String(s) = value else {
        return;
    };
    if let Some(short) = truncate_to_budget(s, budget) {
        let original = std::mem::replace(s, short);
        log.record(
            DiagnosticKind::TextTruncated,
            path,
            Value::String(original),
            format!("cut to {budget} characters"),
        );
    }
}
