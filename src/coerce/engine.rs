use serde_json::{Map, Value};

use crate::coerce::content::{CanonicalContent, Cell, FieldValue, Group, Series};
use crate::coerce::value::{flat_text, number, text_list};
use crate::coerce::{budget, cardinality, numeric, shape};
use crate::foundation::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLog};
use crate::schema::catalog::SchemaCatalog;
use crate::schema::rule::{CellRule, FieldKind, FieldRule};
use crate::select::sections::ENVELOPE_KEYS;

/// Payload key holding the content mapping when the payload is a full envelope.
pub const CONTENT_KEY: &str = "content";

/// Nested block mappings are merged up to this depth.
const MAX_NESTING: usize = 2;

/// Mutable state threaded through the repair passes.
pub(super) struct Work<'a> {
    pub(super) catalog: &'a SchemaCatalog,
    pub(super) fields: Map<String, Value>,
    pub(super) log: DiagnosticLog,
}

/// Repair an untrusted content payload into [`CanonicalContent`].
///
/// Never fails: every deviation from the catalog is repaired and reported as a [`Diagnostic`].
/// The payload may be the content mapping itself or an envelope carrying it under `"content"`.
#[tracing::instrument(skip(raw, catalog))]
pub fn coerce(raw: &Value, catalog: &SchemaCatalog) -> (CanonicalContent, Vec<Diagnostic>) {
    let mut log = DiagnosticLog::default();
    let source = content_source(raw, &mut log);
    let fields = flatten(&source, catalog, &mut log);
    let mut work = Work {
        catalog,
        fields,
        log,
    };

    rename_aliases(&mut work);
    drop_unknown(&mut work);
    fill_document_defaults(&mut work);
    shape::shape_pass(&mut work);
    cardinality::fixed_pass(&mut work);
    cardinality::dynamic_pass(&mut work);
    numeric::percentage_pass(&mut work);
    numeric::series_pass(&mut work);
    numeric::cell_pass(&mut work);
    budget::budget_pass(&mut work);

    let content = seal(&work);
    let diagnostics = work.log.into_vec();
    tracing::debug!(
        fields = content.len(),
        diagnostics = diagnostics.len(),
        "content coerced"
    );
    (content, diagnostics)
}

fn content_source(raw: &Value, log: &mut DiagnosticLog) -> Map<String, Value> {
    let Value::Object(root) = raw else {
        log.record(
            DiagnosticKind::ShapeCoerced,
            "$",
            raw.clone(),
            "payload is not a mapping; treated as empty",
        );
        return Map::new();
    };
    match root.get(CONTENT_KEY) {
        Some(Value::Object(inner)) => merge_root_keys(inner, root, log),
        Some(other) => {
            log.record(
                DiagnosticKind::ShapeCoerced,
                CONTENT_KEY,
                other.clone(),
                "content envelope is not a mapping; reading top-level keys",
            );
            root.clone()
        }
        None => root.clone(),
    }
}

/// Root keys outside the envelope join the `content` mapping; on a clash `content` wins.
fn merge_root_keys(
    inner: &Map<String, Value>,
    root: &Map<String, Value>,
    log: &mut DiagnosticLog,
) -> Map<String, Value> {
    let mut merged = inner.clone();
    for (key, value) in root {
        if key == CONTENT_KEY || ENVELOPE_KEYS.contains(&key.as_str()) {
            continue;
        }
        if merged.contains_key(key) {
            log.record(
                DiagnosticKind::FlattenConflict,
                key,
                value.clone(),
                format!("top-level value ignored; kept the one under '{CONTENT_KEY}'"),
            );
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

fn flatten(
    source: &Map<String, Value>,
    catalog: &SchemaCatalog,
    log: &mut DiagnosticLog,
) -> Map<String, Value> {
    let mut out = Map::new();
    let mut nested = Vec::new();
    for (key, value) in source {
        if key == CONTENT_KEY || ENVELOPE_KEYS.contains(&key.as_str()) {
            continue;
        }
        match value {
            Value::Object(inner) if is_wrapper(key, inner, catalog) => {
                collect_nested(key, inner, catalog, 1, &mut nested);
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }

    for (path, key, value) in nested {
        if out.contains_key(&key) {
            log.record(
                DiagnosticKind::FlattenConflict,
                &path,
                value,
                format!("kept the value already present for '{key}'"),
            );
        } else {
            out.insert(key, value);
        }
    }
    out
}

/// Whether a mapping under `key` is a nested block to merge rather than a field value.
///
/// Pure block tags always nest. A key that is both a tag and a field (`key_facts`), or no
/// known key at all, nests only when the mapping holds at least one known key.
fn is_wrapper(key: &str, inner: &Map<String, Value>, catalog: &SchemaCatalog) -> bool {
    let holds_known = || inner.keys().any(|k| catalog.is_known_key(k));
    match (catalog.field(key).is_some(), catalog.resolve(key).is_some()) {
        (false, true) => true,
        (true, true) | (false, false) => holds_known(),
        (true, false) => false,
    }
}

fn collect_nested(
    prefix: &str,
    inner: &Map<String, Value>,
    catalog: &SchemaCatalog,
    depth: usize,
    nested: &mut Vec<(String, String, Value)>,
) {
    for (key, value) in inner {
        let path = format!("{prefix}.{key}");
        match value {
            Value::Object(deeper) if depth < MAX_NESTING && is_wrapper(key, deeper, catalog) => {
                collect_nested(&path, deeper, catalog, depth + 1, nested);
            }
            _ => nested.push((path, key.clone(), value.clone())),
        }
    }
}

fn rename_aliases(work: &mut Work<'_>) {
    let catalog = work.catalog;
    for (alias, canonical) in catalog.aliases() {
        let Some(value) = work.fields.remove(alias) else {
            continue;
        };
        if work.fields.contains_key(canonical) {
            work.log.record(
                DiagnosticKind::FlattenConflict,
                alias,
                value,
                format!("dropped; '{canonical}' is already present"),
            );
        } else {
            work.log.record(
                DiagnosticKind::AliasRenamed,
                alias,
                Value::Null,
                format!("renamed to '{canonical}'"),
            );
            work.fields.insert(canonical.clone(), value);
        }
    }
}

fn drop_unknown(work: &mut Work<'_>) {
    let catalog = work.catalog;
    let unknown: Vec<String> = work
        .fields
        .keys()
        .filter(|k| catalog.field(k).is_none())
        .cloned()
        .collect();
    for key in unknown {
        if let Some(value) = work.fields.remove(&key) {
            work.log
                .record(DiagnosticKind::UnknownKey, &key, value, "dropped unknown key");
        }
    }
}

fn fill_document_defaults(work: &mut Work<'_>) {
    for doc in work.catalog.document_fields() {
        let missing = work.fields.get(&doc.rule.name).is_none_or(Value::is_null);
        if missing {
            work.fields.insert(doc.rule.name.clone(), doc.default.clone());
        }
    }
}

fn seal(work: &Work<'_>) -> CanonicalContent {
    let mut content = CanonicalContent::default();
    for rule in work.catalog.fields() {
        if let Some(value) = work.fields.get(&rule.name) {
            content.insert(rule.name.clone(), seal_value(rule, value));
        }
    }
    content
}

fn seal_value(rule: &FieldRule, value: &Value) -> FieldValue {
    match &rule.kind {
        FieldKind::Text { .. } => FieldValue::Text(flat_text(value)),
        FieldKind::List(list) => match list.width {
            None => FieldValue::List(
                items(value)
                    .iter()
                    .map(|v| seal_cell(list.cell(0), v))
                    .collect(),
            ),
            Some(_) => FieldValue::Rows(
                items(value)
                    .iter()
                    .map(|row| {
                        items(row)
                            .iter()
                            .enumerate()
                            .map(|(i, v)| seal_cell(list.cell(i), v))
                            .collect()
                    })
                    .collect(),
            ),
        },
        FieldKind::Groups(g) => FieldValue::Groups(
            items(value)
                .iter()
                .map(|grp| Group {
                    label: grp.get(&g.label_key).map(flat_text).unwrap_or_default(),
                    items: grp.get(&g.items_key).map(text_list).unwrap_or_default(),
                })
                .collect(),
        ),
        FieldKind::Buckets(b) => FieldValue::Buckets(
            b.names
                .iter()
                .map(|n| (n.clone(), value.get(n).map(text_list).unwrap_or_default()))
                .collect(),
        ),
        FieldKind::Series(_) => FieldValue::Series(
            items(value)
                .iter()
                .map(|s| Series {
                    name: s.get("name").map(flat_text).unwrap_or_default(),
                    values: s
                        .get("values")
                        .map(|v| items(v).iter().map(|x| number(x).unwrap_or(0.0)).collect())
                        .unwrap_or_default(),
                })
                .collect(),
        ),
        FieldKind::Percentages(_) => FieldValue::Percentages(
            items(value)
                .iter()
                .map(|v| v.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0))
                .collect(),
        ),
    }
}

fn seal_cell(cell: Option<&CellRule>, v: &Value) -> Cell {
    if cell.is_some_and(CellRule::is_numeric) {
        Cell::Number(number(v).unwrap_or(0.0))
    } else {
        Cell::Text(flat_text(v))
    }
}

pub(super) fn items(v: &Value) -> &[Value] {
    v.as_array().map(Vec::as_slice).unwrap_or(&[])
}

#[cfg(test)]
#[path = "../../tests/unit/coerce/engine.rs"]
mod tests;
