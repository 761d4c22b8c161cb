use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::foundation::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLog};
use crate::schema::block::BlockKind;
use crate::schema::catalog::SchemaCatalog;

/// Payload keys that describe deck structure rather than content.
pub const ENVELOPE_KEYS: &[&str] = &[
    "selected_blocks",
    "selectedBlocks",
    "selected_slides",
    "sections",
];

/// Accepted spellings of the selected-block list, in lookup order.
const SELECTION_KEYS: &[&str] = &["selected_blocks", "selectedBlocks", "selected_slides"];

/// Accepted spellings of a section's block list, in lookup order.
const SECTION_BLOCK_KEYS: &[&str] = &["blocks", "slides"];

/// Title of the section synthesized when the payload provides none.
pub const OVERVIEW_TITLE: &str = "Overview";

/// Title of the trailing section holding otherwise unassigned blocks.
pub const ADDITIONAL_TITLE: &str = "Additional";

const UNTITLED_SECTION: &str = "Section";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// A titled run of blocks in the deck.
pub struct Section {
    /// Section heading.
    pub title: String,
    /// Optional sub-heading; empty when absent.
    pub subtitle: String,
    /// Blocks in display order.
    pub blocks: Vec<BlockKind>,
}

impl Section {
    fn synthesized(title: &str, blocks: Vec<BlockKind>) -> Self {
        Self {
            title: title.to_string(),
            subtitle: String::new(),
            blocks,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Which blocks appear in the deck and how they are grouped.
///
/// Every selected block belongs to exactly one section and every section block is selected.
pub struct SelectionResult {
    /// Selected blocks, de-duplicated, in request order.
    pub selected_blocks: Vec<BlockKind>,
    /// Non-empty sections in display order.
    pub sections: Vec<Section>,
}

impl SelectionResult {
    /// Blocks in the order the deck presents them (section by section).
    pub fn deck_order(&self) -> impl Iterator<Item = BlockKind> + '_ {
        self.sections.iter().flat_map(|s| s.blocks.iter().copied())
    }

    /// Whether the sections partition the selected blocks exactly.
    pub fn is_consistent(&self) -> bool {
        let selected: HashSet<BlockKind> = self.selected_blocks.iter().copied().collect();
        if selected.len() != self.selected_blocks.len() {
            return false;
        }
        let mut seen = HashSet::new();
        let members_ok = self.sections.iter().all(|s| {
            !s.blocks.is_empty() && s.blocks.iter().all(|b| selected.contains(b) && seen.insert(*b))
        });
        members_ok && seen.len() == selected.len()
    }
}

/// Read the block selection and section structure from a payload envelope.
///
/// Never fails: missing, unknown or inconsistent entries are repaired and reported.
#[tracing::instrument(skip(raw, catalog))]
pub fn select(raw: &Value, catalog: &SchemaCatalog) -> (SelectionResult, Vec<Diagnostic>) {
    let mut log = DiagnosticLog::default();
    let envelope = raw.as_object();

    let selected_blocks = read_selection(envelope, catalog, &mut log);
    let sections = read_sections(envelope, catalog, &selected_blocks, &mut log);

    let result = SelectionResult {
        selected_blocks,
        sections,
    };
    tracing::debug!(
        blocks = result.selected_blocks.len(),
        sections = result.sections.len(),
        "selection resolved"
    );
    (result, log.into_vec())
}

fn read_selection(
    envelope: Option<&Map<String, Value>>,
    catalog: &SchemaCatalog,
    log: &mut DiagnosticLog,
) -> Vec<BlockKind> {
    let requested = envelope.and_then(|m| {
        SELECTION_KEYS
            .iter()
            .find_map(|k| m.get(*k).map(|v| (*k, v)))
    });

    let mut selected = Vec::new();
    match requested {
        None => log.record(
            DiagnosticKind::SelectionRepaired,
            SELECTION_KEYS[0],
            Value::Null,
            "missing; selected every catalog block",
        ),
        Some((key, value)) => {
            for tag in tag_values(value) {
                match resolve_tag(catalog, tag) {
                    Some(kind) if !selected.contains(&kind) => selected.push(kind),
                    Some(_) => log.record(
                        DiagnosticKind::SelectionRepaired,
                        key,
                        tag.clone(),
                        "dropped duplicate block",
                    ),
                    None => log.record(
                        DiagnosticKind::UnknownKey,
                        key,
                        tag.clone(),
                        "dropped unknown block tag",
                    ),
                }
            }
            if selected.is_empty() {
                log.record(
                    DiagnosticKind::SelectionRepaired,
                    key,
                    value.clone(),
                    "no known blocks; selected every catalog block",
                );
            }
        }
    }

    if selected.is_empty() {
        selected = catalog.block_kinds().collect();
    }
    selected
}

fn read_sections(
    envelope: Option<&Map<String, Value>>,
    catalog: &SchemaCatalog,
    selected: &[BlockKind],
    log: &mut DiagnosticLog,
) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut assigned = HashSet::new();

    match envelope.and_then(|m| m.get("sections")) {
        None | Some(Value::Null) => {}
        Some(Value::Array(raw_sections)) => {
            for (i, raw) in raw_sections.iter().enumerate() {
                let path = format!("sections[{i}]");
                if let Some(section) = read_section(&path, raw, catalog, selected, &mut assigned, log)
                {
                    sections.push(section);
                }
            }
        }
        Some(other) => log.record(
            DiagnosticKind::SectionRepaired,
            "sections",
            other.clone(),
            "not a list; ignored",
        ),
    }

    if sections.is_empty() {
        log.record(
            DiagnosticKind::SectionRepaired,
            "sections",
            Value::Null,
            format!("no usable sections; synthesized '{OVERVIEW_TITLE}'"),
        );
        sections.push(Section::synthesized(OVERVIEW_TITLE, selected.to_vec()));
        return sections;
    }

    let unassigned: Vec<BlockKind> = selected
        .iter()
        .copied()
        .filter(|b| !assigned.contains(b))
        .collect();
    if !unassigned.is_empty() {
        log.record(
            DiagnosticKind::SectionRepaired,
            "sections",
            Value::Array(unassigned.iter().map(|b| Value::from(b.as_str())).collect()),
            format!("appended '{ADDITIONAL_TITLE}' for unassigned blocks"),
        );
        sections.push(Section::synthesized(ADDITIONAL_TITLE, unassigned));
    }
    sections
}

fn read_section(
    path: &str,
    raw: &Value,
    catalog: &SchemaCatalog,
    selected: &[BlockKind],
    assigned: &mut HashSet<BlockKind>,
    log: &mut DiagnosticLog,
) -> Option<Section> {
    let Value::Object(map) = raw else {
        log.record(
            DiagnosticKind::SectionRepaired,
            path,
            raw.clone(),
            "not a mapping; dropped",
        );
        return None;
    };

    let title = text_of(map.get("title")).unwrap_or_else(|| UNTITLED_SECTION.to_string());
    let subtitle = text_of(map.get("subtitle")).unwrap_or_default();
    let tags = SECTION_BLOCK_KEYS
        .iter()
        .find_map(|k| map.get(*k))
        .map(tag_values)
        .unwrap_or_default();

    let mut blocks = Vec::new();
    for tag in tags {
        let reason = match resolve_tag(catalog, tag) {
            Some(kind) if !selected.contains(&kind) => "dropped block that is not selected",
            Some(kind) if assigned.contains(&kind) => "dropped block already placed in a section",
            Some(kind) => {
                assigned.insert(kind);
                blocks.push(kind);
                continue;
            }
            None => "dropped unknown block tag",
        };
        log.record(DiagnosticKind::SectionRepaired, path, tag.clone(), reason);
    }

    if blocks.is_empty() {
        log.record(
            DiagnosticKind::SectionRepaired,
            path,
            Value::String(title),
            "dropped section with no blocks",
        );
        return None;
    }
    Some(Section {
        title,
        subtitle,
        blocks,
    })
}

fn tag_values(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn resolve_tag(catalog: &SchemaCatalog, tag: &Value) -> Option<BlockKind> {
    tag.as_str().and_then(|t| catalog.resolve(t.trim()))
}

fn text_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/sections.rs"]
mod tests;
