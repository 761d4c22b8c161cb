use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use serde_json::Value;

use crate::{
    foundation::error::{DeckfitError, DeckfitResult},
    schema::block::BlockKind,
    schema::rule::{FieldKind, FieldRule, ListBounds},
};

#[derive(Clone, Debug, serde::Serialize)]
/// Ordered field rules for one block type.
pub struct BlockSchema {
    /// Block type.
    pub kind: BlockKind,
    /// One-line description of what the block shows.
    pub description: String,
    /// Field rules in declaration order.
    pub fields: Vec<FieldRule>,
}

impl BlockSchema {
    /// Build a block schema.
    pub fn new(kind: BlockKind, description: impl Into<String>, fields: Vec<FieldRule>) -> Self {
        Self {
            kind,
            description: description.into(),
            fields,
        }
    }

    /// Field rule by name.
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Field present in every document (cover, closing contacts), filled with `default` when absent.
pub struct DocumentField {
    /// Field rule.
    pub rule: FieldRule,
    /// Raw value inserted when the payload omits the field.
    pub default: Value,
}

#[derive(Clone, Copy, Debug)]
enum FieldOwner {
    Document(usize),
    Block(usize, usize),
}

static STANDARD: LazyLock<SchemaCatalog> = LazyLock::new(super::standard::build);

#[derive(Clone, Debug, serde::Serialize)]
/// Read-only registry of block schemas, document fields, aliases and text budgets.
///
/// A catalog is an explicit value handed to every entry point, so several catalogs (one per
/// document family) can coexist. [`SchemaCatalog::standard`] returns the built-in one.
pub struct SchemaCatalog {
    blocks: Vec<BlockSchema>,
    document: Vec<DocumentField>,
    aliases: Vec<(String, String)>,
    budget_overrides: BTreeMap<String, usize>,
    #[serde(skip)]
    index: HashMap<String, FieldOwner>,
}

impl SchemaCatalog {
    /// Build and validate a catalog.
    ///
    /// `aliases` maps alternate field names to canonical ones and is applied in order.
    pub fn new(
        blocks: Vec<BlockSchema>,
        document: Vec<DocumentField>,
        aliases: Vec<(String, String)>,
    ) -> DeckfitResult<Self> {
        let catalog = Self::assemble(blocks, document, aliases);
        catalog.validate()?;
        Ok(catalog)
    }

    pub(crate) fn assemble(
        blocks: Vec<BlockSchema>,
        document: Vec<DocumentField>,
        aliases: Vec<(String, String)>,
    ) -> Self {
        let mut index = HashMap::new();
        for (i, d) in document.iter().enumerate() {
            index
                .entry(d.rule.name.clone())
                .or_insert(FieldOwner::Document(i));
        }
        for (b, block) in blocks.iter().enumerate() {
            for (f, field) in block.fields.iter().enumerate() {
                index
                    .entry(field.name.clone())
                    .or_insert(FieldOwner::Block(b, f));
            }
        }
        Self {
            blocks,
            document,
            aliases,
            budget_overrides: BTreeMap::new(),
            index,
        }
    }

    /// The built-in catalog, initialized once per process.
    pub fn standard() -> &'static SchemaCatalog {
        &STANDARD
    }

    /// Check internal consistency: unique tags and field names, resolvable cross-field
    /// references, and well-formed list rules.
    pub fn validate(&self) -> DeckfitResult<()> {
        let mut kinds = HashSet::new();
        for block in &self.blocks {
            if !kinds.insert(block.kind) {
                return Err(DeckfitError::catalog(format!(
                    "block '{}' is declared twice",
                    block.kind
                )));
            }
        }

        let declared = self.document.len() + self.blocks.iter().map(|b| b.fields.len()).sum::<usize>();
        if declared != self.index.len() {
            return Err(DeckfitError::catalog("field names must be unique"));
        }

        for rule in self.fields() {
            self.validate_rule(rule)?;
        }

        for (alias, canonical) in &self.aliases {
            if self.index.contains_key(alias) {
                return Err(DeckfitError::catalog(format!(
                    "alias '{alias}' is itself a field name"
                )));
            }
            if !self.index.contains_key(canonical) {
                return Err(DeckfitError::catalog(format!(
                    "alias '{alias}' targets unknown field '{canonical}'"
                )));
            }
        }
        for name in self.budget_overrides.keys() {
            if !self.index.contains_key(name) {
                return Err(DeckfitError::catalog(format!(
                    "budget override for unknown field '{name}'"
                )));
            }
        }
        Ok(())
    }

    fn validate_rule(&self, rule: &FieldRule) -> DeckfitResult<()> {
        let name = &rule.name;
        match &rule.kind {
            FieldKind::Text { .. } | FieldKind::Buckets(_) | FieldKind::Groups(_) => {}
            FieldKind::List(list) => {
                let want = list.width.unwrap_or(1);
                if want == 0 || list.cells.len() != want {
                    return Err(DeckfitError::catalog(format!(
                        "field '{name}': expected {want} cell rules, found {}",
                        list.cells.len()
                    )));
                }
                if let ListBounds::Range { min, max } = list.bounds {
                    if min > max {
                        return Err(DeckfitError::catalog(format!(
                            "field '{name}': min {min} exceeds max {max}"
                        )));
                    }
                }
            }
            FieldKind::Series(series) => {
                self.require_field(name, &series.categories)?;
                if series.min_series > series.max_series {
                    return Err(DeckfitError::catalog(format!(
                        "field '{name}': min_series exceeds max_series"
                    )));
                }
            }
            FieldKind::Percentages(pct) => {
                self.require_field(name, &pct.labels)?;
                if let Some(legend) = &pct.legend {
                    self.require_field(name, legend)?;
                }
                if pct.min == 0 || pct.min > pct.max {
                    return Err(DeckfitError::catalog(format!(
                        "field '{name}': percentage bounds must satisfy 0 < min <= max"
                    )));
                }
            }
        }
        Ok(())
    }

    fn require_field(&self, from: &str, target: &str) -> DeckfitResult<()> {
        if self.index.contains_key(target) {
            Ok(())
        } else {
            Err(DeckfitError::catalog(format!(
                "field '{from}' references unknown field '{target}'"
            )))
        }
    }

    /// Override (or set) the character budget of a text field.
    pub fn with_budget_override(mut self, field: impl Into<String>, budget: usize) -> Self {
        self.budget_overrides.insert(field.into(), budget);
        self
    }

    /// A copy of this catalog limited to `kinds`, in this catalog's order.
    ///
    /// Aliases and budget overrides that only served removed blocks are dropped.
    pub fn restricted_to(&self, kinds: &[BlockKind]) -> DeckfitResult<Self> {
        for kind in kinds {
            if self.get(*kind).is_none() {
                return Err(DeckfitError::catalog(format!(
                    "cannot restrict to unregistered block '{kind}'"
                )));
            }
        }
        let blocks: Vec<BlockSchema> = self
            .blocks
            .iter()
            .filter(|b| kinds.contains(&b.kind))
            .cloned()
            .collect();
        let mut out = Self::assemble(blocks, self.document.clone(), Vec::new());
        out.aliases = self
            .aliases
            .iter()
            .filter(|(_, canonical)| out.index.contains_key(canonical))
            .cloned()
            .collect();
        out.budget_overrides = self
            .budget_overrides
            .iter()
            .filter(|(name, _)| out.index.contains_key(name.as_str()))
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        out.validate()?;
        Ok(out)
    }

    /// Schema for a block tag.
    ///
    /// Asking for an unregistered tag is a programming error and is reported, not repaired.
    pub fn lookup(&self, tag: &str) -> DeckfitResult<&BlockSchema> {
        BlockKind::from_tag(tag)
            .and_then(|kind| self.get(kind))
            .ok_or_else(|| DeckfitError::catalog(format!("unknown block tag '{tag}'")))
    }

    /// Schema for a block kind, if registered.
    pub fn get(&self, kind: BlockKind) -> Option<&BlockSchema> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    /// Parse `tag` and confirm it is registered.
    pub fn resolve(&self, tag: &str) -> Option<BlockKind> {
        BlockKind::from_tag(tag).filter(|kind| self.get(*kind).is_some())
    }

    /// Registered block schemas in catalog order.
    pub fn blocks(&self) -> &[BlockSchema] {
        &self.blocks
    }

    /// Registered block kinds in catalog order.
    pub fn block_kinds(&self) -> impl Iterator<Item = BlockKind> + '_ {
        self.blocks.iter().map(|b| b.kind)
    }

    /// Always-present document fields.
    pub fn document_fields(&self) -> &[DocumentField] {
        &self.document
    }

    /// Alias table as `(alternate, canonical)` pairs.
    pub fn aliases(&self) -> &[(String, String)] {
        &self.aliases
    }

    /// Every field rule: document fields first, then block fields in catalog order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldRule> + '_ {
        self.document
            .iter()
            .map(|d| &d.rule)
            .chain(self.blocks.iter().flat_map(|b| b.fields.iter()))
    }

    /// Field rule by canonical name.
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        match *self.index.get(name)? {
            FieldOwner::Document(i) => self.document.get(i).map(|d| &d.rule),
            FieldOwner::Block(b, f) => self.blocks.get(b).and_then(|blk| blk.fields.get(f)),
        }
    }

    /// Block that declares `name`; `None` for document fields and unknown names.
    pub fn owner(&self, name: &str) -> Option<BlockKind> {
        match *self.index.get(name)? {
            FieldOwner::Document(_) => None,
            FieldOwner::Block(b, _) => self.blocks.get(b).map(|blk| blk.kind),
        }
    }

    /// Whether `key` names a field or a registered block tag.
    pub fn is_known_key(&self, key: &str) -> bool {
        self.index.contains_key(key) || self.resolve(key).is_some()
    }

    /// Effective character budget of a scalar text field.
    pub fn text_budget(&self, name: &str) -> Option<usize> {
        if let Some(b) = self.budget_overrides.get(name) {
            return Some(*b);
        }
        match &self.field(name)?.kind {
            FieldKind::Text { budget } => *budget,
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/catalog.rs"]
mod tests;
