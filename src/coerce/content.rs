use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
/// One position of a canonical list item.
pub enum Cell {
    /// Text value.
    Text(String),
    /// Numeric value (numeric-unit or plain number positions).
    Number(f64),
}

impl Cell {
    /// Text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Numeric content, if this is a number cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A labelled group of short text items (a named column, a kanban lane).
pub struct Group {
    /// Group heading.
    pub label: String,
    /// Items in display order.
    pub items: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One data series, aligned to its category axis.
pub struct Series {
    /// Series name.
    pub name: String,
    /// One value per category.
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
/// A field value that satisfies its field rule.
pub enum FieldValue {
    /// Scalar string.
    Text(String),
    /// List of scalars.
    List(Vec<Cell>),
    /// List of fixed-width tuples.
    Rows(Vec<Vec<Cell>>),
    /// Labelled groups.
    Groups(Vec<Group>),
    /// Named buckets of short strings.
    Buckets(BTreeMap<String, Vec<String>>),
    /// Data series.
    Series(Vec<Series>),
    /// Integers summing to exactly 100.
    Percentages(Vec<u32>),
}

impl FieldValue {
    /// Whether the value carries no visible content (blank text, or nothing but blanks).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::List(cells) => cells.iter().all(Cell::is_blank),
            Self::Rows(rows) => rows.iter().all(|r| r.iter().all(Cell::is_blank)),
            Self::Groups(groups) => groups.is_empty(),
            Self::Buckets(b) => b.values().all(|items| items.iter().all(|s| s.trim().is_empty())),
            Self::Series(s) => s.is_empty(),
            Self::Percentages(p) => p.is_empty(),
        }
    }

    /// Number of top-level items (1 for text).
    pub fn item_count(&self) -> usize {
        match self {
            Self::Text(_) => 1,
            Self::List(v) => v.len(),
            Self::Rows(v) => v.len(),
            Self::Groups(v) => v.len(),
            Self::Buckets(v) => v.len(),
            Self::Series(v) => v.len(),
            Self::Percentages(v) => v.len(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
/// Validated, schema-conformant content: field name to value.
///
/// Every value has passed all coercion passes for its rule; renderers may consume it without
/// further checks.
pub struct CanonicalContent {
    fields: BTreeMap<String, FieldValue>,
}

impl CanonicalContent {
    pub(crate) fn insert(&mut self, name: String, value: FieldValue) {
        self.fields.insert(name, value);
    }

    /// Value of a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Whether a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Scalar text of a field.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Scalar list of a field.
    pub fn list(&self, name: &str) -> Option<&[Cell]> {
        match self.get(name)? {
            FieldValue::List(v) => Some(v),
            _ => None,
        }
    }

    /// Tuple rows of a field.
    pub fn rows(&self, name: &str) -> Option<&[Vec<Cell>]> {
        match self.get(name)? {
            FieldValue::Rows(v) => Some(v),
            _ => None,
        }
    }

    /// Series of a field.
    pub fn series(&self, name: &str) -> Option<&[Series]> {
        match self.get(name)? {
            FieldValue::Series(v) => Some(v),
            _ => None,
        }
    }

    /// Percentages of a field.
    pub fn percentages(&self, name: &str) -> Option<&[u32]> {
        match self.get(name)? {
            FieldValue::Percentages(v) => Some(v),
            _ => None,
        }
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
