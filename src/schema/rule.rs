use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Structural role a field plays when deriving a block's content signal.
pub enum FieldRole {
    /// Slide/block heading.
    Title,
    /// Running text or bullet list.
    Body,
    /// Named sub-sections laid out side by side; the item count is the column count.
    Columns,
    /// Chart, table, or diagram data.
    Graphic,
    /// Image reference.
    Image,
    /// Free-text layout hint.
    Hint,
    /// Supporting data that does not influence layout choice.
    Detail,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Value rule for one position of a list item.
pub enum CellKind {
    /// Free text.
    Text,
    /// Number clamped to `[0.0, 1.0]`; unparseable values become `0.5`.
    Unit,
    /// Arbitrary number; unparseable values become `default`.
    Number {
        /// Replacement for non-numeric input.
        default: f64,
    },
    /// Lower-cased string restricted to `choices`.
    Choice {
        /// Allowed (lower-case) values.
        choices: Vec<String>,
        /// Replacement for missing or invalid input.
        default: String,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Kind and optional character budget for one list position.
pub struct CellRule {
    /// Value rule.
    #[serde(flatten)]
    pub kind: CellKind,
    /// Maximum character count for text values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<usize>,
}

/// Fallback for unit cells that hold no usable number.
pub const UNIT_FALLBACK: f64 = 0.5;

impl CellRule {
    /// Unbounded text.
    pub fn text() -> Self {
        Self {
            kind: CellKind::Text,
            budget: None,
        }
    }

    /// Text limited to `budget` characters.
    pub fn text_max(budget: usize) -> Self {
        Self {
            kind: CellKind::Text,
            budget: Some(budget),
        }
    }

    /// Number clamped to `[0, 1]`.
    pub fn unit() -> Self {
        Self {
            kind: CellKind::Unit,
            budget: None,
        }
    }

    /// Any number, `default` when unparseable.
    pub fn number(default: f64) -> Self {
        Self {
            kind: CellKind::Number { default },
            budget: None,
        }
    }

    /// Fixed vocabulary.
    pub fn choice(choices: &[&str], default: &str) -> Self {
        Self {
            kind: CellKind::Choice {
                choices: choices.iter().map(|c| c.to_ascii_lowercase()).collect(),
                default: default.to_ascii_lowercase(),
            },
            budget: None,
        }
    }

    /// Attach a character budget.
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Whether this position holds a number in canonical content.
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, CellKind::Unit | CellKind::Number { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "bounds", rename_all = "snake_case")]
/// Cardinality of a list field.
pub enum ListBounds {
    /// Exactly `len` items.
    Exact {
        /// Target length.
        len: usize,
    },
    /// Between `min` and `max` items inclusive.
    Range {
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// How a short list is padded.
pub enum PadWith {
    /// Deep copy of a default item.
    Item {
        /// The item to copy.
        item: Value,
    },
    /// `"{prefix} {n}"` with `n` the 1-based position (the first position of a row).
    Numbered {
        /// Label prefix.
        prefix: String,
    },
    /// Numeric zero.
    Zero,
    /// `"{text} ({n})"` with `n` the 1-based position.
    Boilerplate {
        /// Placeholder text.
        text: String,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Rule for fixed-list and dynamic-list fields.
pub struct ListRule {
    /// Cardinality.
    #[serde(flatten)]
    pub bounds: ListBounds,
    /// Inner tuple width; `None` for a list of scalars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    /// One rule per inner position (exactly one for scalar lists).
    pub cells: Vec<CellRule>,
    /// Padding generator.
    pub pad: PadWith,
    /// Split a lone string into sentence-sized items.
    pub split_text: bool,
    /// Label for the single row built from an undelimited string (row lists only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lone_label: Option<String>,
}

impl ListRule {
    /// Rule for position `idx`, falling back to the last declared cell.
    pub fn cell(&self, idx: usize) -> Option<&CellRule> {
        self.cells.get(idx).or_else(|| self.cells.last())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Exact number of `{label, items}` groups (e.g. named columns with bullets).
pub struct GroupRule {
    /// Number of groups.
    pub len: usize,
    /// Payload key holding a group's label.
    pub label_key: String,
    /// Label used for padded or unlabeled groups.
    pub label_default: String,
    /// Payload key holding a group's items.
    pub items_key: String,
    /// Exact item count per group, if constrained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_len: Option<usize>,
    /// Character budget per item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_budget: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Pass-through keyed grouping with a fixed set of bucket names.
pub struct BucketRule {
    /// Bucket names, in display order.
    pub names: Vec<String>,
    /// Exact item count per bucket.
    pub len: usize,
    /// Character budget per item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Parallel data series against a shared category axis.
pub struct SeriesRule {
    /// Field holding the category labels.
    pub categories: String,
    /// Lower bound on the category count used for alignment.
    pub min_categories: usize,
    /// Minimum number of series.
    pub min_series: usize,
    /// Maximum number of series.
    pub max_series: usize,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Integer list that must sum to exactly 100, with paired labels.
pub struct PercentRule {
    /// Field holding the paired labels.
    pub labels: String,
    /// Field regenerated as `"{label} ({value}%)"`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
    /// Minimum number of values.
    pub min: usize,
    /// Maximum number of values.
    pub max: usize,
    /// Prefix for generated labels.
    pub label_prefix: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Shape/cardinality/value rule of one field.
pub enum FieldKind {
    /// Scalar string.
    Text {
        /// Character budget; the catalog may override it.
        #[serde(skip_serializing_if = "Option::is_none")]
        budget: Option<usize>,
    },
    /// Fixed-list or dynamic-list.
    List(ListRule),
    /// Fixed number of labelled groups.
    Groups(GroupRule),
    /// Structured map of named buckets.
    Buckets(BucketRule),
    /// Data series aligned to a category field.
    Series(SeriesRule),
    /// Percentage set.
    Percentages(PercentRule),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One named field of a block type.
pub struct FieldRule {
    /// Canonical field name.
    pub name: String,
    /// Role in content-signal derivation.
    pub role: FieldRole,
    /// Shape rule.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldRule {
    /// Build a field rule.
    pub fn new(name: impl Into<String>, role: FieldRole, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            role,
            kind,
        }
    }

    /// The list rule, when this is a list field.
    pub fn as_list(&self) -> Option<&ListRule> {
        match &self.kind {
            FieldKind::List(rule) => Some(rule),
            _ => None,
        }
    }
}

impl CellRule {
    /// Value used for this position in generated (padded) rows.
    pub(crate) fn fill(&self) -> Value {
        match &self.kind {
            CellKind::Text => Value::String(String::new()),
            CellKind::Unit => Value::from(0.0),
            CellKind::Number { default } => Value::from(*default),
            CellKind::Choice { default, .. } => Value::String(default.clone()),
        }
    }
}
