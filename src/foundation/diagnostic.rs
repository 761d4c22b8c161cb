use std::fmt;

use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// What kind of repair a [`Diagnostic`] describes.
pub enum DiagnosticKind {
    /// A key matched no field or block tag and was dropped.
    UnknownKey,
    /// A nested value lost to a key already present at the top level.
    FlattenConflict,
    /// An alternate field name was renamed to its canonical name.
    AliasRenamed,
    /// The container shape of a value was changed, or an unusable value dropped.
    ShapeCoerced,
    /// A list (or list item) was padded to its required length.
    Padded,
    /// A list (or list item) was cut to its required length.
    Truncated,
    /// A numeric value was out of range, or not numeric, and was replaced.
    Clamped,
    /// A percentage set was rescaled to sum to 100.
    Rescaled,
    /// A value outside its fixed vocabulary was replaced by the default.
    EnumReplaced,
    /// A string was cut to its character budget.
    TextTruncated,
    /// The selected block list was missing, filtered, or defaulted.
    SelectionRepaired,
    /// A section was dropped, filtered, or synthesized.
    SectionRepaired,
}

impl DiagnosticKind {
    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownKey => "unknown_key",
            Self::FlattenConflict => "flatten_conflict",
            Self::AliasRenamed => "alias_renamed",
            Self::ShapeCoerced => "shape_coerced",
            Self::Padded => "padded",
            Self::Truncated => "truncated",
            Self::Clamped => "clamped",
            Self::Rescaled => "rescaled",
            Self::EnumReplaced => "enum_replaced",
            Self::TextTruncated => "text_truncated",
            Self::SelectionRepaired => "selection_repaired",
            Self::SectionRepaired => "section_repaired",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A non-fatal record of one repair made to an untrusted payload.
pub struct Diagnostic {
    /// Repair category.
    pub kind: DiagnosticKind,
    /// Field name (or payload key / path) the repair applies to.
    pub field: String,
    /// The value as received, before the repair.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub original: Value,
    /// Human-readable description of the corrective action.
    pub action: String,
}

impl Diagnostic {
    /// Build a diagnostic record.
    pub fn new(
        kind: DiagnosticKind,
        field: impl Into<String>,
        original: Value,
        action: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            original,
            action: action.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.as_str(), self.field, self.action)
    }
}

/// Append-only collector shared by the repair passes.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub(crate) fn record(
        &mut self,
        kind: DiagnosticKind,
        field: &str,
        original: Value,
        action: impl Into<String>,
    ) {
        let d = Diagnostic::new(kind, field, original, action);
        tracing::debug!(kind = d.kind.as_str(), field = %d.field, action = %d.action, "repaired");
        self.entries.push(d);
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
