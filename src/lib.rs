//! Deckfit repairs loosely structured slide-deck payloads and picks a layout slot for every block.
//!
//! A payload is a JSON document produced by an upstream generator (often a language model) that
//! describes a multi-section deck built from a closed set of content blocks. Payloads are routinely
//! malformed: wrong shapes, wrong list lengths, overlong strings, percentages that do not sum to
//! 100, missing sections. Deckfit never rejects one. Every defect is repaired and reported.
//!
//! # Pipeline overview
//!
//! 1. **Coerce**: `payload + SchemaCatalog -> CanonicalContent` (every field in canonical form)
//! 2. **Select**: `payload + SchemaCatalog -> SelectionResult` (which blocks, grouped into sections)
//! 3. **Assign**: `blocks + LayoutCatalog -> Vec<Assignment>` (one template slot per block)
//!
//! Each stage returns its [`Diagnostic`] records next to its result; [`Pipeline`] chains all three.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs give identical outputs, diagnostics included.
//! - **No IO in the core**: catalogs and payloads arrive as values; the `deckfit` binary owns files.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod coerce;
mod foundation;
mod layout;
mod pipeline;
mod schema;
mod select;

pub use coerce::content::{CanonicalContent, Cell, FieldValue, Group, Series};
pub use coerce::engine::{CONTENT_KEY, coerce};
pub use coerce::numeric::normalize_percentages;
pub use foundation::diagnostic::{Diagnostic, DiagnosticKind};
pub use foundation::error::{DeckfitError, DeckfitResult};
pub use foundation::text::{TRUNCATION_MARKER, truncate_to_budget};
pub use layout::matcher::{AssignOpts, Assignment, DEFAULT_VARIETY_WINDOW, assign, rank_score};
pub use layout::preference::Preference;
pub use layout::signal::{ContentSignal, SignalKind};
pub use layout::slot::{
    LayoutCatalog, LayoutCatalogDef, LayoutSlot, RegionCounts, SlotCategory, SlotDef,
};
pub use pipeline::runner::{Pipeline, PipelineOpts, PipelineOutput};
pub use schema::block::BlockKind;
pub use schema::catalog::{BlockSchema, DocumentField, SchemaCatalog};
pub use schema::rule::{
    BucketRule, CellKind, CellRule, FieldKind, FieldRole, FieldRule, GroupRule, ListBounds,
    ListRule, PadWith, PercentRule, SeriesRule, UNIT_FALLBACK,
};
pub use select::sections::{
    ADDITIONAL_TITLE, ENVELOPE_KEYS, OVERVIEW_TITLE, Section, SelectionResult, select,
};
