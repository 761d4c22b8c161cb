use rayon::prelude::*;
use serde_json::Value;

use crate::{
    coerce::{content::CanonicalContent, engine::coerce},
    foundation::{
        diagnostic::Diagnostic,
        error::{DeckfitError, DeckfitResult},
    },
    layout::{
        matcher::{AssignOpts, Assignment, assign},
        signal::ContentSignal,
        slot::LayoutCatalog,
    },
    schema::{block::BlockKind, catalog::SchemaCatalog},
    select::sections::{SelectionResult, select},
};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Pipeline configuration; every field may be omitted in a config document.
pub struct PipelineOpts {
    /// Layout assignment tuning.
    pub assign: AssignOpts,
    /// Worker threads for [`Pipeline::run_batch`]; rayon's default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything a renderer needs for one deck.
pub struct PipelineOutput {
    /// Repaired content.
    pub content: CanonicalContent,
    /// Selected blocks and sections.
    pub selection: SelectionResult,
    /// One assignment per block, in deck order.
    pub assignments: Vec<Assignment>,
    /// Every repair made to the payload.
    pub diagnostics: Vec<Diagnostic>,
}

impl PipelineOutput {
    /// Blocks left without a layout slot.
    pub fn unassigned(&self) -> impl Iterator<Item = BlockKind> + '_ {
        self.assignments
            .iter()
            .filter(|a| a.slot.is_none())
            .map(|a| a.block)
    }

    /// Whether the payload needed no repair.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Coerce, select and assign, against catalogs supplied by the caller.
///
/// A pipeline holds no run state; one value can serve any number of runs, concurrently.
#[derive(Clone, Debug)]
pub struct Pipeline<'a> {
    schema: &'a SchemaCatalog,
    layouts: &'a LayoutCatalog,
    opts: PipelineOpts,
}

impl<'a> Pipeline<'a> {
    /// Bind a pipeline to its catalogs.
    pub fn new(schema: &'a SchemaCatalog, layouts: &'a LayoutCatalog, opts: PipelineOpts) -> Self {
        Self {
            schema,
            layouts,
            opts,
        }
    }

    /// Active configuration.
    pub fn opts(&self) -> &PipelineOpts {
        &self.opts
    }

    /// Run one payload. Never fails; see [`PipelineOutput::diagnostics`].
    #[tracing::instrument(skip_all)]
    pub fn run(&self, raw: &Value) -> PipelineOutput {
        let (content, mut diagnostics) = coerce(raw, self.schema);
        let (selection, selection_diagnostics) = select(raw, self.schema);
        diagnostics.extend(selection_diagnostics);

        let blocks: Vec<(BlockKind, ContentSignal)> = selection
            .deck_order()
            .filter_map(|kind| {
                let schema = self.schema.get(kind)?;
                Some((kind, ContentSignal::from_content(schema, &content)))
            })
            .collect();
        let assignments = assign(&blocks, self.layouts, &self.opts.assign);

        let output = PipelineOutput {
            content,
            selection,
            assignments,
            diagnostics,
        };
        tracing::info!(
            blocks = output.assignments.len(),
            unassigned = output.unassigned().count(),
            diagnostics = output.diagnostics.len(),
            "deck resolved"
        );
        output
    }

    /// Run independent payloads in parallel; output order matches input order.
    pub fn run_batch(&self, payloads: &[Value]) -> DeckfitResult<Vec<PipelineOutput>> {
        let pool = build_thread_pool(self.opts.threads)?;
        Ok(pool.install(|| payloads.par_iter().map(|raw| self.run(raw)).collect()))
    }
}

fn build_thread_pool(threads: Option<usize>) -> DeckfitResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(DeckfitError::validation(
            "pipeline 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| DeckfitError::Other(anyhow::Error::new(e).context("build rayon thread pool")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/runner.rs"]
mod tests;
