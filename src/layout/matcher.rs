use std::collections::VecDeque;

use crate::layout::signal::{ContentSignal, SignalKind};
use crate::layout::slot::{LayoutCatalog, LayoutSlot, SlotCategory};
use crate::schema::block::BlockKind;

const TOP_RANK_SCORE: u32 = 50;
const RANK_STEP: u32 = 10;
const RANK_FLOOR: u32 = 20;
const REGION_FIT: u32 = 5;
const IMAGE_LED_FIT: u32 = 10;
const COLUMN_NEAR_FIT: u32 = 2;
const VARIETY_BONUS: u32 = 10;
const HINT_BONUS: u32 = 15;

/// Default size of the recently-used slot window.
pub const DEFAULT_VARIETY_WINDOW: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Assignment tuning.
pub struct AssignOpts {
    /// How many recent assignments are remembered for the variety bonus.
    pub variety_window: usize,
}

impl Default for AssignOpts {
    fn default() -> Self {
        Self {
            variety_window: DEFAULT_VARIETY_WINDOW,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Layout decision for one block; `slot` is `None` when nothing matched.
pub struct Assignment {
    /// Assigned block.
    pub block: BlockKind,
    /// Chosen slot index.
    pub slot: Option<usize>,
}

/// Sliding window of recently assigned slot indices.
#[derive(Debug)]
struct VarietyWindow {
    cap: usize,
    recent: VecDeque<usize>,
}

impl VarietyWindow {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            recent: VecDeque::with_capacity(cap + 1),
        }
    }

    fn contains(&self, index: usize) -> bool {
        self.recent.contains(&index)
    }

    fn push(&mut self, index: usize) {
        self.recent.push_back(index);
        while self.recent.len() > self.cap {
            self.recent.pop_front();
        }
    }
}

/// Score for the category at `rank` in a preference list.
pub fn rank_score(rank: usize) -> u32 {
    let step = u32::try_from(rank)
        .unwrap_or(u32::MAX)
        .saturating_mul(RANK_STEP);
    TOP_RANK_SCORE.saturating_sub(step).max(RANK_FLOOR)
}

fn fit_score(signal: &ContentSignal, kind: SignalKind, slot: &LayoutSlot) -> u32 {
    let mut score = 0;
    if signal.has_title && slot.title_regions > 0 {
        score += REGION_FIT;
    }
    if signal.has_body && slot.body_regions > 0 {
        score += REGION_FIT;
    }
    if signal.has_image && slot.picture_regions > 0 {
        score += if kind == SignalKind::ImageLed {
            IMAGE_LED_FIT
        } else {
            REGION_FIT
        };
    }
    if let SignalKind::Columns(n) = kind {
        if slot.body_regions >= n {
            score += REGION_FIT;
        } else if slot.body_regions + 1 == n {
            score += COLUMN_NEAR_FIT;
        }
    }
    score
}

fn hint_matches(signal: &ContentSignal, slot: &LayoutSlot) -> bool {
    signal.hint.as_deref().is_some_and(|hint| {
        let hint = hint.to_lowercase();
        !hint.is_empty() && slot.name.to_lowercase().contains(&hint)
    })
}

/// Highest-scoring slot among those `base` admits; the first one wins ties.
fn best_slot(
    catalog: &LayoutCatalog,
    signal: &ContentSignal,
    kind: SignalKind,
    window: &VarietyWindow,
    base: impl Fn(SlotCategory) -> Option<u32>,
) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for slot in catalog.slots() {
        let Some(mut score) = base(slot.category) else {
            continue;
        };
        score += fit_score(signal, kind, slot);
        if !window.contains(slot.index) {
            score += VARIETY_BONUS;
        }
        if hint_matches(signal, slot) {
            score += HINT_BONUS;
        }
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((slot.index, score));
        }
    }
    best
}

/// Assign each block, in order, to its best-scoring layout slot.
///
/// Greedy and single-pass: each decision sees the variety window left by the previous ones.
/// A block with no candidate in its preferred or fallback categories gets `slot: None`.
#[tracing::instrument(skip(blocks, catalog))]
pub fn assign(
    blocks: &[(BlockKind, ContentSignal)],
    catalog: &LayoutCatalog,
    opts: &AssignOpts,
) -> Vec<Assignment> {
    let mut window = VarietyWindow::new(opts.variety_window);
    let mut out = Vec::with_capacity(blocks.len());

    for (block, signal) in blocks {
        let kind = signal.kind();
        let pref = kind.preference();

        let preferred = best_slot(catalog, signal, kind, &window, |category| {
            pref.rank(category).map(rank_score)
        });
        let chosen = preferred.or_else(|| {
            tracing::debug!(
                block = block.as_str(),
                fallback = pref.fallback.as_str(),
                "no preferred slot"
            );
            best_slot(catalog, signal, kind, &window, |category| {
                (category == pref.fallback).then_some(RANK_FLOOR)
            })
        });

        match chosen {
            Some((index, score)) => {
                tracing::debug!(block = block.as_str(), slot = index, score, "assigned");
                window.push(index);
            }
            None => tracing::warn!(block = block.as_str(), "no candidate layout slot"),
        }
        out.push(Assignment {
            block: *block,
            slot: chosen.map(|(index, _)| index),
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/matcher.rs"]
mod tests;
