use crate::layout::signal::SignalKind;
use crate::layout::slot::SlotCategory;

use crate::layout::slot::SlotCategory::{
    BlankCanvas, ContentImageLeft, ContentImageRight, ContentText, Divider, FullImage,
    MultiColumn2, MultiColumn3, MultiColumn4, Title, Utility,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Acceptable slot categories for a signal kind, most preferred first.
pub struct Preference {
    /// Ranked categories.
    pub categories: &'static [SlotCategory],
    /// Category tried when no ranked category has any slot.
    pub fallback: SlotCategory,
}

impl Preference {
    /// Rank of `category` in the list, if listed.
    pub fn rank(&self, category: SlotCategory) -> Option<usize> {
        self.categories.iter().position(|c| *c == category)
    }
}

impl SignalKind {
    /// Static preference entry for this kind.
    pub fn preference(self) -> Preference {
        let (categories, fallback): (&'static [SlotCategory], SlotCategory) = match self {
            Self::TitleOnly => (&[Title, Divider], ContentText),
            Self::TextBody => (&[ContentText, ContentImageRight], BlankCanvas),
            Self::ImageLed => (&[ContentImageRight, ContentImageLeft, ContentText], FullImage),
            Self::Columns(0..=2) => (&[MultiColumn2, ContentText], ContentText),
            Self::Columns(3) => (&[MultiColumn3, MultiColumn2], ContentText),
            Self::Columns(_) => (&[MultiColumn4, MultiColumn3], ContentText),
            Self::Graphic => (&[BlankCanvas, ContentText], Utility),
        };
        Preference {
            categories,
            fallback,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/preference.rs"]
mod tests;
