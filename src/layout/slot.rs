use std::collections::HashSet;

use crate::foundation::error::{DeckfitError, DeckfitResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Coarse structural class shared by layout slots and block preferences.
pub enum SlotCategory {
    /// Cover or title slide.
    Title,
    /// Title plus one text body.
    ContentText,
    /// Text with a picture on the right.
    ContentImageRight,
    /// Text with a picture on the left.
    ContentImageLeft,
    /// Two side-by-side bodies.
    MultiColumn2,
    /// Three side-by-side bodies.
    MultiColumn3,
    /// Four side-by-side bodies.
    MultiColumn4,
    /// Picture framed in a device mockup.
    DeviceMockup,
    /// Closing slide.
    ThankYou,
    /// Section divider.
    Divider,
    /// Grid of people cards.
    ProfileGrid,
    /// Hexagon arrangement.
    Hexagon,
    /// Edge-to-edge picture.
    FullImage,
    /// Mission and vision pair.
    MissionVision,
    /// Title only or empty, free for drawn graphics.
    BlankCanvas,
    /// Anything else; also the reading of unrecognized category names.
    #[serde(other)]
    Utility,
}

impl SlotCategory {
    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::ContentText => "content_text",
            Self::ContentImageRight => "content_image_right",
            Self::ContentImageLeft => "content_image_left",
            Self::MultiColumn2 => "multi_column_2",
            Self::MultiColumn3 => "multi_column_3",
            Self::MultiColumn4 => "multi_column_4",
            Self::DeviceMockup => "device_mockup",
            Self::ThankYou => "thank_you",
            Self::Divider => "divider",
            Self::ProfileGrid => "profile_grid",
            Self::Hexagon => "hexagon",
            Self::FullImage => "full_image",
            Self::MissionVision => "mission_vision",
            Self::BlankCanvas => "blank_canvas",
            Self::Utility => "utility",
        }
    }

    /// Classify a layout from its display name and region counts.
    ///
    /// Name rules are tried first, in a fixed order; region composition decides the rest.
    pub fn classify(name: &str, regions: RegionCounts) -> Self {
        let n = name.to_lowercase();
        let n = n.as_str();

        if has_title_word(n)
            && !["only", "solo", "imagen", "text", "vertical"]
                .iter()
                .any(|w| n.contains(w))
            && regions.total() <= 3
            && regions.body <= 1
        {
            return Self::Title;
        }
        if spaced(n, &["thank", "you"]) {
            return Self::ThankYou;
        }
        if n.contains("divider") || spaced(n, &["encabezado", "de", "secci"]) {
            return Self::Divider;
        }
        if ordered(n, "mission", "vision") {
            return Self::MissionVision;
        }
        if n.contains("hexagon") {
            return Self::Hexagon;
        }
        if spaced(n, &["full", "image"]) {
            return Self::FullImage;
        }
        if n.contains("profile") {
            return Self::ProfileGrid;
        }
        if ["laptop", "device", "phone", "tablet"]
            .iter()
            .any(|w| n.contains(w))
        {
            return Self::DeviceMockup;
        }
        if has_word(n, "blank") || spaced(n, &["en", "blanco"]) {
            return Self::BlankCanvas;
        }
        let title_only = ["title", "titulo"]
            .iter()
            .any(|t| spaced(n, &[*t, "only"]) || spaced(n, &[*t, "solo"]));
        if title_only || spaced(n, &["solo", "el", "titulo"]) {
            return Self::BlankCanvas;
        }
        if spaced(n, &["4", "column"]) || regions.picture >= 4 {
            return Self::MultiColumn4;
        }
        if spaced(n, &["3", "column"]) || (regions.picture == 3 && regions.body >= 3) {
            return Self::MultiColumn3;
        }
        if ordered(n, "half", "column")
            || spaced(n, &["dos", "objetos"])
            || n.contains("comparacion")
            || spaced(n, &["two", "level"])
        {
            return Self::MultiColumn2;
        }
        if spaced(n, &["image", "right"]) || ordered(n, "imagen", "right") {
            return Self::ContentImageRight;
        }
        if spaced(n, &["image", "left"])
            || spaced(n, &["half", "image"])
            || ordered(n, "imagen", "left")
        {
            return Self::ContentImageLeft;
        }
        if spaced(n, &["text", "only"])
            || n.contains("contenido")
            || ordered(n, "picture", "caption")
            || ordered(n, "titulo", "texto")
        {
            return Self::ContentText;
        }

        if regions.picture >= 1 && regions.body >= 1 {
            Self::ContentImageRight
        } else if regions.body >= 2 || regions.generic >= 2 {
            Self::MultiColumn2
        } else if regions.body == 1 || regions.generic == 1 {
            Self::ContentText
        } else {
            Self::Utility
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn starts_word(hay: &str, at: usize) -> bool {
    !hay[..at].chars().next_back().is_some_and(is_word_char)
}

fn ends_word(rest: &str) -> bool {
    !rest.chars().next().is_some_and(is_word_char)
}

/// `word` as a whole word.
fn has_word(hay: &str, word: &str) -> bool {
    hay.match_indices(word)
        .any(|(i, _)| starts_word(hay, i) && ends_word(&hay[i + word.len()..]))
}

/// `title` as a word, optionally numbered 1 to 3 (`title`, `title 2`, `title3`).
fn has_title_word(hay: &str) -> bool {
    hay.match_indices("title").any(|(i, m)| {
        if !starts_word(hay, i) {
            return false;
        }
        let rest = &hay[i + m.len()..];
        if ends_word(rest) {
            return true;
        }
        let mut chars = rest.chars();
        matches!(chars.next(), Some('1'..='3')) && ends_word(chars.as_str())
    })
}

/// `parts` in sequence, separated by optional whitespace.
fn spaced(hay: &str, parts: &[&str]) -> bool {
    let Some((first, tail)) = parts.split_first() else {
        return false;
    };
    hay.match_indices(*first).any(|(i, m)| {
        let mut rest = &hay[i + m.len()..];
        for part in tail {
            rest = rest.trim_start();
            match rest.strip_prefix(part) {
                Some(r) => rest = r,
                None => return false,
            }
        }
        true
    })
}

/// `a` somewhere before `b`.
fn ordered(hay: &str, a: &str, b: &str) -> bool {
    hay.find(a).is_some_and(|i| hay[i + a.len()..].contains(b))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Region counts of a layout, footer regions excluded.
pub struct RegionCounts {
    /// Title regions.
    pub title: usize,
    /// Body (text) regions.
    pub body: usize,
    /// Picture regions.
    pub picture: usize,
    /// Untyped content regions.
    pub generic: usize,
}

impl RegionCounts {
    fn total(self) -> usize {
        self.title + self.body + self.picture + self.generic
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// One reusable visual template a block can be rendered into.
pub struct LayoutSlot {
    /// Stable slot index (what an assignment refers to).
    pub index: usize,
    /// Display name, matched against block hints.
    pub name: String,
    /// Structural category.
    pub category: SlotCategory,
    /// Number of title regions.
    pub title_regions: usize,
    /// Number of body regions.
    pub body_regions: usize,
    /// Number of picture regions.
    pub picture_regions: usize,
}

#[derive(Clone, Debug, serde::Deserialize)]
/// Slot as written in a layout catalog document.
pub struct SlotDef {
    /// Stable slot index.
    pub index: usize,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Category; derived from the name and regions when absent.
    #[serde(default)]
    pub category: Option<SlotCategory>,
    /// Title regions.
    #[serde(default)]
    pub title_regions: usize,
    /// Body regions.
    #[serde(default)]
    pub body_regions: usize,
    /// Picture regions.
    #[serde(default)]
    pub picture_regions: usize,
    /// Untyped content regions (classification input only).
    #[serde(default)]
    pub generic_regions: usize,
}

impl SlotDef {
    /// Resolve the category and drop classification-only data.
    pub fn into_slot(self) -> LayoutSlot {
        let category = self.category.unwrap_or_else(|| {
            SlotCategory::classify(
                &self.name,
                RegionCounts {
                    title: self.title_regions,
                    body: self.body_regions,
                    picture: self.picture_regions,
                    generic: self.generic_regions,
                },
            )
        });
        LayoutSlot {
            index: self.index,
            name: self.name,
            category,
            title_regions: self.title_regions,
            body_regions: self.body_regions,
            picture_regions: self.picture_regions,
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
/// Layout catalog document.
pub struct LayoutCatalogDef {
    /// Slots in catalog order.
    pub slots: Vec<SlotDef>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Ordered, validated set of layout slots.
///
/// Catalog order is significant: it breaks scoring ties.
pub struct LayoutCatalog {
    slots: Vec<LayoutSlot>,
}

impl LayoutCatalog {
    /// Build a catalog; slot indices must be unique.
    pub fn new(slots: Vec<LayoutSlot>) -> DeckfitResult<Self> {
        let mut seen = HashSet::new();
        for slot in &slots {
            if !seen.insert(slot.index) {
                return Err(DeckfitError::catalog(format!(
                    "layout slot index {} is declared twice",
                    slot.index
                )));
            }
        }
        Ok(Self { slots })
    }

    /// Build a catalog from its document form, classifying uncategorized slots.
    pub fn from_def(def: LayoutCatalogDef) -> DeckfitResult<Self> {
        Self::new(def.slots.into_iter().map(SlotDef::into_slot).collect())
    }

    /// Parse a JSON layout catalog document.
    pub fn from_json_str(s: &str) -> DeckfitResult<Self> {
        let def: LayoutCatalogDef = serde_json::from_str(s)?;
        Self::from_def(def)
    }

    /// Slots in catalog order.
    pub fn slots(&self) -> &[LayoutSlot] {
        &self.slots
    }

    /// Slot by index.
    pub fn get(&self, index: usize) -> Option<&LayoutSlot> {
        self.slots.iter().find(|s| s.index == index)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the catalog holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/slot.rs"]
mod tests;
