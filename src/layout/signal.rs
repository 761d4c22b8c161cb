use crate::coerce::content::{CanonicalContent, FieldValue};
use crate::schema::catalog::BlockSchema;
use crate::schema::rule::FieldRole;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Structural capabilities of one block's canonical content.
pub struct ContentSignal {
    /// A non-blank title field is present.
    pub has_title: bool,
    /// Running text or bullets are present.
    pub has_body: bool,
    /// An image reference is present.
    pub has_image: bool,
    /// Chart, table or diagram data is present.
    pub has_graphic: bool,
    /// Number of side-by-side sections (0 when none).
    pub columns: usize,
    /// Free-text layout hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Closed set of signal shapes that select a preference list.
pub enum SignalKind {
    /// Heading only.
    TitleOnly,
    /// Heading with text or bullets.
    TextBody,
    /// Content built around an image.
    ImageLed,
    /// `n` side-by-side sections (`n >= 2`).
    Columns(usize),
    /// Chart, table or diagram.
    Graphic,
}

impl ContentSignal {
    /// Derive the signal of `schema`'s block from canonical content.
    ///
    /// Absent and blank fields do not contribute.
    pub fn from_content(schema: &BlockSchema, content: &CanonicalContent) -> Self {
        let mut signal = Self::default();
        for field in &schema.fields {
            let Some(value) = content.get(&field.name).filter(|v| !v.is_blank()) else {
                continue;
            };
            match field.role {
                FieldRole::Title => signal.has_title = true,
                FieldRole::Body => signal.has_body = true,
                FieldRole::Columns => {
                    signal.has_body = true;
                    signal.columns = signal.columns.max(value.item_count());
                }
                FieldRole::Graphic => signal.has_graphic = true,
                FieldRole::Image => signal.has_image = true,
                FieldRole::Hint => {
                    if let FieldValue::Text(hint) = value {
                        signal.hint = Some(hint.trim().to_string());
                    }
                }
                FieldRole::Detail => {}
            }
        }
        signal
    }

    /// Shape that decides which layout categories are preferred.
    pub fn kind(&self) -> SignalKind {
        if self.columns >= 2 {
            SignalKind::Columns(self.columns)
        } else if self.has_image {
            SignalKind::ImageLed
        } else if self.has_graphic {
            SignalKind::Graphic
        } else if self.has_body {
            SignalKind::TextBody
        } else if self.has_title {
            SignalKind::TitleOnly
        } else {
            SignalKind::Graphic
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/signal.rs"]
mod tests;
