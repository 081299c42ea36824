use serde::{Deserialize, Serialize};

/// Measured pixel dimensions of the drawing surface a chart is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A surface is measurable once layout has given it nonzero dimensions.
    #[must_use]
    pub fn is_measurable(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One content record as delivered by the upstream item store.
///
/// Grouping attributes and the word count may all be absent or empty in
/// upstream payloads; the hierarchy transform substitutes localized
/// fallbacks and treats a missing count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub word_count: Option<u64>,
}

impl ContentItem {
    #[must_use]
    pub fn new(
        country: impl Into<String>,
        set: impl Into<String>,
        word_count: u64,
    ) -> Self {
        Self {
            id: None,
            country: Some(country.into()),
            set: Some(set.into()),
            word_count: Some(word_count),
        }
    }
}

/// Aggregate counts accumulated from leaf collections during one rebuild.
///
/// Totals are produced by the same pass that builds the tree and are never
/// patched incrementally, so tree and totals cannot drift apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTotals {
    pub word_count: u64,
    pub item_count: u64,
}
