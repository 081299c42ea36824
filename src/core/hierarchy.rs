use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{ContentItem, WordTotals};
use crate::error::{TreemapError, TreemapResult};

/// Display name of the synthetic root node. The root itself is never
/// rendered; backends address only its two descendant levels.
pub const ROOT_NAME: &str = "root";

/// One node of the country → collection tree handed to chart backends.
///
/// The root carries only children, countries carry collection children,
/// and collections are leaves carrying both counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub word_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub item_count: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    #[must_use]
    pub fn branch(name: impl Into<String>, children: Vec<HierarchyNode>) -> Self {
        Self {
            name: name.into(),
            word_count: None,
            item_count: None,
            children,
        }
    }

    #[must_use]
    pub fn leaf(name: impl Into<String>, word_count: u64, item_count: u64) -> Self {
        Self {
            name: name.into(),
            word_count: Some(word_count),
            item_count: Some(item_count),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.word_count.is_some()
    }

    /// Collects all collection-level leaves in tree order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&HierarchyNode> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }
}

fn collect_leaves<'a>(node: &'a HierarchyNode, out: &mut Vec<&'a HierarchyNode>) {
    if node.is_leaf() {
        out.push(node);
        return;
    }
    for child in &node.children {
        collect_leaves(child, out);
    }
}

/// The unit produced by one rebuild pass: the tree plus the leaf-summed
/// totals. Keeping both in one value guarantees they describe the same data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub root: HierarchyNode,
    pub totals: WordTotals,
}

impl Hierarchy {
    /// Degraded result used when a rebuild fails: no children, zeroed totals.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            root: HierarchyNode::branch(ROOT_NAME, Vec::new()),
            totals: WordTotals::default(),
        }
    }
}

/// Localized display names substituted for missing grouping attributes.
///
/// Resolved by the caller against the active language so the transform
/// itself stays pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackLabels {
    pub unknown_country: String,
    pub unnamed_set: String,
}

#[derive(Debug, Clone, Copy, Default)]
struct LeafAccum {
    // u128 so per-collection accumulation cannot overflow mid-pass; the
    // final conversion back to u64 is the single overflow check.
    word_count: u128,
    item_count: u64,
}

type GroupMap = IndexMap<String, IndexMap<String, LeafAccum>>;

#[cfg(feature = "parallel-aggregation")]
const PARALLEL_CUTOFF: usize = 16_384;
#[cfg(feature = "parallel-aggregation")]
const PARALLEL_CHUNK: usize = 4_096;

/// Builds the country → collection hierarchy and its totals in one pass.
///
/// Items are grouped in first-seen order, stable across rebuilds so chart
/// node identity does not churn. Missing or blank grouping attributes fall
/// back to the provided localized labels; a missing word count is zero.
/// Groups with zero items are never created.
pub fn build_hierarchy(
    items: &[ContentItem],
    labels: &FallbackLabels,
) -> TreemapResult<Hierarchy> {
    let groups = group_items(items, labels);

    let mut total_words: u128 = 0;
    let mut total_items: u64 = 0;
    let mut countries = Vec::with_capacity(groups.len());
    for (country, sets) in groups {
        let mut children = Vec::with_capacity(sets.len());
        for (set, leaf) in sets {
            total_words += leaf.word_count;
            total_items += leaf.item_count;
            let word_count = u64::try_from(leaf.word_count).map_err(|_| {
                TreemapError::InvalidData(format!("word count overflow in collection `{set}`"))
            })?;
            children.push(HierarchyNode::leaf(set, word_count, leaf.item_count));
        }
        countries.push(HierarchyNode::branch(country, children));
    }

    let totals = WordTotals {
        word_count: u64::try_from(total_words)
            .map_err(|_| TreemapError::InvalidData("total word count overflow".to_owned()))?,
        item_count: total_items,
    };

    debug!(
        items = items.len(),
        countries = countries.len(),
        total_words = totals.word_count,
        "built hierarchy"
    );

    Ok(Hierarchy {
        root: HierarchyNode::branch(ROOT_NAME, countries),
        totals,
    })
}

fn group_items(items: &[ContentItem], labels: &FallbackLabels) -> GroupMap {
    #[cfg(feature = "parallel-aggregation")]
    {
        use rayon::prelude::*;

        if items.len() >= PARALLEL_CUTOFF {
            return items
                .par_chunks(PARALLEL_CHUNK)
                .map(|chunk| group_chunk(chunk, labels))
                .reduce(GroupMap::new, merge_groups);
        }
    }

    group_chunk(items, labels)
}

fn group_chunk(items: &[ContentItem], labels: &FallbackLabels) -> GroupMap {
    let mut groups = GroupMap::new();
    for item in items {
        let country = display_name(item.country.as_deref(), &labels.unknown_country);
        let set = display_name(item.set.as_deref(), &labels.unnamed_set);
        let leaf = groups
            .entry(country)
            .or_default()
            .entry(set)
            .or_default();
        leaf.word_count += u128::from(item.word_count.unwrap_or(0));
        leaf.item_count += 1;
    }
    groups
}

/// Merges `right` into `left`, appending unseen keys in `right`'s order.
///
/// Rayon reduces adjacent chunks in sequence order, so the merged map keeps
/// the same first-seen ordering the sequential pass produces.
#[cfg(feature = "parallel-aggregation")]
fn merge_groups(mut left: GroupMap, right: GroupMap) -> GroupMap {
    for (country, sets) in right {
        let target = left.entry(country).or_default();
        for (set, leaf) in sets {
            let merged = target.entry(set).or_default();
            merged.word_count += leaf.word_count;
            merged.item_count += leaf.item_count;
        }
    }
    left
}

fn display_name(raw: Option<&str>, fallback: &str) -> String {
    match raw {
        Some(value) if !value.trim().is_empty() => value.to_owned(),
        _ => fallback.to_owned(),
    }
}
