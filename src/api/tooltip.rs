use smallvec::SmallVec;

use crate::core::hierarchy::ROOT_NAME;
use crate::core::{HierarchyNode, WordTotals};

/// Pure tooltip content function invoked by the backend on hover.
pub type TooltipFormatter = fn(&TooltipContext<'_>) -> String;

/// Hovered-node context handed to the tooltip formatter.
///
/// `path` holds the ancestor names from the root down to the hovered node's
/// parent, as reported by the engine's hover callback.
#[derive(Debug, Clone)]
pub struct TooltipContext<'a> {
    pub name: &'a str,
    pub word_count: u64,
    pub item_count: u64,
    pub totals: WordTotals,
    pub path: SmallVec<[&'a str; 3]>,
}

impl<'a> TooltipContext<'a> {
    #[must_use]
    pub fn new(name: &'a str, word_count: u64, item_count: u64, totals: WordTotals) -> Self {
        Self {
            name,
            word_count,
            item_count,
            totals,
            path: SmallVec::new(),
        }
    }

    /// Builds a context for a tree node, treating absent counts as zero.
    #[must_use]
    pub fn from_node(node: &'a HierarchyNode, totals: WordTotals) -> Self {
        Self::new(
            &node.name,
            node.word_count.unwrap_or(0),
            node.item_count.unwrap_or(0),
            totals,
        )
    }

    #[must_use]
    pub fn with_ancestor(mut self, name: &'a str) -> Self {
        self.path.push(name);
        self
    }

    /// Share of the run's total word count, in percent. Zero when the total
    /// is zero.
    #[must_use]
    pub fn percentage_of_total(&self) -> f64 {
        if self.totals.word_count == 0 {
            return 0.0;
        }
        self.word_count as f64 / self.totals.word_count as f64 * 100.0
    }

    /// Rounded words per item. Zero when the node holds no items.
    #[must_use]
    pub fn average_words(&self) -> u64 {
        if self.item_count == 0 {
            return 0;
        }
        (self.word_count as f64 / self.item_count as f64).round() as u64
    }
}

/// Default tooltip content: ancestor trail, word count, share of total, and
/// words per item.
#[must_use]
pub fn format_tooltip(context: &TooltipContext<'_>) -> String {
    let mut trail = String::new();
    for ancestor in context.path.iter().filter(|name| **name != ROOT_NAME) {
        trail.push_str(ancestor);
        trail.push_str(" › ");
    }
    format!(
        "{trail}{}: {} words ({:.1}% of total), {} words per item",
        context.name,
        context.word_count,
        context.percentage_of_total(),
        context.average_words(),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{TooltipContext, format_tooltip};
    use crate::core::WordTotals;

    fn totals(word_count: u64, item_count: u64) -> WordTotals {
        WordTotals {
            word_count,
            item_count,
        }
    }

    #[test]
    fn percentage_and_average_are_computed() {
        let context = TooltipContext::new("A", 100, 2, totals(180, 3));
        assert_relative_eq!(context.percentage_of_total(), 55.5555, epsilon = 1e-3);
        assert_eq!(context.average_words(), 50);
    }

    #[test]
    fn zero_totals_and_zero_items_emit_zero() {
        let context = TooltipContext::new("A", 0, 0, totals(0, 0));
        assert_eq!(context.percentage_of_total(), 0.0);
        assert_eq!(context.average_words(), 0);

        let text = format_tooltip(&context);
        assert!(text.contains("(0.0% of total)"));
        assert!(text.contains("0 words per item"));
    }

    #[test]
    fn trail_skips_the_synthetic_root() {
        let context = TooltipContext::new("A", 100, 2, totals(180, 3))
            .with_ancestor("root")
            .with_ancestor("FR");
        assert_eq!(
            format_tooltip(&context),
            "FR › A: 100 words (55.6% of total), 50 words per item"
        );
    }
}
