use crate::core::WordTotals;
use crate::locale::Localizer;

/// Display values for the summary panel next to the chart.
///
/// Numbers are pre-formatted with the active locale's digit grouping so the
/// host chrome renders them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub items_label: String,
    pub items_value: String,
    pub words_label: String,
    pub words_value: String,
    pub average_label: String,
    /// Absent when there are no items; the panel omits the row instead of
    /// showing a division artifact.
    pub average_value: Option<String>,
}

/// Maps aggregate totals into localized summary display values.
#[must_use]
pub fn build_summary(totals: WordTotals, localizer: &dyn Localizer) -> SummaryView {
    let average_value = (totals.item_count > 0).then(|| {
        let average = (totals.word_count as f64 / totals.item_count as f64).round() as u64;
        localizer.format_number(average)
    });

    SummaryView {
        items_label: localizer.translate("summary.items"),
        items_value: localizer.format_number(totals.item_count),
        words_label: localizer.translate("summary.words"),
        words_value: localizer.format_number(totals.word_count),
        average_label: localizer.translate("summary.average"),
        average_value,
    }
}

#[cfg(test)]
mod tests {
    use super::build_summary;
    use crate::core::WordTotals;
    use crate::locale::StringCatalog;

    #[test]
    fn average_is_rounded_words_per_item() {
        let totals = WordTotals {
            word_count: 180,
            item_count: 3,
        };
        let summary = build_summary(totals, &StringCatalog::builtin());
        assert_eq!(summary.average_value.as_deref(), Some("60"));
        assert_eq!(summary.words_value, "180");
    }

    #[test]
    fn average_is_omitted_without_items() {
        let summary = build_summary(WordTotals::default(), &StringCatalog::builtin());
        assert_eq!(summary.average_value, None);
        assert_eq!(summary.items_value, "0");
    }
}
