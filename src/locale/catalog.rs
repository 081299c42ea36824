use indexmap::IndexMap;
use tracing::trace;

use crate::locale::Localizer;

/// In-memory string catalog with per-language entries and a fallback chain.
///
/// Lookup order: active language, then the default language, then the key
/// itself so a missing entry stays visible instead of crashing or hiding.
#[derive(Debug, Clone)]
pub struct StringCatalog {
    active: String,
    default_language: String,
    entries: IndexMap<String, IndexMap<String, String>>,
    group_separators: IndexMap<String, char>,
}

impl StringCatalog {
    /// Empty catalog whose active language is the default language.
    #[must_use]
    pub fn new(default_language: impl Into<String>) -> Self {
        let default_language = default_language.into();
        Self {
            active: default_language.clone(),
            default_language,
            entries: IndexMap::new(),
            group_separators: IndexMap::new(),
        }
    }

    /// Catalog pre-filled with the English and German entries the pipeline
    /// needs. English is the default/fallback language.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new("en");

        for (key, text) in [
            ("chart.title", "Word distribution"),
            ("country.unknown", "Unknown"),
            ("set.none", "No set"),
            ("summary.items", "Items"),
            ("summary.words", "Total words"),
            ("summary.average", "Average words per item"),
            ("placeholder.loading", "Loading…"),
            ("placeholder.error", "Data could not be loaded"),
            ("placeholder.empty", "No data available"),
        ] {
            catalog.insert("en", key, text);
        }
        for (key, text) in [
            ("chart.title", "Wortverteilung"),
            ("country.unknown", "Unbekannt"),
            ("set.none", "Kein Set"),
            ("summary.items", "Einträge"),
            ("summary.words", "Wörter gesamt"),
            ("summary.average", "Durchschnittliche Wörter pro Eintrag"),
            ("placeholder.loading", "Wird geladen…"),
            ("placeholder.error", "Daten konnten nicht geladen werden"),
            ("placeholder.empty", "Keine Daten verfügbar"),
        ] {
            catalog.insert("de", key, text);
        }

        catalog.set_group_separator("en", ',');
        catalog.set_group_separator("de", '.');
        catalog
    }

    pub fn insert(
        &mut self,
        language: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.entries
            .entry(language.into())
            .or_default()
            .insert(key.into(), text.into());
    }

    pub fn set_group_separator(&mut self, language: impl Into<String>, separator: char) {
        self.group_separators.insert(language.into(), separator);
    }

    /// Switches the active language. Unknown languages are allowed; lookups
    /// then resolve through the fallback chain.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.active = language.into();
        trace!(language = %self.active, "catalog language switched");
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.entries
            .get(language)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
    }
}

impl Localizer for StringCatalog {
    fn language(&self) -> &str {
        &self.active
    }

    fn translate(&self, key: &str) -> String {
        self.lookup(&self.active, key)
            .or_else(|| self.lookup(&self.default_language, key))
            .map_or_else(|| key.to_owned(), ToOwned::to_owned)
    }

    fn format_number(&self, value: u64) -> String {
        let separator = self
            .group_separators
            .get(&self.active)
            .or_else(|| self.group_separators.get(&self.default_language))
            .copied()
            .unwrap_or(',');
        group_digits(value, separator)
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
    out
}
