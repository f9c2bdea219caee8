//! Section Domain Model
//!
//! A section is a named bundle of pre-computed metrics for a reporting period.

use std::collections::BTreeMap;

use serde_json::Value;

/// Newtype wrapper for a section lookup key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKey(String);

impl SectionKey {
    /// Normalize a user-supplied name into a lookup key.
    ///
    /// Trims, lowercases, and maps `-` and ` ` to `_`, so `" Overview-Core "`
    /// becomes `overview_core`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase().replace(['-', ' '], "_"))
    }

    /// Build the index key for a section name as stored in the data file.
    ///
    /// Only trims and lowercases. Separators are kept as-is.
    #[must_use]
    pub fn from_section_name(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    /// Get the key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SectionKey> for String {
    fn from(key: SectionKey) -> Self {
        key.0
    }
}

/// Section domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    period: Value,
    metrics: Value,
}

impl Section {
    #[must_use]
    pub fn new(name: impl Into<String>, period: Value, metrics: Value) -> Self {
        Self {
            name: name.into(),
            period,
            metrics,
        }
    }

    /// Index key derived from the section name
    #[must_use]
    pub fn key(&self) -> SectionKey {
        SectionKey::from_section_name(&self.name)
    }

    // Getters

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn period(&self) -> &Value {
        &self.period
    }

    #[must_use]
    pub fn metrics(&self) -> &Value {
        &self.metrics
    }
}

/// Immutable index of sections by key, iterated in key order
#[derive(Debug, Clone, Default)]
pub struct SectionCatalog {
    sections: BTreeMap<SectionKey, Section>,
}

impl SectionCatalog {
    /// Index the given sections.
    ///
    /// Sections whose name is blank are skipped. When two sections share a
    /// key, the later one wins.
    #[must_use]
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Self {
        let mut index = BTreeMap::new();
        for section in sections {
            let key = section.key();
            if key.is_empty() {
                tracing::warn!("Skipping section with blank name");
                continue;
            }
            if index.insert(key.clone(), section).is_some() {
                tracing::warn!(section = %key, "Duplicate section name, keeping the later entry");
            }
        }
        Self { sections: index }
    }

    #[must_use]
    pub fn get(&self, key: &SectionKey) -> Option<&Section> {
        self.sections.get(key)
    }

    /// All keys in ascending order
    #[must_use]
    pub fn keys(&self) -> Vec<SectionKey> {
        self.sections.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
