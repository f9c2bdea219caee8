//! JSON File Section Repository Implementation
//!
//! Implements the SectionRepository trait over a JSON data file that is read
//! once at startup and held in memory.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::gateways::SectionRepository;
use crate::domain::models::section::{Section, SectionCatalog, SectionKey};
use crate::shared::errors::RepositoryError;

/// One entry of the data file
#[derive(Debug, Deserialize)]
struct SectionRecord {
    #[serde(default)]
    section: Value,
    #[serde(default)]
    period: Value,
    #[serde(default = "empty_metrics")]
    metrics: Value,
}

fn empty_metrics() -> Value {
    Value::Object(Map::new())
}

impl TryFrom<SectionRecord> for Section {
    type Error = RepositoryError;

    fn try_from(record: SectionRecord) -> Result<Self, Self::Error> {
        let name = match record.section {
            Value::String(name) => name,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(RepositoryError::Mapping(format!(
                    "section name must be a scalar, got {other}"
                )))
            }
        };
        Ok(Section::new(name, record.period, record.metrics))
    }
}

/// In-memory section repository backed by a JSON data file
pub struct JsonFileSectionRepository {
    catalog: SectionCatalog,
}

impl JsonFileSectionRepository {
    /// Read and index the data file at `path`
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the file does not exist,
    /// `RepositoryError::Parse` if it is not valid JSON, and
    /// `RepositoryError::InvalidFormat` if its top level is not an array.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RepositoryError::NotFound(format!(
                    "DATA_PATH not found: {}",
                    path.display()
                )))
            }
            Err(e) => return Err(e.into()),
        };

        let repository = Self::from_json_str(&contents)?;
        tracing::info!(path = %path.display(), sections = repository.catalog.len(), "Section data loaded");
        Ok(repository)
    }

    /// Index sections from the contents of a data file
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Parse` for invalid JSON and
    /// `RepositoryError::InvalidFormat` if the top level is not an array.
    pub fn from_json_str(contents: &str) -> Result<Self, RepositoryError> {
        let Value::Array(entries) = serde_json::from_str::<Value>(contents)? else {
            return Err(RepositoryError::InvalidFormat(
                "Top-level JSON must be a list of section objects.".to_string(),
            ));
        };

        let sections = entries.into_iter().enumerate().filter_map(|(index, entry)| {
            if !entry.is_object() {
                tracing::warn!(index, "Skipping non-object section entry");
                return None;
            }
            let section = serde_json::from_value::<SectionRecord>(entry)
                .map_err(RepositoryError::from)
                .and_then(Section::try_from);
            match section {
                Ok(section) => Some(section),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping malformed section entry");
                    None
                }
            }
        });

        Ok(Self::from_catalog(SectionCatalog::new(sections)))
    }

    #[must_use]
    pub fn from_catalog(catalog: SectionCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl SectionRepository for JsonFileSectionRepository {
    async fn find_by_key(&self, key: &SectionKey) -> Result<Option<Section>, RepositoryError> {
        Ok(self.catalog.get(key).cloned())
    }

    async fn list_keys(&self) -> Result<Vec<SectionKey>, RepositoryError> {
        Ok(self.catalog.keys())
    }
}
