//! Get Section Metrics Use Case
//!
//! Looks a section up by a user-supplied name.

use std::sync::Arc;

use crate::domain::gateways::SectionRepository;
use crate::domain::models::section::{Section, SectionKey};
use crate::shared::errors::UseCaseError;

use super::key_strings;

/// Use case for getting a single section's metrics
pub struct GetSectionMetricsUseCase {
    section_repository: Arc<dyn SectionRepository>,
}

impl GetSectionMetricsUseCase {
    /// Create a new GetSectionMetricsUseCase
    #[must_use]
    pub fn new(section_repository: Arc<dyn SectionRepository>) -> Self {
        Self { section_repository }
    }

    /// Execute the use case
    ///
    /// `name` is normalized before lookup, so `Overview-Core` finds
    /// `overview_core`.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::SectionNotFound` (carrying the available keys)
    /// if no section matches.
    /// Returns `UseCaseError::Repository` if the repository fails.
    pub async fn execute(&self, name: &str) -> Result<Section, UseCaseError> {
        let key = SectionKey::normalize(name);
        tracing::debug!(section = %key, "Getting section metrics");

        match self.section_repository.find_by_key(&key).await? {
            Some(section) => Ok(section),
            None => {
                tracing::warn!(requested = name, "Section not found");
                let available_sections = key_strings(self.section_repository.list_keys().await?);
                Err(UseCaseError::SectionNotFound {
                    name: name.to_string(),
                    available_sections,
                })
            }
        }
    }
}
