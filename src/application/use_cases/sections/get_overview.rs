//! Get Overview Use Case
//!
//! Returns the default section together with the configured greeting.

use std::sync::Arc;

use crate::domain::gateways::SectionRepository;
use crate::domain::models::section::{Section, SectionKey};
use crate::shared::errors::UseCaseError;

use super::key_strings;

/// Greeting plus the default section
#[derive(Debug, Clone)]
pub struct Overview {
    pub greeting: String,
    pub section: Section,
}

/// Use case for the landing overview
pub struct GetOverviewUseCase {
    section_repository: Arc<dyn SectionRepository>,
    default_section: String,
    default_key: SectionKey,
    greeting: String,
}

impl GetOverviewUseCase {
    /// Create a new GetOverviewUseCase
    #[must_use]
    pub fn new(
        section_repository: Arc<dyn SectionRepository>,
        default_section: impl Into<String>,
        greeting: impl Into<String>,
    ) -> Self {
        let default_section = default_section.into();
        Self {
            section_repository,
            default_key: SectionKey::normalize(&default_section),
            default_section,
            greeting: greeting.into(),
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::SectionNotFound` if the default section is
    /// missing from the data set.
    /// Returns `UseCaseError::Repository` if the repository fails.
    pub async fn execute(&self) -> Result<Overview, UseCaseError> {
        tracing::debug!(section = %self.default_key, "Getting overview");

        let Some(section) = self.section_repository.find_by_key(&self.default_key).await? else {
            tracing::warn!(section = %self.default_key, "Default section missing from data set");
            return Err(UseCaseError::SectionNotFound {
                name: self.default_section.clone(),
                available_sections: key_strings(self.section_repository.list_keys().await?),
            });
        };

        Ok(Overview {
            greeting: self.greeting.clone(),
            section,
        })
    }

    /// The greeting, if `key` is the default section
    #[must_use]
    pub fn greeting_for(&self, key: &SectionKey) -> Option<&str> {
        (key == &self.default_key).then_some(self.greeting.as_str())
    }
}
