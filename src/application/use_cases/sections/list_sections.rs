//! List Sections Use Case
//!
//! Retrieves every known section key, sorted.

use std::sync::Arc;

use crate::domain::gateways::SectionRepository;
use crate::domain::models::section::SectionKey;
use crate::shared::errors::UseCaseError;

/// Use case for listing available section keys
pub struct ListSectionsUseCase {
    section_repository: Arc<dyn SectionRepository>,
}

impl ListSectionsUseCase {
    /// Create a new ListSectionsUseCase
    #[must_use]
    pub fn new(section_repository: Arc<dyn SectionRepository>) -> Self {
        Self { section_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if the repository fails.
    pub async fn execute(&self) -> Result<Vec<SectionKey>, UseCaseError> {
        let keys = self.section_repository.list_keys().await?;

        tracing::debug!(count = keys.len(), "Listed sections");
        Ok(keys)
    }
}
