//! Resolve Section Use Case
//!
//! Routes a free-text question to a section through the optional classifier.

use std::sync::Arc;

use crate::domain::gateways::{SectionClassifier, SectionRepository};
use crate::domain::models::section::{Section, SectionKey};
use crate::shared::errors::UseCaseError;

use super::key_strings;

/// A section chosen for a free-text query
#[derive(Debug, Clone)]
pub struct ResolvedSection {
    pub key: SectionKey,
    pub section: Section,
}

/// Use case for resolving a free-text query into a section
pub struct ResolveSectionUseCase {
    section_repository: Arc<dyn SectionRepository>,
    classifier: Option<Arc<dyn SectionClassifier>>,
}

impl ResolveSectionUseCase {
    /// Create a new ResolveSectionUseCase
    ///
    /// Without a classifier every query is unresolvable.
    #[must_use]
    pub fn new(
        section_repository: Arc<dyn SectionRepository>,
        classifier: Option<Arc<dyn SectionClassifier>>,
    ) -> Self {
        Self {
            section_repository,
            classifier,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::EmptyQuery` for a blank query.
    /// Returns `UseCaseError::Unresolved` when no classifier is configured,
    /// the classifier fails, or it picks nothing.
    /// Returns `UseCaseError::SectionNotFound` if the chosen key has no section.
    /// Returns `UseCaseError::Repository` if the repository fails.
    pub async fn execute(&self, query: &str) -> Result<ResolvedSection, UseCaseError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(UseCaseError::EmptyQuery);
        }

        let candidates = self.section_repository.list_keys().await?;

        let Some(classifier) = &self.classifier else {
            tracing::debug!("No section classifier configured");
            return Err(UseCaseError::Unresolved {
                available_sections: key_strings(candidates),
            });
        };

        let chosen = match classifier.classify(query, &candidates).await {
            Ok(Some(key)) if candidates.contains(&key) => key,
            Ok(_) => {
                tracing::debug!("Classifier did not pick a known section");
                return Err(UseCaseError::Unresolved {
                    available_sections: key_strings(candidates),
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "Section classifier failed");
                return Err(UseCaseError::Unresolved {
                    available_sections: key_strings(candidates),
                });
            }
        };

        tracing::debug!(section = %chosen, "Query resolved to section");

        let section = self
            .section_repository
            .find_by_key(&chosen)
            .await?
            .ok_or_else(|| UseCaseError::SectionNotFound {
                name: chosen.to_string(),
                available_sections: key_strings(candidates),
            })?;

        Ok(ResolvedSection { key: chosen, section })
    }
}
