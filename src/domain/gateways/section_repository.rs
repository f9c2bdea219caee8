//! Section Repository Gateway
//!
//! Abstract trait defining the contract for section lookups.

use async_trait::async_trait;

use crate::domain::models::section::{Section, SectionKey};
use crate::shared::errors::RepositoryError;

/// Repository trait for read-only section access
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Find a section by its key
    async fn find_by_key(&self, key: &SectionKey) -> Result<Option<Section>, RepositoryError>;

    /// List all section keys, sorted ascending
    async fn list_keys(&self) -> Result<Vec<SectionKey>, RepositoryError>;
}
