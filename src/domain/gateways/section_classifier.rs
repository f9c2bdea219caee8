//! Section Classifier Gateway
//!
//! Maps a free-text question onto one of a fixed set of section keys.

use async_trait::async_trait;

use crate::domain::models::section::SectionKey;
use crate::shared::errors::ClassifierError;

#[async_trait]
pub trait SectionClassifier: Send + Sync {
    /// Pick the candidate that best matches `query`.
    ///
    /// Implementations must only ever return a key contained in `candidates`.
    /// `Ok(None)` means the classifier answered but nothing matched.
    async fn classify(
        &self,
        query: &str,
        candidates: &[SectionKey],
    ) -> Result<Option<SectionKey>, ClassifierError>;
}
