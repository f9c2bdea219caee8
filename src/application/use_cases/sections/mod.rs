//! Section Use Cases
//!
//! Lookup and routing logic for insight sections.

mod get_overview;
mod get_section_metrics;
mod list_sections;
mod resolve_section;

pub use get_overview::{GetOverviewUseCase, Overview};
pub use get_section_metrics::GetSectionMetricsUseCase;
pub use list_sections::ListSectionsUseCase;
pub use resolve_section::{ResolveSectionUseCase, ResolvedSection};

use crate::domain::models::section::SectionKey;

fn key_strings(keys: Vec<SectionKey>) -> Vec<String> {
    keys.into_iter().map(String::from).collect()
}
