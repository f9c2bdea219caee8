//! Use Cases
//!
//! Application-specific business rules.
//! Each use case is a single-purpose struct with an execute() method.

pub mod sections;

pub use sections::{
    GetOverviewUseCase, GetSectionMetricsUseCase, ListSectionsUseCase, Overview, ResolveSectionUseCase,
    ResolvedSection,
};
