//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driven adapters in the infrastructure layer.

pub mod section_classifier;
pub mod section_repository;

pub use section_classifier::SectionClassifier;
pub use section_repository::SectionRepository;
