//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Section data file
//! - LLM section classifier
//! - Configuration

pub mod config;
pub mod section_classifier;
pub mod section_repository;

pub use config::AppConfig;
pub use section_classifier::OpenAiSectionClassifier;
pub use section_repository::JsonFileSectionRepository;
