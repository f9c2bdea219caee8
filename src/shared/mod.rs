//! Shared Module
//!
//! Cross-cutting utilities and types used across the application.

pub mod errors;
pub mod telemetry;

pub use errors::{ApiError, ClassifierError, RepositoryError, UseCaseError};
