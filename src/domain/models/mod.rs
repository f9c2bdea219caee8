//! Domain Models

pub mod section;

pub use section::{Section, SectionCatalog, SectionKey};
