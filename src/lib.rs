//! AI Insights Metrics API
//!
//! A Rust-based microservice serving pre-computed insight sections, with
//! optional LLM routing of free-text questions, following Clean/Hexagonal
//! Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
