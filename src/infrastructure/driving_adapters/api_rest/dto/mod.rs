//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API.

pub mod section;

pub use section::{
    AskRequestDto, AskResponseDto, HealthResponseDto, MetricsQueryDto, OverviewResponseDto, SectionMetricsDto,
};
