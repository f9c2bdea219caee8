//! REST API Module
//!
//! Contains HTTP handlers, DTOs, and middleware for the REST API.

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::application::use_cases::sections::{
    GetOverviewUseCase, GetSectionMetricsUseCase, ListSectionsUseCase, ResolveSectionUseCase,
};
use crate::domain::gateways::{SectionClassifier, SectionRepository};
use crate::infrastructure::driven_adapters::config::AppConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub list_sections_use_case: Arc<ListSectionsUseCase>,
    pub get_section_metrics_use_case: Arc<GetSectionMetricsUseCase>,
    pub get_overview_use_case: Arc<GetOverviewUseCase>,
    pub resolve_section_use_case: Arc<ResolveSectionUseCase>,
}

impl AppState {
    /// Wire every use case over the given gateways
    #[must_use]
    pub fn new(
        config: AppConfig,
        section_repository: Arc<dyn SectionRepository>,
        classifier: Option<Arc<dyn SectionClassifier>>,
    ) -> Self {
        let get_overview_use_case = Arc::new(GetOverviewUseCase::new(
            section_repository.clone(),
            config.data.default_section.clone(),
            config.data.greeting.clone(),
        ));

        Self {
            list_sections_use_case: Arc::new(ListSectionsUseCase::new(section_repository.clone())),
            get_section_metrics_use_case: Arc::new(GetSectionMetricsUseCase::new(section_repository.clone())),
            get_overview_use_case,
            resolve_section_use_case: Arc::new(ResolveSectionUseCase::new(section_repository, classifier)),
            config: Arc::new(config),
        }
    }
}

/// Build the complete application router with its middleware stack
///
/// The request id layer is outermost so responses the CORS layer produces
/// on its own (preflights) carry an id too.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.config.cors);

    Router::new()
        .merge(handlers::sections::router())
        .merge(handlers::health::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .with_state(state)
}
