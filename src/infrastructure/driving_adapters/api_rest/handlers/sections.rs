//! Section Handlers
//!
//! HTTP handlers for the overview, metrics lookup and free-text routing.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::application::use_cases::sections::ResolvedSection;
use crate::infrastructure::driving_adapters::api_rest::dto::section::{
    AskRequestDto, AskResponseDto, MetricsQueryDto, OverviewResponseDto, SectionMetricsDto,
};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::{ApiError, UseCaseError};

const QUERY_HINT: &str = "Try specifying ?section=<one of the keys>.";

/// Create the router for section endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_overview))
        .route("/metrics", get(get_metrics_by_query))
        .route("/metrics/:section_name", get(get_metrics_by_path))
        .route("/ask", post(ask))
}

/// GET / - Greeting plus the default section
///
/// # Responses
///
/// * 200 OK - Overview returned
/// * 404 Not Found - Default section missing from the data set
#[axum::debug_handler]
async fn get_overview(State(state): State<AppState>) -> Result<Json<OverviewResponseDto>, ApiError> {
    let overview = state.get_overview_use_case.execute().await?;

    Ok(Json(OverviewResponseDto::from(overview)))
}

/// GET /metrics - Look a section up by key or by free text
///
/// * `?section=overview_core` - exact key
/// * `?q=overview for the month` - routed through the classifier
///
/// `section` wins when both are given. A repeated parameter uses its first
/// value.
///
/// # Responses
///
/// * 200 OK - Section found
/// * 400 Bad Request - Neither parameter given, or the query could not be resolved
/// * 404 Not Found - Section does not exist
#[axum::debug_handler]
async fn get_metrics_by_query(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<SectionMetricsDto>, ApiError> {
    let query = MetricsQueryDto::from_pairs(params);

    if let Some(section) = query.section() {
        let section = state.get_section_metrics_use_case.execute(section).await?;
        return Ok(Json(SectionMetricsDto::from(section)));
    }

    if let Some(q) = query.query() {
        // A blank query is reported like any other unresolvable one.
        return match state.resolve_section_use_case.execute(q).await {
            Ok(resolved) => Ok(Json(SectionMetricsDto::from(resolved.section))),
            Err(e @ UseCaseError::Unresolved { .. }) => Err(ApiError::with_hint(e, QUERY_HINT)),
            Err(UseCaseError::EmptyQuery) => Err(ApiError::with_hint(
                UseCaseError::Unresolved {
                    available_sections: available_sections(&state).await?,
                },
                QUERY_HINT,
            )),
            Err(other) => Err(other.into()),
        };
    }

    Err(ApiError::MissingSelector {
        available_sections: available_sections(&state).await?,
    })
}

async fn available_sections(state: &AppState) -> Result<Vec<String>, ApiError> {
    Ok(state
        .list_sections_use_case
        .execute()
        .await?
        .into_iter()
        .map(String::from)
        .collect())
}

/// GET /metrics/:section_name - Look a section up by key
///
/// # Responses
///
/// * 200 OK - Section found
/// * 404 Not Found - Section does not exist
#[axum::debug_handler]
async fn get_metrics_by_path(
    State(state): State<AppState>,
    Path(section_name): Path<String>,
) -> Result<Json<SectionMetricsDto>, ApiError> {
    let section = state.get_section_metrics_use_case.execute(&section_name).await?;

    Ok(Json(SectionMetricsDto::from(section)))
}

/// POST /ask - Route a free-text question to a section
///
/// Body: `{ "q": "any free-text label or question" }`. The greeting is
/// included only when the question resolves to the default section.
///
/// # Responses
///
/// * 200 OK - Section resolved
/// * 400 Bad Request - Missing `q`, or the question could not be resolved
#[axum::debug_handler]
async fn ask(State(state): State<AppState>, body: Bytes) -> Result<Json<AskResponseDto>, ApiError> {
    let request = AskRequestDto::from_body(&body);
    if request.q.is_empty() {
        return Err(ApiError::BadRequest("Missing 'q' in JSON body.".to_string()));
    }

    let ResolvedSection { key, section } = state.resolve_section_use_case.execute(&request.q).await?;
    let message = state.get_overview_use_case.greeting_for(&key).map(str::to_string);

    Ok(Json(AskResponseDto {
        message,
        payload: SectionMetricsDto::from(section),
    }))
}
