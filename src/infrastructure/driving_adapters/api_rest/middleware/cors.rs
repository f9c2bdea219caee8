//! CORS Policy
//!
//! Restricts browser access to the configured frontend origins.

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::infrastructure::driven_adapters::config::CorsConfig;

/// Build the CORS layer for the configured origins
///
/// Any method and header is allowed; credentials are not. Origins that are
/// not valid header values are skipped. A trailing `/` is dropped since
/// browsers never send one in `Origin`.
#[must_use]
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
