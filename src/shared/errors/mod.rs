//! Error Types
//!
//! Layered error types with HTTP status code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Repository-level errors for data access failures
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    NotFound(String),

    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse data file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("Data mapping error: {0}")]
    Mapping(String),
}

/// Errors raised by a section classifier
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Classifier returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Classifier returned an empty reply")]
    EmptyReply,

    #[error("Classifier misconfigured: {0}")]
    Configuration(String),
}

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Section '{name}' not found.")]
    SectionNotFound {
        name: String,
        available_sections: Vec<String>,
    },

    #[error("Could not infer a section from your query.")]
    Unresolved { available_sections: Vec<String> },

    #[error("Query must not be empty.")]
    EmptyQuery,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl UseCaseError {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::SectionNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unresolved { .. } | Self::EmptyQuery => StatusCode::BAD_REQUEST,
            Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Section keys a client may retry with, when relevant to the error
    #[must_use]
    pub fn available_sections(&self) -> Option<&[String]> {
        match self {
            Self::SectionNotFound {
                available_sections, ..
            }
            | Self::Unresolved { available_sections } => Some(available_sections),
            Self::EmptyQuery | Self::Repository(_) => None,
        }
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("{source}")]
    Hinted { source: UseCaseError, hint: String },

    #[error("Provide either ?section=<key> or ?q=<free-text>")]
    MissingSelector { available_sections: Vec<String> },

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Attach a client-facing hint to a use case error
    #[must_use]
    pub fn with_hint(source: UseCaseError, hint: impl Into<String>) -> Self {
        Self::Hinted {
            source,
            hint: hint.into(),
        }
    }
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_sections: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, available_sections, hint) = match &self {
            ApiError::UseCase(UseCaseError::Repository(err)) => {
                tracing::error!(error = %err, "Repository failure while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                    None,
                    None,
                )
            }
            ApiError::UseCase(uc_error) => (
                uc_error.status_code(),
                uc_error.to_string(),
                uc_error.available_sections().map(<[String]>::to_vec),
                None,
            ),
            ApiError::Hinted { source, hint } => (
                source.status_code(),
                source.to_string(),
                source.available_sections().map(<[String]>::to_vec),
                Some(hint.clone()),
            ),
            ApiError::MissingSelector { available_sections } => (
                StatusCode::BAD_REQUEST,
                self.to_string(),
                Some(available_sections.clone()),
                None,
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None, None),
        };

        let body = ErrorResponse {
            ok: false,
            error,
            available_sections,
            hint,
        };

        (status, Json(body)).into_response()
    }
}
