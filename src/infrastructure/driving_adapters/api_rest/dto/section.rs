//! Section DTOs
//!
//! Data transfer objects for the metrics API endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::use_cases::Overview;
use crate::domain::models::section::Section;

/// Query string for `GET /metrics`
#[derive(Debug, Clone, Default)]
pub struct MetricsQueryDto {
    pub section: Option<String>,
    pub q: Option<String>,
}

impl MetricsQueryDto {
    /// Build from raw query pairs, keeping the first value of each key
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "section" if query.section.is_none() => query.section = Some(value),
                "q" if query.q.is_none() => query.q = Some(value),
                _ => {}
            }
        }
        query
    }

    /// Explicit section name, if given and non-empty
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref().filter(|s| !s.is_empty())
    }

    /// Free-text query, if given and non-empty
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

/// Body for `POST /ask`
#[derive(Debug, Clone, Default)]
pub struct AskRequestDto {
    pub q: String,
}

impl AskRequestDto {
    /// Parse a request body leniently.
    ///
    /// Anything that is not a JSON object counts as an empty body, and a
    /// non-string `q` is rendered to text.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        let q = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(mut fields)) => match fields.remove("q") {
                Some(Value::String(q)) => q,
                None | Some(Value::Null) => String::new(),
                Some(other) => other.to_string(),
            },
            _ => String::new(),
        };
        Self { q: q.trim().to_string() }
    }
}

/// Successful section lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionMetricsDto {
    pub ok: bool,
    pub section: String,
    pub period: Value,
    pub metrics: Value,
}

impl From<Section> for SectionMetricsDto {
    fn from(section: Section) -> Self {
        Self {
            ok: true,
            section: section.name().to_string(),
            period: section.period().clone(),
            metrics: section.metrics().clone(),
        }
    }
}

/// Landing response for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponseDto {
    pub message: String,
    pub section: String,
    pub period: Value,
    pub metrics: Value,
}

impl From<Overview> for OverviewResponseDto {
    fn from(overview: Overview) -> Self {
        Self {
            message: overview.greeting,
            section: overview.section.name().to_string(),
            period: overview.section.period().clone(),
            metrics: overview.section.metrics().clone(),
        }
    }
}

/// Response for `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: SectionMetricsDto,
}

/// Response for `GET /healthz`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponseDto {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ask_body_reads_string_q() {
        assert_eq!(AskRequestDto::from_body(br#"{"q": "  sales? "}"#).q, "sales?");
    }

    #[test]
    fn ask_body_tolerates_garbage() {
        assert_eq!(AskRequestDto::from_body(b"not json").q, "");
        assert_eq!(AskRequestDto::from_body(b"[1, 2]").q, "");
        assert_eq!(AskRequestDto::from_body(b"").q, "");
        assert_eq!(AskRequestDto::from_body(br#"{"q": null}"#).q, "");
    }

    #[test]
    fn ask_body_stringifies_scalars() {
        assert_eq!(AskRequestDto::from_body(br#"{"q": 42}"#).q, "42");
    }

    #[test]
    fn metrics_query_keeps_first_repeated_value() {
        let query = MetricsQueryDto::from_pairs(vec![
            ("section".to_string(), "overview_core".to_string()),
            ("q".to_string(), "sales".to_string()),
            ("section".to_string(), "roi_quarter".to_string()),
            ("other".to_string(), "ignored".to_string()),
        ]);

        assert_eq!(query.section(), Some("overview_core"));
        assert_eq!(query.query(), Some("sales"));
    }

    #[test]
    fn metrics_query_ignores_empty_values() {
        let query = MetricsQueryDto {
            section: Some(String::new()),
            q: Some("overview".to_string()),
        };

        assert_eq!(query.section(), None);
        assert_eq!(query.query(), Some("overview"));
    }

    #[test]
    fn ask_response_omits_missing_message() {
        let dto = AskResponseDto {
            message: None,
            payload: SectionMetricsDto::from(Section::new("roi_annual", json!("FY24"), json!({}))),
        };

        let value = serde_json::to_value(dto).unwrap();

        assert_eq!(value, json!({ "ok": true, "section": "roi_annual", "period": "FY24", "metrics": {} }));
    }
}
