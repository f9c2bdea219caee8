//! Common test utilities for e2e tests
//!
//! Builds the real router over a temporary data file and, when requested, a
//! wiremock server standing in for the LLM API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ai_insights_api::domain::gateways::{SectionClassifier, SectionRepository};
use ai_insights_api::infrastructure::driven_adapters::config::AppConfig;
use ai_insights_api::infrastructure::driven_adapters::section_classifier::OpenAiSectionClassifier;
use ai_insights_api::infrastructure::driven_adapters::section_repository::JsonFileSectionRepository;
use ai_insights_api::infrastructure::driving_adapters::api_rest::{build_router, AppState};

/// Greeting used by every test app
pub const TEST_GREETING: &str = "Hello from the tests";

/// Sections written to the temporary data file
pub fn sample_sections() -> Value {
    json!([
        {
            "section": "overview_core",
            "period": "2024-09",
            "metrics": { "automation_rate": 0.62, "csat": 4.6 }
        },
        {
            "section": "sales_impact",
            "period": { "from": "2024-07-01", "to": "2024-09-30" },
            "metrics": { "pipeline_usd": 1_250_000, "conversions": 48 }
        },
        {
            "section": "roi_quarter",
            "period": "2024-Q3"
        }
    ])
}

/// Build a chat-completions reply whose first choice says `content`
pub fn llm_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    }))
}

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub llm: Option<MockServer>,
    _data_file: NamedTempFile,
}

impl TestApp {
    /// App without LLM routing
    pub async fn new() -> Self {
        Self::spawn(&[], None).await
    }

    /// App whose LLM answers every request with `reply`
    pub async fn with_llm(reply: ResponseTemplate) -> Self {
        Self::spawn(&[], Some(reply)).await
    }

    /// App with extra environment variables
    pub async fn with_env(vars: &[(&str, &str)]) -> Self {
        Self::spawn(vars, None).await
    }

    async fn spawn(vars: &[(&str, &str)], llm_reply: Option<ResponseTemplate>) -> Self {
        let mut data_file = NamedTempFile::new().expect("Failed to create data file");
        data_file
            .write_all(sample_sections().to_string().as_bytes())
            .expect("Failed to write data file");

        let mut env: HashMap<String, String> = HashMap::new();
        env.insert("DATA_PATH".into(), data_file.path().display().to_string());
        env.insert("DEFAULT_GREETING".into(), TEST_GREETING.into());

        let llm = match llm_reply {
            Some(reply) => {
                let server = MockServer::start().await;
                Mock::given(method("POST"))
                    .and(path("/chat/completions"))
                    .respond_with(reply)
                    .mount(&server)
                    .await;
                env.insert("OPENAI_API_KEY".into(), "sk-test".into());
                env.insert("APP__LLM__BASE_URL".into(), server.uri());
                Some(server)
            }
            None => None,
        };

        for (key, value) in vars {
            env.insert((*key).to_string(), (*value).to_string());
        }

        let config = AppConfig::from_env(&env).expect("Failed to build test config");

        let section_repository: Arc<dyn SectionRepository> = Arc::new(
            JsonFileSectionRepository::load(&config.data.path)
                .await
                .expect("Failed to load test data"),
        );

        let classifier: Option<Arc<dyn SectionClassifier>> = if config.llm.enabled() {
            Some(Arc::new(
                OpenAiSectionClassifier::new(&config.llm).expect("Failed to build classifier"),
            ))
        } else {
            None
        };

        let router = build_router(AppState::new(config, section_repository, classifier));

        Self {
            router,
            llm,
            _data_file: data_file,
        }
    }

    /// Send a request through the router
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("Body is not JSON")
        };

        (status, headers, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Value) {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, HeaderMap, Value) {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Failed to build request"),
        )
        .await
    }
}
