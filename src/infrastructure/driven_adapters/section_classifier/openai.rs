//! OpenAI Section Classifier
//!
//! Asks an OpenAI-compatible chat-completions endpoint to pick one section key
//! for a free-text question.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::gateways::SectionClassifier;
use crate::domain::models::section::SectionKey;
use crate::infrastructure::driven_adapters::config::LlmConfig;
use crate::shared::errors::ClassifierError;

const SYSTEM_PROMPT: &str = "You select exactly one canonical section key from a fixed list. \
Return ONLY the key, nothing else. If unsure, pick the closest.";

const MAX_REPLY_TOKENS: u32 = 10;

/// Short descriptions shown to the model next to each known key
static SECTION_DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("overview_core", "Overall KPIs across the program"),
        ("human_engagement_trends", "Human feedback, escalations, reviews"),
        ("agent_learning_progress", "Learning, models improving, training velocity"),
        ("operations_impact", "Ops metrics and efficiency"),
        ("roi_quarter", "Return on investment (quarterly)"),
        ("roi_annual", "Return on investment (annual)"),
        ("sales_impact", "Sales impact, revenue, pipeline, conversions"),
    ])
});

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Render the user message listing every candidate with its description
fn build_user_prompt(query: &str, candidates: &[SectionKey]) -> String {
    let listing = candidates
        .iter()
        .map(|key| {
            let description = SECTION_DESCRIPTIONS.get(key.as_str()).copied().unwrap_or("No desc");
            format!("- {key}: {description}")
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "User question/label: {query}\n\n\
         Choose one of these keys that best matches the user's intent:\n{listing}\n\n\
         Return ONLY the key."
    )
}

/// Chat-completions backed implementation of SectionClassifier
pub struct OpenAiSectionClassifier {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Zeroizing<String>,
}

impl OpenAiSectionClassifier {
    /// Build a classifier from configuration
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::Configuration` if no API key is set, and
    /// `ClassifierError::Http` if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, ClassifierError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ClassifierError::Configuration("LLM API key is not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: Zeroizing::new(api_key.to_string()),
        })
    }
}

#[async_trait]
impl SectionClassifier for OpenAiSectionClassifier {
    async fn classify(
        &self,
        query: &str,
        candidates: &[SectionKey],
    ) -> Result<Option<SectionKey>, ClassifierError> {
        let user_prompt = build_user_prompt(query, candidates);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: 0.0,
            max_tokens: MAX_REPLY_TOKENS,
        };

        tracing::debug!(model = %self.model, candidates = candidates.len(), "Requesting section classification");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response.json().await?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ClassifierError::EmptyReply)?;

        let key = SectionKey::normalize(&content);
        if candidates.contains(&key) {
            Ok(Some(key))
        } else {
            tracing::debug!(reply = %content, "Classifier reply is not a candidate key");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: String) -> LlmConfig {
        LlmConfig {
            api_key: Some("sk-test".to_string()),
            model: "gpt-4o-mini".to_string(),
            base_url,
            timeout_secs: 5,
        }
    }

    fn candidates() -> Vec<SectionKey> {
        vec![SectionKey::normalize("overview_core"), SectionKey::normalize("sales_impact")]
    }

    fn reply(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
        }))
    }

    #[test]
    fn user_prompt_lists_candidates_with_descriptions() {
        let prompt = build_user_prompt(
            "how are sales?",
            &[SectionKey::normalize("sales_impact"), SectionKey::normalize("custom_thing")],
        );

        assert!(prompt.starts_with("User question/label: how are sales?"));
        assert!(prompt.contains("- sales_impact: Sales impact, revenue, pipeline, conversions"));
        assert!(prompt.contains("- custom_thing: No desc"));
    }

    #[test]
    fn new_requires_api_key() {
        let mut cfg = config("http://localhost".to_string());
        cfg.api_key = Some("   ".to_string());

        assert!(matches!(
            OpenAiSectionClassifier::new(&cfg),
            Err(ClassifierError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn returns_normalized_candidate_from_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({ "model": "gpt-4o-mini", "max_tokens": 10 })))
            .respond_with(reply("  Sales-Impact\n"))
            .expect(1)
            .mount(&server)
            .await;

        let classifier = OpenAiSectionClassifier::new(&config(server.uri())).unwrap();
        let result = classifier.classify("revenue this quarter", &candidates()).await.unwrap();

        assert_eq!(result, Some(SectionKey::normalize("sales_impact")));
    }

    #[tokio::test]
    async fn returns_none_for_unknown_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(reply("weather_report"))
            .mount(&server)
            .await;

        let classifier = OpenAiSectionClassifier::new(&config(server.uri())).unwrap();
        let result = classifier.classify("is it raining", &candidates()).await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn surfaces_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let classifier = OpenAiSectionClassifier::new(&config(server.uri())).unwrap();
        let result = classifier.classify("overview", &candidates()).await;

        assert!(matches!(result, Err(ClassifierError::Status { status: 401, .. })));
    }

    #[tokio::test]
    async fn empty_choices_are_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let classifier = OpenAiSectionClassifier::new(&config(format!("{}/", server.uri()))).unwrap();
        let result = classifier.classify("overview", &candidates()).await;

        assert!(matches!(result, Err(ClassifierError::EmptyReply)));
    }
}
