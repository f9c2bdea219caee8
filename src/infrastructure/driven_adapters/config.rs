//! Application Configuration
//!
//! Loads configuration from built-in defaults, files and environment variables.

use std::collections::HashMap;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Greeting shown alongside the overview section
pub const DEFAULT_GREETING: &str = "Hi Alisha, here\u{2019}s an updated overview on all insights. \
Let me know if there\u{2019}s anything else on your mind.";

/// Dedicated environment variables and the config keys they override.
///
/// These win over `APP__*` variables.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("DATA_PATH", "data.path"),
    ("DEFAULT_SECTION", "data.default_section"),
    ("DEFAULT_GREETING", "data.greeting"),
    ("OPENAI_API_KEY", "llm.api_key"),
    ("OPENAI_MODEL", "llm.model"),
];

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Async runtime worker threads
    pub workers: usize,
}

/// Section data configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub path: String,
    pub default_section: String,
    pub greeting: String,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// LLM classifier configuration
#[derive(Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Whether an API key is present, enabling free-text routing
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub filter: String,
    pub json: bool,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub cors: CorsConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(&std::env::vars().collect())
    }

    /// Load configuration from files and the given environment map
    pub fn from_env(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let run_mode = vars.get("RUN_MODE").map_or("default", String::as_str);

        let mut builder = Config::builder()
            // Built-in defaults so the service starts without any config file
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", 2)?
            .set_default("data.path", "data/ai_insights_sections.json")?
            .set_default("data.default_section", "overview_core")?
            .set_default("data.greeting", DEFAULT_GREETING)?
            .set_default(
                "cors.allowed_origins",
                vec![
                    "http://localhost:5173",
                    "http://127.0.0.1:5173",
                    "https://metric-quest-ai.vercel.app",
                ],
            )?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.timeout_secs", 15)?
            .set_default("logging.filter", "ai_insights_api=info,tower_http=info")?
            .set_default("logging.json", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__SERVER__PORT)
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            );

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, vars.get(*var).cloned())?;
        }

        builder.build()?.try_deserialize()
    }

    /// Socket address string the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::from_env(&env(&[])).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server.workers, 2);
        assert_eq!(config.data.path, "data/ai_insights_sections.json");
        assert_eq!(config.data.default_section, "overview_core");
        assert_eq!(config.data.greeting, DEFAULT_GREETING);
        assert_eq!(config.cors.allowed_origins.len(), 3);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(!config.llm.enabled());
    }

    #[test]
    fn port_variable_overrides_default() {
        let config = AppConfig::from_env(&env(&[("PORT", "9090")])).unwrap();

        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn dedicated_variables_win_over_prefixed_ones() {
        let config = AppConfig::from_env(&env(&[
            ("APP__SERVER__PORT", "7000"),
            ("PORT", "7001"),
            ("APP__DATA__PATH", "/srv/a.json"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 7001);
        assert_eq!(config.data.path, "/srv/a.json");
    }

    #[test]
    fn openai_variables_enable_classifier() {
        let config = AppConfig::from_env(&env(&[("OPENAI_API_KEY", "sk-test"), ("OPENAI_MODEL", "gpt-test")])).unwrap();

        assert!(config.llm.enabled());
        assert_eq!(config.llm.model, "gpt-test");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = AppConfig::from_env(&env(&[("OPENAI_API_KEY", "sk-very-secret")])).unwrap();

        let rendered = format!("{config:?}");

        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn allowed_origins_parse_from_comma_separated_variable() {
        let config = AppConfig::from_env(&env(&[(
            "APP__CORS__ALLOWED_ORIGINS",
            "https://a.example,https://b.example",
        )]))
        .unwrap();

        assert_eq!(config.cors.allowed_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = AppConfig::from_env(&env(&[("PORT", "not-a-port")]));

        assert!(result.is_err());
    }
}
