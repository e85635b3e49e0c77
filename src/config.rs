use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Completion + embedding provider configuration
    pub llm: LlmConfig,
    /// Document index configuration
    pub search: SearchConfig,
    /// Backoff applied to every outbound capability call
    pub retry: RetryConfig,
    /// Number of documents retrieved per question
    pub top_k: usize,
    /// Maximum messages kept in the conversation history
    pub history_cap: usize,
    /// Rewrite questions for spelling/grammar before retrieval
    pub rewrite_questions: bool,
    /// Synthesize a grounded answer from the retrieved documents
    pub synthesize_answers: bool,
    /// Connect timeout for outbound calls, seconds
    pub connect_timeout_secs: u64,
    /// Per-request timeout for outbound calls, seconds
    pub request_timeout_secs: u64,
}

/// Completion and embedding deployments behind one provider endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the provider (e.g. "https://myresource.openai.azure.com")
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    /// Deployment used for question rewriting and answer synthesis
    pub completion_deployment: String,
    /// Deployment used for embeddings
    pub embedding_deployment: String,
    /// Token budget per completion call
    pub max_completion_tokens: u32,
}

/// Remote hybrid search index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: String,
    pub index_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_secs: f64,
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay_secs: 1.0,
            multiplier: 2.0,
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Provider settings are required and missing ones fail startup;
    /// tunables fall back to defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let llm = LlmConfig {
            endpoint: required("AZURE_OPENAI_ENDPOINT")?,
            api_key: required("AZURE_OPENAI_API_KEY")?,
            api_version: required("AZURE_OPENAI_API_VERSION")?,
            completion_deployment: required("AZURE_OPENAI_DEPLOYMENT_NAME")?,
            embedding_deployment: required("AZURE_EMBEDDINGS_DEPLOYMENT_NAME")?,
            max_completion_tokens: parsed("VRAAGBAAK_MAX_COMPLETION_TOKENS")?.unwrap_or(256),
        };

        let search = SearchConfig {
            endpoint: required("AZURE_AI_SEARCH_ENDPOINT")?,
            api_key: required("AZURE_AI_SEARCH_API_KEY")?,
            index_name: required("AZURE_AI_SEARCH_INDEX_NAME")?,
        };

        let defaults = RetryConfig::default();
        let retry = RetryConfig {
            max_attempts: parsed("VRAAGBAAK_RETRY_MAX_ATTEMPTS")?.unwrap_or(defaults.max_attempts),
            initial_delay_secs: parsed("VRAAGBAAK_RETRY_INITIAL_DELAY_SECS")?
                .unwrap_or(defaults.initial_delay_secs),
            multiplier: parsed("VRAAGBAAK_RETRY_MULTIPLIER")?.unwrap_or(defaults.multiplier),
        };

        let config = Self {
            bind_addr: optional("VRAAGBAAK_BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".into()),
            llm,
            search,
            retry,
            top_k: parsed("VRAAGBAAK_TOP_K")?.unwrap_or(3),
            history_cap: parsed("VRAAGBAAK_HISTORY_CAP")?.unwrap_or(50),
            rewrite_questions: parsed("VRAAGBAAK_REWRITE_QUESTIONS")?.unwrap_or(false),
            synthesize_answers: parsed("VRAAGBAAK_SYNTHESIZE_ANSWERS")?.unwrap_or(false),
            connect_timeout_secs: parsed("VRAAGBAAK_CONNECT_TIMEOUT_SECS")?.unwrap_or(10),
            request_timeout_secs: parsed("VRAAGBAAK_REQUEST_TIMEOUT_SECS")?.unwrap_or(60),
        };

        if config.top_k == 0 {
            return Err(ConfigError::InvalidVar {
                name: "VRAAGBAAK_TOP_K",
                value: "0".into(),
            });
        }
        if config.retry.multiplier <= 1.0 {
            return Err(ConfigError::InvalidVar {
                name: "VRAAGBAAK_RETRY_MULTIPLIER",
                value: config.retry.multiplier.to_string(),
            });
        }
        if config.retry.initial_delay_secs <= 0.0 {
            return Err(ConfigError::InvalidVar {
                name: "VRAAGBAAK_RETRY_INITIAL_DELAY_SECS",
                value: config.retry.initial_delay_secs.to_string(),
            });
        }

        Ok(config)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match optional(name) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { name, value }),
    }
}
