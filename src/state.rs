use std::time::Duration;

use crate::config::Config;
use crate::pipeline::ConversationHistory;
use crate::retry::RetryPolicy;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub retry: RetryPolicy,
    pub history: ConversationHistory,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        // Client-level timeouts bound every outbound call; without them a
        // stalled provider holds the request open indefinitely.
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let retry = RetryPolicy::from_config(&config.retry);
        let history = ConversationHistory::new(config.history_cap);

        Ok(Self {
            config,
            http_client,
            retry,
            history,
        })
    }
}
