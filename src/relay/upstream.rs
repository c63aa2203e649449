//! HTTP client for the registration relay.
//!
//! The upstream sets anti-bot cookies on its landing page, so every
//! forward is a two-step chain: prime a cookie jar with a GET, then
//! POST the payload with those cookies attached.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::auth::dto::RegisterInput;
use crate::config::RelayConfig;
use crate::response::ApiEnvelope;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Desktop browser identity for upstreams that gate on User-Agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.159 Safari/537.36";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream timed out")]
    Timeout,
    #[error("upstream unreachable: {0}")]
    Unreachable(reqwest::Error),
    #[error("upstream reply did not match the expected envelope")]
    Unrecognized,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Unreachable(err)
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    base_url: String,
    register_path: String,
}

impl UpstreamClient {
    pub fn new(cfg: &RelayConfig) -> Self {
        let base_url = cfg.upstream_url.trim_end_matches('/').to_string();
        let register_path = if cfg.register_path.starts_with('/') {
            cfg.register_path.clone()
        } else {
            format!("/{}", cfg.register_path)
        };
        Self {
            base_url,
            register_path,
        }
    }

    fn register_url(&self) -> String {
        format!("{}{}", self.base_url, self.register_path)
    }

    /// One client per forward so upstream session cookies never leak
    /// between callers.
    fn client(&self) -> Result<Client, UpstreamError> {
        Ok(Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .cookie_store(true)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?)
    }

    /// Forwards a registration payload and returns the upstream envelope.
    ///
    /// Anything the upstream sends back that does not parse as the
    /// `{success, message, data?}` envelope is reported as
    /// [`UpstreamError::Unrecognized`] rather than guessed at.
    #[instrument(skip(self, payload))]
    pub async fn register(&self, payload: &RegisterInput) -> Result<ApiEnvelope, UpstreamError> {
        let client = self.client()?;

        let warmup = client.get(&self.base_url).send().await?;
        debug!(status = %warmup.status(), "upstream cookie warmup");

        let response = client
            .post(self.register_url())
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<ApiEnvelope>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(err) => {
                warn!(status = %status, error = %err, "unrecognized upstream reply");
                Err(UpstreamError::Unrecognized)
            }
        }
    }
}
