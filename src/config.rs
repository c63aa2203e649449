use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    /// Only mark the cookie Secure when serving over HTTPS.
    pub cookie_secure: bool,
}

/// Upstream target for the forwarding relay. Only present when
/// `RELAY_UPSTREAM_URL` is set; without it the relay routes are not mounted.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    pub upstream_url: String,
    pub register_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Shared key that marks a request as API traffic (header or query).
    pub api_key: String,
    /// Name reported by the health check payload.
    pub server_name: String,
    pub request_timeout_secs: u64,
    pub session: SessionConfig,
    pub relay: Option<RelayConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let api_key = std::env::var("API_KEY").context("API_KEY is not set")?;
        let server_name = std::env::var("SERVER_NAME").unwrap_or_else(|_| "authgate".into());
        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(15);

        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET").context("SESSION_SECRET is not set")?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "authgate".into()),
            audience: std::env::var("SESSION_AUDIENCE").unwrap_or_else(|_| "authgate-web".into()),
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24),
            cookie_secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };

        let relay = match std::env::var("RELAY_UPSTREAM_URL") {
            Ok(upstream_url) => Some(RelayConfig {
                upstream_url,
                register_path: std::env::var("RELAY_REGISTER_PATH")
                    .unwrap_or_else(|_| "/register.php".into()),
            }),
            Err(_) => None,
        };

        Ok(Self {
            database_url,
            api_key,
            server_name,
            request_timeout_secs,
            session,
            relay,
        })
    }
}
