use axum::http::HeaderMap;
use std::collections::HashMap;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const API_KEY_PARAM: &str = "key";

/// How a request wants its outcome rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// JSON envelope with mapped status codes.
    Api,
    /// HTML pages and redirects.
    Web,
}

impl RequestMode {
    /// Classify a request as API or web traffic.
    ///
    /// Checked in order: `X-API-KEY` header equal to the configured key,
    /// then a `key` query parameter equal to it, then a mobile client
    /// signature (`Flutter`/`Dart` in the user agent, or
    /// `X-Requested-With: flutter-app`). Anything else is a browser.
    pub fn classify(headers: &HeaderMap, query: &HashMap<String, String>, api_key: &str) -> Self {
        let header_key = headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !api_key.is_empty() && header_key == api_key {
            return Self::Api;
        }

        if !api_key.is_empty() && query.get(API_KEY_PARAM).is_some_and(|v| v == api_key) {
            return Self::Api;
        }

        let user_agent = headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if user_agent.contains("Flutter") || user_agent.contains("Dart") {
            return Self::Api;
        }

        let requested_with = headers
            .get("x-requested-with")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if requested_with == "flutter-app" {
            return Self::Api;
        }

        Self::Web
    }
}
