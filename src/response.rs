use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::macros::format_description;
use time::OffsetDateTime;

/// Envelope for every API-mode JSON response.
///
/// `data` is only present on successes that carry a payload; failures
/// serialize as `{"success": false, "message": "..."}` with no data key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Value>,
}

impl ApiEnvelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn ok_with(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Health check payload, timestamp in `Y-m-d H:i:s` form (UTC).
    pub fn health(server: &str) -> Self {
        let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        let timestamp = OffsetDateTime::now_utc().format(&fmt).unwrap_or_default();
        Self::ok_with(
            "API functioning",
            serde_json::json!({ "timestamp": timestamp, "server": server }),
        )
    }
}
