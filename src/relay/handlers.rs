use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{instrument, warn};

use crate::auth::dto::RegisterInput;
use crate::relay::upstream::UpstreamError;
use crate::response::ApiEnvelope;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/relay/register", post(register))
        .route("/relay/health", get(health))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterInput>,
) -> Response {
    let Some(upstream) = state.relay.as_ref() else {
        return (
            StatusCode::BAD_GATEWAY,
            Json(ApiEnvelope::fail("Relay upstream is not configured")),
        )
            .into_response();
    };

    match upstream.register(&payload).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(err) => {
            warn!(error = %err, "relay forward failed");
            let (status, message) = match err {
                UpstreamError::Timeout => {
                    (StatusCode::GATEWAY_TIMEOUT, "Upstream request timed out")
                }
                UpstreamError::Unreachable(_) => {
                    (StatusCode::BAD_GATEWAY, "Upstream is unreachable")
                }
                UpstreamError::Unrecognized => {
                    (StatusCode::BAD_GATEWAY, "Upstream reply was not recognized")
                }
            };
            (status, Json(ApiEnvelope::fail(message))).into_response()
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    Json(json!({
        "status": "ok",
        "message": "Relay proxy is up",
        "timestamp": timestamp,
    }))
}
