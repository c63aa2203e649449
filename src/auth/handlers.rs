use std::collections::HashMap;

use axum::{
    extract::{FromRef, Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    auth::{
        dto::{LoginInput, PublicUser, RegisterInput},
        extractors::JsonOrForm,
        repo::User,
        services,
        session::SessionKeys,
    },
    error::AuthError,
    mode::RequestMode,
    response::ApiEnvelope,
    state::AppState,
    web::views,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
}

#[instrument(skip(state, headers, query, payload))]
async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    JsonOrForm(payload): JsonOrForm<RegisterInput>,
) -> Response {
    if query.contains_key("test") {
        return health(&state);
    }

    let mode = RequestMode::classify(&headers, &query, &state.config.api_key);
    let name = payload.name.trim().to_string();
    let email = payload.email.trim().to_lowercase();

    match services::register(state.users.as_ref(), payload).await {
        Ok(_) => match mode {
            RequestMode::Api => {
                Json(ApiEnvelope::ok("Registration completed")).into_response()
            }
            RequestMode::Web => Redirect::to("/login?registered=true").into_response(),
        },
        Err(err) => match mode {
            RequestMode::Api => api_failure(&err),
            RequestMode::Web => {
                web_failure(&err, views::register_page(&err.messages(), &name, &email))
            }
        },
    }
}

#[instrument(skip(state, headers, query, payload))]
async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    JsonOrForm(payload): JsonOrForm<LoginInput>,
) -> Response {
    if query.contains_key("test") {
        return health(&state);
    }

    let mode = RequestMode::classify(&headers, &query, &state.config.api_key);
    let email = payload.email.trim().to_lowercase();

    match services::login(state.users.as_ref(), payload).await {
        Ok(user) => match mode {
            RequestMode::Api => Json(ApiEnvelope::ok_with(
                "Login successful",
                serde_json::json!({
                    "user": PublicUser {
                        id: user.id,
                        name: user.name,
                        email: user.email,
                    }
                }),
            ))
            .into_response(),
            RequestMode::Web => match start_session(&state, &user) {
                Ok(cookie) => ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response(),
                Err(e) => {
                    error!(error = %e, "session cookie mint failed");
                    let err = AuthError::Infra(e);
                    web_failure(&err, views::login_page(&err.messages(), &email, false))
                }
            },
        },
        Err(err) => match mode {
            RequestMode::Api => api_failure(&err),
            RequestMode::Web => {
                web_failure(&err, views::login_page(&err.messages(), &email, false))
            }
        },
    }
}

#[instrument(skip(state, query))]
async fn register_form(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if query.contains_key("test") {
        return health(&state);
    }
    Html(views::register_page(&[], "", "")).into_response()
}

#[instrument(skip(state, query))]
async fn login_form(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if query.contains_key("test") {
        return health(&state);
    }
    let registered = query.get("registered").is_some_and(|v| v == "true");
    Html(views::login_page(&[], "", registered)).into_response()
}

/// Health payload for `?test` checks; never touches the store.
fn health(state: &AppState) -> Response {
    Json(ApiEnvelope::health(&state.config.server_name)).into_response()
}

fn api_failure(err: &AuthError) -> Response {
    (err.status(), Json(ApiEnvelope::fail(err.message()))).into_response()
}

/// Recoverable failures re-render the page as a plain 200; infrastructure
/// failures keep their 5xx status in web mode too.
fn web_failure(err: &AuthError, page: String) -> Response {
    if matches!(err, AuthError::Infra(_)) {
        (err.status(), Html(page)).into_response()
    } else {
        Html(page).into_response()
    }
}

fn start_session(state: &AppState, user: &User) -> anyhow::Result<axum::http::HeaderValue> {
    let keys = SessionKeys::from_ref(state);
    let token = keys.sign(user)?;
    Ok(keys.cookie(&token)?)
}
