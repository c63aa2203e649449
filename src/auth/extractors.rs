use std::convert::Infallible;

use axum::{
    async_trait,
    body::Body,
    extract::{Form, FromRef, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::Redirect,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::session::{session_token, SessionClaims, SessionKeys};

/// Extracts and verifies the session cookie.
///
/// Pages that need a logged-in user redirect to the login form when the
/// cookie is missing, expired, or forged.
pub struct SessionUser(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let token = session_token(&parts.headers).ok_or_else(|| Redirect::to("/login"))?;
        match keys.verify(&token) {
            Ok(claims) => Ok(SessionUser(claims)),
            Err(_) => {
                warn!("invalid or expired session cookie");
                Err(Redirect::to("/login"))
            }
        }
    }
}

/// Upper bound for auth payload bodies.
const BODY_LIMIT: usize = 64 * 1024;

/// Reads a request body as JSON first, then as an urlencoded form.
///
/// Never rejects: a body that parses as neither comes out as
/// `T::default()`, so missing fields are reported by validation in the
/// caller's chosen rendering mode instead of as a bare 4xx.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let Ok(bytes) = axum::body::to_bytes(body, BODY_LIMIT).await else {
            return Ok(Self(T::default()));
        };

        if let Ok(value) = serde_json::from_slice::<T>(&bytes) {
            return Ok(Self(value));
        }

        let req = Request::from_parts(parts, Body::from(bytes));
        match Form::<T>::from_request(req, &()).await {
            Ok(Form(value)) => Ok(Self(value)),
            Err(_) => Ok(Self(T::default())),
        }
    }
}

#[cfg(test)]
mod json_or_form_tests {
    use super::*;
    use crate::auth::dto::LoginInput;
    use axum::http::header::CONTENT_TYPE;

    async fn extract(req: Request) -> LoginInput {
        let JsonOrForm(input) = JsonOrForm::<LoginInput>::from_request(req, &())
            .await
            .expect("extractor is infallible");
        input
    }

    #[tokio::test]
    async fn json_body_is_parsed() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"a@b.co","password":"pw"}"#))
            .unwrap();
        let input = extract(req).await;
        assert_eq!(input.email, "a@b.co");
        assert_eq!(input.password, "pw");
    }

    #[tokio::test]
    async fn json_is_detected_without_content_type() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from(r#"{"email":"a@b.co","password":"pw"}"#))
            .unwrap();
        assert_eq!(extract(req).await.email, "a@b.co");
    }

    #[tokio::test]
    async fn urlencoded_form_is_parsed() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email=a%40b.co&password=pw"))
            .unwrap();
        let input = extract(req).await;
        assert_eq!(input.email, "a@b.co");
        assert_eq!(input.password, "pw");
    }

    #[tokio::test]
    async fn unparseable_body_falls_back_to_defaults() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("definitely not json"))
            .unwrap();
        let input = extract(req).await;
        assert_eq!(input.email, "");
        assert_eq!(input.password, "");
    }

    #[tokio::test]
    async fn empty_body_yields_empty_fields() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::empty())
            .unwrap();
        let input = extract(req).await;
        assert_eq!(input.email, "");
        assert_eq!(input.password, "");
    }
}

