use axum::{response::Html, routing::get, Router};

use crate::auth::extractors::SessionUser;
use crate::state::AppState;

pub mod views;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(landing))
}

async fn landing(SessionUser(claims): SessionUser) -> Html<String> {
    Html(views::landing_page(&claims.name, &claims.email))
}

#[cfg(test)]
mod landing_tests {
    use super::*;
    use crate::auth::repo::User;
    use crate::auth::session::SessionKeys;
    use axum::body::Body;
    use axum::extract::FromRef;
    use axum::http::{header, Request, StatusCode};
    use time::OffsetDateTime;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app(state: &AppState) -> Router {
        router().with_state(state.clone())
    }

    #[tokio::test]
    async fn landing_without_session_redirects_to_login() {
        let state = AppState::fake();
        let response = app(&state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }

    #[tokio::test]
    async fn landing_with_valid_session_greets_user() {
        let state = AppState::fake();
        let keys = SessionKeys::from_ref(&state);
        let token = keys
            .sign(&User {
                id: Uuid::new_v4(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password_hash: "unused".into(),
                created_at: OffsetDateTime::now_utc(),
            })
            .expect("sign session");

        let response = app(&state)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::COOKIE, format!("authgate_session={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Welcome, Ada"));
        assert!(html.contains("ada@example.com"));
    }

    #[tokio::test]
    async fn landing_with_forged_session_redirects_to_login() {
        let state = AppState::fake();
        let response = app(&state)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::COOKIE, "authgate_session=not-a-real-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}
