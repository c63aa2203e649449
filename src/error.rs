use axum::http::StatusCode;
use thiserror::Error;

use crate::auth::validate::Violations;

/// Everything that can go wrong while registering or logging in.
///
/// `Display` is the client-facing message; infrastructure failures never
/// leak their cause beyond a generic line.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{}", .0.first())]
    Validation(Violations),
    #[error("Email already used")]
    DuplicateEmail,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    WrongPassword,
    #[error("Internal server error")]
    Infra(anyhow::Error),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Infra(err)
    }
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::UserNotFound | AuthError::WrongPassword => StatusCode::UNAUTHORIZED,
            AuthError::Infra(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// All messages for this failure, for pages that list every problem.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AuthError::Validation(violations) => violations.all().to_vec(),
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    fn violations(messages: &[&str]) -> Violations {
        let mut v = Violations::default();
        for m in messages {
            v.push(*m);
        }
        v
    }

    #[test]
    fn statuses_follow_failure_class() {
        assert_eq!(
            AuthError::Validation(violations(&["Email is required"])).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(AuthError::UserNotFound.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::WrongPassword.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Infra(anyhow::anyhow!("db down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_message_is_first_violation() {
        let err = AuthError::Validation(violations(&["Name is required", "Invalid email"]));
        assert_eq!(err.message(), "Name is required");
        assert_eq!(err.messages(), ["Name is required", "Invalid email"]);
    }

    #[test]
    fn infra_message_hides_the_cause() {
        let err = AuthError::from(anyhow::anyhow!("connection refused"));
        assert_eq!(err.message(), "Internal server error");
    }
}
