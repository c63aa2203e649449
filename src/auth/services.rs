use tracing::{error, info, warn};

use crate::auth::dto::{LoginInput, RegisterInput};
use crate::auth::password::{hash_password, verify_password, FALLBACK_HASH};
use crate::auth::repo::{InsertUserError, User, UserStore};
use crate::auth::validate::{validate_login, validate_register};
use crate::error::AuthError;

fn normalize_register(input: &mut RegisterInput) {
    input.name = input.name.trim().to_string();
    input.email = input.email.trim().to_lowercase();
}

fn normalize_login(input: &mut LoginInput) {
    input.email = input.email.trim().to_lowercase();
}

/// Create an account. Duplicate emails are detected by the unique index
/// on insert, never by a prior lookup.
pub async fn register(store: &dyn UserStore, mut input: RegisterInput) -> Result<User, AuthError> {
    normalize_register(&mut input);

    let violations = validate_register(&input);
    if !violations.is_empty() {
        warn!(email = %input.email, "registration rejected by validation");
        return Err(AuthError::Validation(violations));
    }

    let password_hash = hash_password(&input.password)?;

    let user = match store.insert(&input.name, &input.email, &password_hash).await {
        Ok(user) => user,
        Err(InsertUserError::DuplicateEmail) => {
            warn!(email = %input.email, "registration with already used email");
            return Err(AuthError::DuplicateEmail);
        }
        Err(InsertUserError::Database(e)) => {
            error!(error = %e, "insert user failed");
            return Err(AuthError::Infra(e.into()));
        }
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

pub async fn login(store: &dyn UserStore, mut input: LoginInput) -> Result<User, AuthError> {
    normalize_login(&mut input);

    let violations = validate_login(&input);
    if !violations.is_empty() {
        warn!(email = %input.email, "login rejected by validation");
        return Err(AuthError::Validation(violations));
    }

    let user = match store.find_by_email(&input.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // A lookup miss still pays for one verification.
            let _ = verify_password(&input.password, FALLBACK_HASH);
            warn!(email = %input.email, "login with unknown email");
            return Err(AuthError::UserNotFound);
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AuthError::Infra(e));
        }
    };

    if !verify_password(&input.password, &user.password_hash)? {
        warn!(email = %input.email, user_id = %user.id, "login invalid password");
        return Err(AuthError::WrongPassword);
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(user)
}
