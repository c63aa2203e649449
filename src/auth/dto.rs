use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of a registration request, JSON or form-encoded.
///
/// Every field defaults to empty so that a missing key comes out of
/// deserialization as an empty string and is reported by validation,
/// instead of failing the whole request during parsing. Also serialized
/// when the relay forwards a registration upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of a login request, JSON or form-encoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public part of the user returned to clients.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
