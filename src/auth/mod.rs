use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;
pub mod session;
pub(crate) mod extractors;
pub(crate) mod validate;
mod password;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
