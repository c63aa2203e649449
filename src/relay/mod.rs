use crate::state::AppState;
use axum::Router;

pub mod handlers;
mod upstream;

pub use upstream::UpstreamClient;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
