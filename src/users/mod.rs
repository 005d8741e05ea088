use crate::state::AppState;
use axum::{routing::post, Router};

pub mod avatar;
pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new().route("/users", post(handlers::register))
}
