use crate::state::AppState;
use axum::{routing::post, Router};

pub mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/auth",
        post(handlers::login).get(handlers::current_user),
    )
}
