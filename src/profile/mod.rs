use crate::state::AppState;
use axum::{
    routing::{delete, get, put},
    Router,
};

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/profile/me",
        Router::new()
            .route(
                "/",
                get(handlers::own_or_all)
                    .post(handlers::upsert_profile)
                    .delete(handlers::delete_account),
            )
            .route("/user/:user_id", get(handlers::profile_by_user))
            .route("/experience", put(handlers::add_experience))
            .route("/experience/:exp_id", delete(handlers::remove_experience))
            .route("/education", put(handlers::add_education))
            .route("/education/:edu_id", delete(handlers::remove_education)),
    )
}
