use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// One entry of the `{"errors": [...]}` list returned for rejected input.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<&'static str>,
}

impl FieldError {
    pub fn new(msg: &str, param: &'static str) -> Self {
        Self {
            msg: msg.to_string(),
            param: Some(param),
        }
    }

    fn bare(msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: None,
        }
    }
}

/// Application error type that converts to the API's HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("user already exists")]
    DuplicateUser,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorList {
    errors: Vec<FieldError>,
}

#[derive(Serialize)]
struct ErrorMessage {
    msg: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorList { errors })).into_response()
            }
            ApiError::DuplicateUser => (
                StatusCode::BAD_REQUEST,
                Json(ErrorList {
                    errors: vec![FieldError::bare("User already exists")],
                }),
            )
                .into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                Json(ErrorList {
                    errors: vec![FieldError::bare("Invalid Credentials")],
                }),
            )
                .into_response(),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorMessage {
                    msg: msg.to_string(),
                }),
            )
                .into_response(),
            // Single-record lookups respond 400 rather than 404.
            ApiError::NotFound(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorMessage {
                    msg: msg.to_string(),
                }),
            )
                .into_response(),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
            }
        }
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn validation_errors_use_error_list_shape() {
        let err = ApiError::Validation(vec![
            FieldError::new("Name is required", "name"),
            FieldError::new("Please include a valid email address", "email"),
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["msg"], "Name is required");
        assert_eq!(json["errors"][0]["param"], "name");
        assert_eq!(json["errors"][1]["param"], "email");
    }

    #[tokio::test]
    async fn duplicate_user_matches_observed_body() {
        let response = ApiError::DuplicateUser.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["msg"], "User already exists");
        assert!(json["errors"][0].get("param").is_none());
    }

    #[tokio::test]
    async fn invalid_credentials_is_generic() {
        let response = ApiError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["msg"], "Invalid Credentials");
    }

    #[tokio::test]
    async fn unauthorized_is_401_with_msg() {
        let response = ApiError::Unauthorized("No token, authorization denied").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["msg"], "No token, authorization denied");
    }

    #[tokio::test]
    async fn not_found_is_400_not_404() {
        let response = ApiError::NotFound("Profile not found").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["msg"], "Profile not found");
    }

    #[tokio::test]
    async fn internal_hides_detail() {
        let response = ApiError::Internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let text = String::from_utf8(bytes.to_vec()).expect("utf8");
        assert_eq!(text, "Server Error");
        assert!(!text.contains("connection refused"));
    }
}
