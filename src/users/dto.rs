use serde::Deserialize;

use crate::{
    auth::dto::is_valid_email,
    error::{ApiError, FieldError},
};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("Name is required", "name"));
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new(
                "Please include a valid email address",
                "email",
            ));
        }
        if self.password.len() < 6 {
            errors.push(FieldError::new(
                "Please enter a password with 6 or more characters",
                "password",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}
