//! Authentication request and response bodies.

use serde::{Deserialize, Serialize};
use studio_core::EntityId;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::validate_not_blank;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(
        email(message = "email must be a well-formed email address"),
        length(max = 50, message = "email must be at most 50 characters")
    )]
    #[schema(example = "yoga@studio.com")]
    pub email: String,
    #[validate(length(min = 3, max = 20, message = "firstName must be between 3 and 20 characters"))]
    #[schema(example = "Toto")]
    pub first_name: String,
    #[validate(length(min = 3, max = 20, message = "lastName must be between 3 and 20 characters"))]
    #[schema(example = "Toto")]
    pub last_name: String,
    #[validate(length(min = 6, max = 40, message = "password must be between 6 and 40 characters"))]
    #[schema(example = "test!1234")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "yoga@studio.com")]
    pub email: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "test!1234")]
    pub password: String,
}

/// Successful login payload. `username` holds the user's email.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
    pub token: String,
    #[serde(rename = "type")]
    #[schema(example = "Bearer")]
    pub token_type: String,
    pub id: EntityId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl JwtResponse {
    pub fn bearer(
        token: String,
        id: EntityId,
        username: String,
        first_name: String,
        last_name: String,
        admin: bool,
    ) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            id,
            username,
            first_name,
            last_name,
            admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
