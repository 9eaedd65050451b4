//! Request and response payloads for registration and authentication.
//!
//! Request fields are `Option` so that a missing field is reported as a
//! validation error on that field rather than as a body parse failure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Registration request payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        required(message = "This field is required."),
        length(
            min = 1,
            max = 150,
            message = "Ensure this field has between 1 and 150 characters."
        )
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(
            min = 8,
            max = 128,
            message = "Ensure this field has between 8 and 128 characters."
        )
    )]
    #[schema(min_length = 8, format = Password)]
    pub password: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(
            min = 1,
            max = 150,
            message = "Ensure this field has between 1 and 150 characters."
        )
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(
            min = 1,
            max = 150,
            message = "Ensure this field has between 1 and 150 characters."
        )
    )]
    pub last_name: Option<String>,
}

/// Registration payload after validation, every field present.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Login request payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username
    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub user: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    #[schema(format = Password)]
    pub password: Option<String>,
}

/// Login response carrying the access token and the user's first name
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_name: String,
}

/// Login payload after validation.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
