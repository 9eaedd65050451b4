//! Handler functions for registration and authentication endpoints.
//!
//! These functions parse the request body, delegate to `auth::service`, and
//! shape the HTTP response. Failures are `ServiceError`s, rendered by its
//! `IntoResponse` impl.

use crate::api::common::{ErrorResponse, JsonBody, MessageResponse};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::errors::ServiceError;
use crate::utils::jwt::JwtUtils;
use axum::{extract::Extension, http::StatusCode, response::Json};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Handle user registration request
#[utoipa::path(
    post,
    path = "/register",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Invalid or incomplete data", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(config): Extension<Arc<Config>>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    let auth_service = AuthService::new(&pool, &jwt_utils, config.bcrypt_cost);

    let user = auth_service.register(payload).await.inspect_err(|e| {
        if let ServiceError::Validation { errors, .. } = e {
            tracing::info!(fields = ?errors.keys().collect::<Vec<_>>(), "Registration rejected");
        }
    })?;

    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        created_at = %user.created_at,
        "User registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// Handle user login request
#[utoipa::path(
    post,
    path = "/auth",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials or user does not exist", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn authenticate(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(config): Extension<Arc<Config>>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ServiceError> {
    let auth_service = AuthService::new(&pool, &jwt_utils, config.bcrypt_cost);

    match auth_service.login(payload).await {
        Ok(response) => Ok(Json(response)),
        Err(ServiceError::InvalidCredentials) => {
            tracing::warn!("Authentication failed");
            Err(ServiceError::InvalidCredentials)
        }
        Err(error) => Err(error),
    }
}
