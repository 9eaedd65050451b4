//! Handler functions for the user listing endpoint.

use crate::api::common::ErrorResponse;
use crate::database::models::UserSummary;
use crate::errors::ServiceError;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::Claims;
use axum::extract::{Extension, Json};
use sqlx::SqlitePool;

/// Lists every registered user's first and last name.
#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Registered users", body = Vec<UserSummary>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<Vec<UserSummary>>, ServiceError> {
    tracing::info!("Listing users for user: {}", claims.user_id());

    let users = UserRepository::new(&pool).list_user_summaries().await?;

    Ok(Json(users))
}
