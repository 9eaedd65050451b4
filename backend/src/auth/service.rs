//! Core business logic for the authentication system.
//!
//! Each operation runs validation, then the store action, then token issuance,
//! and stops at the first failure.

use crate::auth::models::*;
use crate::auth::validators::{validate_login, validate_registration};
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use sqlx::SqlitePool;

/// Authentication service for handling registration, login and token generation
pub struct AuthService<'a> {
    jwt_utils: &'a JwtUtils,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, jwt_utils: &'a JwtUtils, hash_cost: u32) -> Self {
        AuthService {
            jwt_utils,
            user_service: UserService::new(pool, hash_cost),
        }
    }

    /// Validate the payload and store a new user with a hashed password
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        let new_user = validate_registration(&request)
            .map_err(|errors| ServiceError::validation("Invalid or incomplete data", errors))?;

        self.user_service.register_user(new_user).await
    }

    /// Authenticate user and generate an access token
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let credentials = validate_login(&request)
            .map_err(|errors| ServiceError::validation("Invalid request", errors))?;

        let user = self.user_service.authenticate_user(&credentials).await?;

        let token = self
            .jwt_utils
            .generate_token(user.id.clone(), user.username.clone())?;

        Ok(LoginResponse {
            token,
            user_name: user.first_name,
        })
    }
}
