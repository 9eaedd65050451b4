//! Defines the HTTP routes for registration and authentication.
//!
//! These routes are public and are merged into the main Axum router.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/auth", post(authenticate))
}
