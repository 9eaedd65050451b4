//! OpenAPI description of the public endpoints.
//!
//! The document is served as JSON at `/swagger.json` and as YAML at
//! `/swagger.yaml`, with a Swagger UI at `/swagger/` and ReDoc at `/redoc`.

use crate::api::common::{ErrorResponse, MessageResponse};
use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::database::models::UserSummary;
use crate::errors::ServiceError;
use axum::{
    Router,
    http::header,
    response::IntoResponse,
    routing::get,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::authenticate,
        crate::api::user::handlers::list_users,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        MessageResponse,
        ErrorResponse,
        UserSummary,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "users", description = "User registration, authentication and listing"),
    ),
    info(
        title = "User API",
        description = "Register users, issue JWT access tokens, list registered users.",
    )
)]
pub struct ApiDoc;

/// Declares the `bearer_auth` scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn docs_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger").url("/swagger.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .route("/swagger.yaml", get(openapi_yaml))
}

async fn openapi_yaml() -> Result<impl IntoResponse, ServiceError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ServiceError::internal_error(format!("OpenAPI YAML rendering failed: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "application/yaml")], yaml))
}
