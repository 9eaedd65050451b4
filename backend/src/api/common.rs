//! Error handling utilities for API responses.
//!
//! Provides the structured error body, the conversion from service-layer
//! errors to HTTP responses, and a JSON extractor whose rejections use the
//! same body.
//!
//! # Response Format
//! All errors return a JSON object containing:
//! - `error_message`: Human-readable message
//! - `error_type`: Machine-readable error category
//! - `errors`: Optional field name to list of problems
//!
//! # Error Handling Flow
//! 1. Service layer returns a domain-specific `ServiceError`
//! 2. `service_error_to_http` picks the status code and body
//! 3. Handlers return `Result<_, ServiceError>` and let `IntoResponse` do the rest

use crate::errors::{FieldErrors, ServiceError};
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error_message: String,
    /// Machine-readable error type identifier
    pub error_type: String,
    /// Field-specific validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(
        error_message: impl Into<String>,
        error_type: impl Into<String>,
        errors: Option<FieldErrors>,
    ) -> Self {
        Self {
            error_message: error_message.into(),
            error_type: error_type.into(),
            errors,
        }
    }
}

/// Converts ServiceError to the matching status code and error body
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, ErrorResponse) {
    match error {
        ServiceError::Validation { message, errors } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(
                message,
                "validation_error",
                (!errors.is_empty()).then_some(errors),
            ),
        ),
        ServiceError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(
                "Invalid credentials or user does not exist",
                "invalid_credentials",
                None,
            ),
        ),
        ServiceError::Unauthorized { message } => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(message, "unauthorized", None),
        ),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {:#}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal server error", "database_error", None),
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal server error", "internal_error", None),
            )
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, body) = service_error_to_http(self);
        (status, Json(body)).into_response()
    }
}

/// Formats validator::ValidationErrors into the field to messages map
pub fn validation_errors_to_field_errors(errors: &validator::ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errors) in errors.field_errors() {
        let messages = fields.entry(field.to_string()).or_default();
        messages.extend(errors.iter().map(|error| {
            error
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| "Invalid value".to_string())
        }));
    }
    fields
}

/// JSON body extractor that rejects with a `ServiceError` instead of axum's
/// plain-text rejection, so malformed bodies get the standard 400 body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection, "Rejected request body");
                Err(json_rejection_to_error(rejection))
            }
        }
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> ServiceError {
    let mut errors = FieldErrors::new();
    errors.insert("body".to_string(), vec![rejection.body_text()]);
    ServiceError::validation("Malformed request body", errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "Too short"))]
        name: String,
        #[validate(length(min = 1))]
        code: String,
    }

    #[test]
    fn test_validation_errors_to_field_errors() {
        let sample = Sample {
            name: "ab".to_string(),
            code: String::new(),
        };
        let errors = sample.validate().unwrap_err();
        let fields = validation_errors_to_field_errors(&errors);

        assert_eq!(fields["name"], vec!["Too short".to_string()]);
        assert_eq!(fields["code"], vec!["Invalid value".to_string()]);
    }

    #[test]
    fn test_status_mapping() {
        let (status, body) = service_error_to_http(ServiceError::field("username", "taken"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error_type, "validation_error");
        assert_eq!(body.errors.unwrap()["username"], vec!["taken".to_string()]);

        let (status, body) = service_error_to_http(ServiceError::InvalidCredentials);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.errors.is_none());

        let (status, _) = service_error_to_http(ServiceError::unauthorized("no token"));
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) =
            service_error_to_http(ServiceError::from(anyhow::anyhow!("disk on fire")));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error_message, "Internal server error");
    }

    #[test]
    fn test_empty_field_errors_are_omitted() {
        let (_, body) = service_error_to_http(ServiceError::validation(
            "Invalid or incomplete data",
            FieldErrors::new(),
        ));
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("errors").is_none());
    }
}
