//! Middleware for protecting authenticated routes.
//!
//! Validates the `Authorization: Bearer <token>` header and makes the decoded
//! [`Claims`] available to handlers as an `Extension`.

use crate::errors::ServiceError;
use crate::utils::jwt::{Claims, JwtUtils};
use axum::{
    Extension,
    extract::Request,
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(jwt_utils): Extension<JwtUtils>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let token = bearer_token(request.headers())?;

    match jwt_utils.validate_token(token) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert::<Claims>(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            tracing::warn!("Rejected bearer token: {}", e);
            Err(ServiceError::unauthorized("Invalid or expired token"))
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ServiceError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ServiceError::unauthorized("Authentication credentials were not provided"))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ServiceError::unauthorized("Authorization header must be a Bearer token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def")).unwrap(), "abc.def");
        assert!(bearer_token(&HeaderMap::new()).is_err());
        assert!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&headers_with("Bearer ")).is_err());
        assert!(bearer_token(&headers_with("abc.def")).is_err());
    }
}
