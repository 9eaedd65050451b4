//! JWT token utilities for authentication and authorization.
//!
//! Access tokens are HS256-signed and stateless: nothing about them is stored,
//! so validity is signature + expiry + token type.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::ServiceError;

const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT Claims structure identifying the authenticated user
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username at issuance
    pub username: String,
    pub token_type: String,
    /// Unique token id
    pub jti: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
#[derive(Clone)]
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the loaded configuration
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds: config.jwt_expires_in_seconds,
        }
    }

    /// Generate a new access token for the given user
    pub fn generate_token(&self, user_id: String, username: String) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: user_id,
            username,
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            jti: Uuid::now_v7().to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        self.encode_claims(&claims)
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::unauthorized(format!("Token validation failed: {}", e)))?;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(ServiceError::unauthorized("Token has wrong type"));
        }

        Ok(claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, ServiceError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }
}

/// Extract user ID from JWT claims
impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_utils() -> JwtUtils {
        JwtUtils::new(&Config::for_tests())
    }

    #[test]
    fn test_generate_and_validate_token() {
        let jwt = jwt_utils();
        let token = jwt
            .generate_token("user-1".to_string(), "alice".to_string())
            .unwrap();

        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.user_id(), "user-1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn test_each_token_has_unique_id() {
        let jwt = jwt_utils();
        let first = jwt.generate_token("u".into(), "a".into()).unwrap();
        let second = jwt.generate_token("u".into(), "a".into()).unwrap();

        let first = jwt.validate_token(&first).unwrap();
        let second = jwt.validate_token(&second).unwrap();
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = jwt_utils();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "user-1".to_string(),
            username: "alice".to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            jti: "jti".to_string(),
            exp: now - 10,
            iat: now - 310,
        };
        let token = jwt.encode_claims(&claims).unwrap();

        assert!(matches!(
            jwt.validate_token(&token),
            Err(ServiceError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let mut other_config = Config::for_tests();
        other_config.jwt_secret = "another-secret".to_string();
        let other = JwtUtils::new(&other_config);

        let token = other
            .generate_token("user-1".to_string(), "alice".to_string())
            .unwrap();

        assert!(jwt_utils().validate_token(&token).is_err());
    }

    #[test]
    fn test_non_access_token_rejected() {
        let jwt = jwt_utils();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "user-1".to_string(),
            username: "alice".to_string(),
            token_type: "refresh".to_string(),
            jti: "jti".to_string(),
            exp: now + 300,
            iat: now,
        };
        let token = jwt.encode_claims(&claims).unwrap();

        assert!(jwt.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(jwt_utils().validate_token("not.a.jwt").is_err());
        assert!(jwt_utils().validate_token("").is_err());
    }
}
