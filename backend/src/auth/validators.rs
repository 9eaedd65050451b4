//! Shape checks for registration and login payloads.
//!
//! Both validators are pure: the same payload always yields the same result and
//! nothing is read from or written to the store. `Ok` carries the payload with
//! every field present; `Err` carries every problem found, keyed by field.

use crate::api::common::validation_errors_to_field_errors;
use crate::auth::models::{Credentials, LoginRequest, NewUser, RegisterRequest};
use crate::errors::FieldErrors;
use crate::services::user_service::{MAX_PASSWORD_BYTES, PASSWORD_TOO_LONG};
use validator::Validate;

const USERNAME_CHARSET_MESSAGE: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";

/// Validates a registration payload.
///
/// `username`, `first_name` and `last_name` are trimmed first, so a value made
/// only of whitespace counts as blank. The password is taken verbatim.
pub fn validate_registration(request: &RegisterRequest) -> Result<NewUser, FieldErrors> {
    let normalized = RegisterRequest {
        username: trimmed(&request.username),
        password: request.password.clone(),
        first_name: trimmed(&request.first_name),
        last_name: trimmed(&request.last_name),
    };

    let mut errors = match normalized.validate() {
        Ok(()) => FieldErrors::new(),
        Err(validation_errors) => validation_errors_to_field_errors(&validation_errors),
    };

    if let Some(username) = normalized.username.as_deref() {
        if !username.is_empty() && !username.chars().all(is_username_char) {
            errors
                .entry("username".to_string())
                .or_default()
                .push(USERNAME_CHARSET_MESSAGE.to_string());
        }
    }

    if let Some(password) = normalized.password.as_deref() {
        if password.len() > MAX_PASSWORD_BYTES {
            errors
                .entry("password".to_string())
                .or_default()
                .push(PASSWORD_TOO_LONG.to_string());
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    match normalized {
        RegisterRequest {
            username: Some(username),
            password: Some(password),
            first_name: Some(first_name),
            last_name: Some(last_name),
        } => Ok(NewUser {
            username,
            password,
            first_name,
            last_name,
        }),
        // `required` on every field makes this unreachable once validation passed.
        _ => Err(FieldErrors::from([(
            "non_field".to_string(),
            vec!["Incomplete data".to_string()],
        )])),
    }
}

/// Validates a login payload.
pub fn validate_login(request: &LoginRequest) -> Result<Credentials, FieldErrors> {
    let normalized = LoginRequest {
        // Usernames are stored trimmed, so " alice " logs in as "alice".
        user: trimmed(&request.user),
        password: request.password.clone(),
    };

    if let Err(validation_errors) = normalized.validate() {
        return Err(validation_errors_to_field_errors(&validation_errors));
    }

    match normalized {
        LoginRequest {
            user: Some(username),
            password: Some(password),
        } => Ok(Credentials { username, password }),
        _ => Err(FieldErrors::from([(
            "non_field".to_string(),
            vec!["Incomplete data".to_string()],
        )])),
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.trim().to_string())
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}
