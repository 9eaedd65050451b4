//! User business logic service.
//!
//! Handles registration and credential checks.

use crate::auth::models::{Credentials, NewUser};
use crate::database::models::{CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use bcrypt::{hash, verify};
use sqlx::SqlitePool;
use uuid::Uuid;

const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// bcrypt reads at most this many bytes of a password and ignores the rest.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub const PASSWORD_TOO_LONG: &str = "Ensure this field has no more than 72 bytes.";

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    /// bcrypt work factor
    hash_cost: u32,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `hash_cost` - bcrypt cost used for new password hashes
    pub fn new(pool: &'a SqlitePool, hash_cost: u32) -> Self {
        Self { pool, hash_cost }
    }

    /// Creates a new user from an already validated payload.
    ///
    /// # Returns
    /// The newly created User
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` on `username` if the name is taken,
    /// including when a concurrent registration wins the insert.
    pub async fn register_user(&self, new_user: NewUser) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        if repo.username_exists(&new_user.username).await? {
            return Err(ServiceError::field("username", USERNAME_TAKEN));
        }

        let password_hash = self.hash_password(&new_user.password)?;

        let data = CreateUser {
            id: Uuid::now_v7().to_string(),
            username: new_user.username,
            password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
        };

        repo.create_user(data).await.map_err(insert_error_to_service_error)
    }

    /// Checks a username/password pair against the store.
    ///
    /// # Errors
    /// Returns `ServiceError::InvalidCredentials` both when the user does not
    /// exist and when the password is wrong. The unknown-user path still pays
    /// for one bcrypt hash so the two cases take comparable time.
    pub async fn authenticate_user(&self, credentials: &Credentials) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        let Some(user) = repo.get_user_by_username(&credentials.username).await? else {
            let _ = self.hash_password(&credentials.password);
            return Err(ServiceError::InvalidCredentials);
        };

        if Self::verify_password(&credentials.password, &user.password_hash) {
            Ok(user)
        } else {
            Err(ServiceError::InvalidCredentials)
        }
    }

    /// Function to hash a password before storing in database
    ///
    /// Passwords longer than `MAX_PASSWORD_BYTES` are refused rather than
    /// truncated.
    fn hash_password(&self, password: &str) -> ServiceResult<String> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(ServiceError::field("password", PASSWORD_TOO_LONG));
        }
        hash(password, self.hash_cost)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Function to verify a password against the stored hash
    ///
    /// A stored value that bcrypt cannot parse never matches, and neither does
    /// a password too long to have been hashed without truncation.
    fn verify_password(password: &str, hash: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        verify(password, hash).unwrap_or_else(|e| {
            tracing::warn!("Password verification failed: {}", e);
            false
        })
    }
}

/// Maps an insert failure, turning a UNIQUE violation on `username` into the
/// same field error the pre-check reports.
fn insert_error_to_service_error(error: anyhow::Error) -> ServiceError {
    if is_unique_violation(&error) {
        ServiceError::field("username", USERNAME_TAKEN)
    } else {
        error.into()
    }
}

fn is_unique_violation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|e| e.is_unique_violation())
}
