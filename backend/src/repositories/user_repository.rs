//! Database repository for user management operations.
//!
//! Provides the insert and read paths for the `users` table.

use crate::database::models::{CreateUser, User, UserSummary};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    ///
    /// # Arguments
    /// * `user` - CreateUser DTO containing user details
    ///
    /// # Returns
    /// The newly created User with all fields populated
    pub async fn create_user(&self, user: CreateUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, first_name, last_name, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, username, password_hash, first_name, last_name, created_at
            "#,
        )
        .bind(user.id)
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by their username.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, first_name, last_name, created_at
            FROM users WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Checks if a username already exists in the system.
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Lists every user's public names in insertion order.
    ///
    /// Ids are UUIDv7, so ordering by id is ordering by creation time.
    pub async fn list_user_summaries(&self) -> Result<Vec<UserSummary>> {
        let users =
            sqlx::query_as::<_, UserSummary>("SELECT first_name, last_name FROM users ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    fn new_user(id: &str, username: &str, first: &str, last: &str) -> CreateUser {
        CreateUser {
            id: id.to_string(),
            username: username.to_string(),
            password_hash: "$2b$04$not-a-real-hash".to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let created = repo
            .create_user(new_user("0001", "alice", "Alice", "Liddell"))
            .await
            .unwrap();
        assert_eq!(created.username, "alice");

        let by_name = repo.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, "0001");
        assert_eq!(by_name.first_name, "Alice");

        assert!(repo.get_user_by_username("bob").await.unwrap().is_none());
        assert!(repo.username_exists("alice").await.unwrap());
        assert!(!repo.username_exists("bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_by_store() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create_user(new_user("0001", "alice", "A", "B"))
            .await
            .unwrap();
        let err = repo
            .create_user(new_user("0002", "alice", "C", "D"))
            .await
            .unwrap_err();

        let db_err = err
            .downcast_ref::<sqlx::Error>()
            .and_then(|e| e.as_database_error())
            .unwrap();
        assert!(db_err.is_unique_violation());
        assert_eq!(repo.list_user_summaries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_user_summaries_in_id_order() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create_user(new_user("0002", "bob", "Bob", "Builder"))
            .await
            .unwrap();
        repo.create_user(new_user("0001", "alice", "Alice", "Liddell"))
            .await
            .unwrap();

        let users = repo.list_user_summaries().await.unwrap();
        assert_eq!(
            users,
            vec![
                UserSummary {
                    first_name: "Alice".to_string(),
                    last_name: "Liddell".to_string(),
                },
                UserSummary {
                    first_name: "Bob".to_string(),
                    last_name: "Builder".to_string(),
                },
            ]
        );
    }
}
