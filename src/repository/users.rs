//! Users repository for database operations

use sqlx::{Pool, Sqlite};

use super::{on_foreign_key, on_unique};
use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Sqlite>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all users in creation order
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Check if email already exists (the column collates NOCASE)
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ? AND id != ?)")
                .bind(email)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a new user
    pub async fn create(&self, user: &CreateUser) -> AppResult<User> {
        if self.email_exists(&user.email, None).await? {
            return Err(AppError::Conflict(format!("Email {} already exists", user.email)));
        }

        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email) VALUES (?, ?) RETURNING id, name, email",
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_unique(e, || format!("Email {} already exists", user.email)))
    }

    /// Update name and/or email of an existing user
    pub async fn update(&self, id: i64, user: &UpdateUser) -> AppResult<User> {
        if !self.exists(id).await? {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        if let Some(ref email) = user.email {
            if self.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict(format!("Email {} already exists", email)));
            }
        }

        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE(?, name),
                email = COALESCE(?, email)
            WHERE id = ?
            RETURNING id, name, email
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| on_unique(e, || "Email already exists".to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Delete a user.
    ///
    /// Refused while borrow records reference the user, unless `force` is set,
    /// in which case those borrows are removed in the same transaction. Every
    /// path opens with a write, so the write lock is held from the first
    /// statement and `ON DELETE RESTRICT` decides the refusal.
    pub async fn delete(&self, id: i64, force: bool) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        if force {
            let removed = sqlx::query("DELETE FROM borrows WHERE user_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if removed.rows_affected() > 0 {
                tracing::debug!(user_id = id, removed = removed.rows_affected(), "cascaded borrow delete");
            }
        }

        let deleted = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| on_foreign_key(e, || AppError::HasBorrows(String::new())));

        let result = match deleted {
            Err(AppError::HasBorrows(_)) => {
                let borrows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrows WHERE user_id = ?")
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?;
                return Err(AppError::HasBorrows(format!(
                    "User {} has {} borrow record(s). Use force=true to delete them too.",
                    id, borrows
                )));
            }
            other => other?,
        };

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}
