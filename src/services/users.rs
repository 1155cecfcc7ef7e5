//! User management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create a new user; the email must not be in use
    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        user.validate()?;

        let created = self.repository.users.create(&user).await?;
        tracing::info!(user_id = created.id, "user created");
        Ok(created)
    }

    /// Update an existing user
    pub async fn update_user(&self, id: i64, user: UpdateUser) -> AppResult<User> {
        user.validate()?;

        let updated = self.repository.users.update(id, &user).await?;
        tracing::info!(user_id = id, "user updated");
        Ok(updated)
    }

    /// Delete a user; `force` also deletes the user's borrow records
    pub async fn delete_user(&self, id: i64, force: bool) -> AppResult<()> {
        self.repository.users.delete(id, force).await?;
        tracing::info!(user_id = id, force, "user deleted");
        Ok(())
    }
}
