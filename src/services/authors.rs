//! Author service

use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn create(&self, author: CreateAuthor) -> AppResult<Author> {
        author.validate()?;

        let created = self.repository.authors.create(&author).await?;
        tracing::info!(author_id = created.id, "author created");
        Ok(created)
    }
}
