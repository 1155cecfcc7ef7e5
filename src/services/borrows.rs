//! Borrow service

use crate::{
    error::AppResult,
    models::borrow::{BookBorrow, Borrow, CreateBorrow, UserBorrow},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record a borrow; both the user and the book must exist
    pub async fn create(&self, borrow: CreateBorrow) -> AppResult<Borrow> {
        let created = self.repository.borrows.create(&borrow).await?;
        tracing::info!(
            borrow_id = created.id,
            user_id = created.user_id,
            book_id = created.book_id,
            "book borrowed"
        );
        Ok(created)
    }

    pub async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<UserBorrow>> {
        self.repository.borrows.list_by_user(user_id).await
    }

    pub async fn list_by_book(&self, book_id: i64) -> AppResult<Vec<BookBorrow>> {
        self.repository.borrows.list_by_book(book_id).await
    }
}
