//! Book catalog service

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookShort, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn list_by_author(&self, author_id: i64) -> AppResult<Vec<BookShort>> {
        self.repository.books.list_by_author(author_id).await
    }

    /// Add a book to the catalog; the author must already exist
    pub async fn create(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        let created = self.repository.books.create(&book).await?;
        tracing::info!(book_id = created.id, author_id = created.author_id, "book created");
        Ok(created)
    }

    /// Delete a book; `force` also deletes its borrow records
    pub async fn delete(&self, id: i64, force: bool) -> AppResult<()> {
        self.repository.books.delete(id, force).await?;
        tracing::info!(book_id = id, force, "book deleted");
        Ok(())
    }
}
