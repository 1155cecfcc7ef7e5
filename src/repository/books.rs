//! Books repository

use sqlx::{Pool, Sqlite};

use super::on_foreign_key;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookShort, CreateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all books in creation order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT id, title, author_id FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Books written by an author; empty when the author has none or does not exist
    pub async fn list_by_author(&self, author_id: i64) -> AppResult<Vec<BookShort>> {
        let books = sqlx::query_as::<_, BookShort>(
            "SELECT id, title FROM books WHERE author_id = ? ORDER BY id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Create a book for an existing author
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let author_missing = || AppError::NotFound(format!("Author with id {} not found", book.author_id));

        let author_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = ?)")
                .bind(book.author_id)
                .fetch_one(&self.pool)
                .await?;
        if !author_exists {
            return Err(author_missing());
        }

        sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author_id) VALUES (?, ?) RETURNING id, title, author_id",
        )
        .bind(&book.title)
        .bind(book.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_foreign_key(e, author_missing))
    }

    /// Delete a book.
    ///
    /// Refused while borrow records reference the book, unless `force` is set,
    /// in which case those borrows are removed in the same transaction. Every
    /// path opens with a write, so the write lock is held from the first
    /// statement and `ON DELETE RESTRICT` decides the refusal.
    pub async fn delete(&self, id: i64, force: bool) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        if force {
            let removed = sqlx::query("DELETE FROM borrows WHERE book_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if removed.rows_affected() > 0 {
                tracing::debug!(book_id = id, removed = removed.rows_affected(), "cascaded borrow delete");
            }
        }

        let deleted = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| on_foreign_key(e, || AppError::HasBorrows(String::new())));

        let result = match deleted {
            Err(AppError::HasBorrows(_)) => {
                let borrows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrows WHERE book_id = ?")
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?;
                return Err(AppError::HasBorrows(format!(
                    "Book {} has {} borrow record(s). Use force=true to delete them too.",
                    id, borrows
                )));
            }
            other => other?,
        };

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support;

    #[tokio::test]
    async fn test_books_by_author_scenario() {
        let repo = test_support::repository().await;
        let orwell = test_support::author(&repo, "Orwell").await;
        let book = test_support::book(&repo, "1984", orwell.id).await;

        assert_eq!(orwell.id, 1);
        assert_eq!(book.id, 1);
        assert_eq!(
            repo.books.list_by_author(1).await.unwrap(),
            vec![BookShort {
                id: 1,
                title: "1984".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_create_with_missing_author_writes_nothing() {
        let repo = test_support::repository().await;

        let err = repo
            .books
            .create(&CreateBook {
                title: "Ghost".to_string(),
                author_id: 7,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.books.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_books_by_unknown_author_is_empty() {
        let repo = test_support::repository().await;
        assert!(repo.books.list_by_author(404).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_books_by_author_tracks_creates_and_deletes() {
        let repo = test_support::repository().await;
        let orwell = test_support::author(&repo, "Orwell").await;
        let huxley = test_support::author(&repo, "Huxley").await;

        let farm = test_support::book(&repo, "Animal Farm", orwell.id).await;
        let brave = test_support::book(&repo, "Brave New World", huxley.id).await;
        let nineteen = test_support::book(&repo, "1984", orwell.id).await;
        repo.books.delete(farm.id, false).await.unwrap();
        let homage = test_support::book(&repo, "Homage to Catalonia", orwell.id).await;

        let ids: Vec<i64> = repo
            .books
            .list_by_author(orwell.id)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![nineteen.id, homage.id]);

        let all = repo.books.list().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], brave);
    }

    #[tokio::test]
    async fn test_delete_missing_book() {
        let repo = test_support::repository().await;
        let err = repo.books.delete(3, false).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_with_borrows_is_blocked_unless_forced() {
        let repo = test_support::repository().await;
        let user = test_support::user(&repo, "A", "a@x.com").await;
        let author = test_support::author(&repo, "Orwell").await;
        let book = test_support::book(&repo, "1984", author.id).await;
        test_support::borrow(&repo, user.id, book.id).await;
        test_support::borrow(&repo, user.id, book.id).await;

        let err = repo.books.delete(book.id, false).await.unwrap_err();
        assert!(matches!(err, AppError::HasBorrows(_)));
        assert_eq!(repo.books.list().await.unwrap(), vec![book.clone()]);

        repo.books.delete(book.id, true).await.unwrap();
        assert!(repo.books.list().await.unwrap().is_empty());
        assert!(repo.borrows.list_by_user(user.id).await.unwrap().is_empty());
        assert!(repo.users.exists(user.id).await.unwrap());
    }
}
