//! Borrows repository

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use super::on_foreign_key;
use crate::{
    error::{AppError, AppResult},
    models::borrow::{BookBorrow, Borrow, CreateBorrow, UserBorrow},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Sqlite>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Record a user borrowing a book, stamped with the current UTC time
    pub async fn create(&self, borrow: &CreateBorrow) -> AppResult<Borrow> {
        let (user_exists, book_exists): (bool, bool) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = ?),
                   EXISTS(SELECT 1 FROM books WHERE id = ?)
            "#,
        )
        .bind(borrow.user_id)
        .bind(borrow.book_id)
        .fetch_one(&self.pool)
        .await?;

        if !user_exists {
            return Err(AppError::NotFound(format!("User with id {} not found", borrow.user_id)));
        }
        if !book_exists {
            return Err(AppError::NotFound(format!("Book with id {} not found", borrow.book_id)));
        }

        sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrows (user_id, book_id, borrow_date)
            VALUES (?, ?, ?)
            RETURNING id, user_id, book_id, borrow_date
            "#,
        )
        .bind(borrow.user_id)
        .bind(borrow.book_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            on_foreign_key(e, || {
                AppError::NotFound(format!(
                    "User {} or book {} no longer exists",
                    borrow.user_id, borrow.book_id
                ))
            })
        })
    }

    /// Borrows made by a user, oldest first
    pub async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<UserBorrow>> {
        let rows = sqlx::query_as::<_, UserBorrow>(
            "SELECT id, book_id, borrow_date FROM borrows WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Borrows of a book, oldest first
    pub async fn list_by_book(&self, book_id: i64) -> AppResult<Vec<BookBorrow>> {
        let rows = sqlx::query_as::<_, BookBorrow>(
            "SELECT id, user_id, borrow_date FROM borrows WHERE book_id = ? ORDER BY id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support;

    #[tokio::test]
    async fn test_borrow_scenario() {
        let repo = test_support::repository().await;
        let user = test_support::user(&repo, "A", "a@x.com").await;
        let author = test_support::author(&repo, "Orwell").await;
        let book = test_support::book(&repo, "1984", author.id).await;

        let before = Utc::now();
        let borrow = test_support::borrow(&repo, user.id, book.id).await;
        let after = Utc::now();

        assert_eq!(borrow.id, 1);
        assert_eq!(borrow.user_id, 1);
        assert_eq!(borrow.book_id, 1);
        assert!(borrow.borrow_date >= before && borrow.borrow_date <= after);

        let by_user = repo.borrows.list_by_user(user.id).await.unwrap();
        assert_eq!(
            by_user,
            vec![UserBorrow {
                id: borrow.id,
                book_id: book.id,
                borrow_date: borrow.borrow_date,
            }]
        );

        let by_book = repo.borrows.list_by_book(book.id).await.unwrap();
        assert_eq!(
            by_book,
            vec![BookBorrow {
                id: borrow.id,
                user_id: user.id,
                borrow_date: borrow.borrow_date,
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_user_or_book_is_not_found() {
        let repo = test_support::repository().await;
        let user = test_support::user(&repo, "A", "a@x.com").await;
        let author = test_support::author(&repo, "Orwell").await;
        let book = test_support::book(&repo, "1984", author.id).await;

        let err = repo
            .borrows
            .create(&CreateBorrow {
                user_id: 99,
                book_id: book.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = repo
            .borrows
            .create(&CreateBorrow {
                user_id: user.id,
                book_id: 99,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        assert!(repo.borrows.list_by_user(user.id).await.unwrap().is_empty());
        assert!(repo.borrows.list_by_book(book.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listings_are_scoped() {
        let repo = test_support::repository().await;
        let a = test_support::user(&repo, "A", "a@x.com").await;
        let b = test_support::user(&repo, "B", "b@x.com").await;
        let author = test_support::author(&repo, "Orwell").await;
        let farm = test_support::book(&repo, "Animal Farm", author.id).await;
        let nineteen = test_support::book(&repo, "1984", author.id).await;

        test_support::borrow(&repo, a.id, farm.id).await;
        test_support::borrow(&repo, b.id, farm.id).await;
        test_support::borrow(&repo, a.id, nineteen.id).await;

        let a_books: Vec<i64> = repo
            .borrows
            .list_by_user(a.id)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.book_id)
            .collect();
        assert_eq!(a_books, vec![farm.id, nineteen.id]);

        let farm_users: Vec<i64> = repo
            .borrows
            .list_by_book(farm.id)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.user_id)
            .collect();
        assert_eq!(farm_users, vec![a.id, b.id]);

        assert!(repo.borrows.list_by_user(404).await.unwrap().is_empty());
    }
}
