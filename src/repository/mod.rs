//! Repository layer for database operations
//!
//! Every referential rule of the library lives here: foreign keys are checked
//! before writes, and constraint violations raised by SQLite during a write are
//! translated into the same typed errors so a lost race never surfaces as a
//! bare database failure.

pub mod authors;
pub mod books;
pub mod borrows;
pub mod users;

use sqlx::{Pool, Sqlite};

use crate::error::{AppError, AppResult};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub users: users::UsersRepository,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Which constraint a failed write tripped over
enum Violation {
    Unique,
    ForeignKey,
}

fn violation(err: &sqlx::Error) -> Option<Violation> {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => Some(Violation::Unique),
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => Some(Violation::ForeignKey),
        _ => None,
    }
}

/// Map a unique-constraint failure to `Conflict`, anything else stays a database error
pub(crate) fn on_unique(err: sqlx::Error, conflict: impl FnOnce() -> String) -> AppError {
    match violation(&err) {
        Some(Violation::Unique) => AppError::Conflict(conflict()),
        _ => AppError::Database(err),
    }
}

/// Map a foreign-key failure with the given constructor, anything else stays a database error
pub(crate) fn on_foreign_key(err: sqlx::Error, mapped: impl FnOnce() -> AppError) -> AppError {
    match violation(&err) {
        Some(Violation::ForeignKey) => mapped(),
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Repository;
    use crate::{
        db,
        models::{
            author::CreateAuthor, book::CreateBook, borrow::CreateBorrow, user::CreateUser,
            Author, Book, Borrow, User,
        },
    };

    pub async fn repository() -> Repository {
        Repository::new(db::connect_in_memory().await.unwrap())
    }

    pub async fn user(repo: &Repository, name: &str, email: &str) -> User {
        repo.users
            .create(&CreateUser {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn author(repo: &Repository, name: &str) -> Author {
        repo.authors
            .create(&CreateAuthor {
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn book(repo: &Repository, title: &str, author_id: i64) -> Book {
        repo.books
            .create(&CreateBook {
                title: title.to_string(),
                author_id,
            })
            .await
            .unwrap()
    }

    pub async fn borrow(repo: &Repository, user_id: i64, book_id: i64) -> Borrow {
        repo.borrows
            .create(&CreateBorrow { user_id, book_id })
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ping() {
        let repo = test_support::repository().await;
        repo.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_unique_violation_becomes_conflict() {
        let repo = test_support::repository().await;
        test_support::user(&repo, "A", "a@x.com").await;

        let err = sqlx::query("INSERT INTO users (name, email) VALUES ('B', 'A@x.com')")
            .execute(&repo.pool)
            .await
            .map_err(|e| on_unique(e, || "Email A@x.com already exists".to_string()))
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.users.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_foreign_key_violation_on_insert_becomes_not_found() {
        let repo = test_support::repository().await;

        let err = sqlx::query("INSERT INTO books (title, author_id) VALUES ('Ghost', 7)")
            .execute(&repo.pool)
            .await
            .map_err(|e| {
                on_foreign_key(e, || AppError::NotFound("Author with id 7 not found".to_string()))
            })
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.books.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_foreign_key_violation_on_delete_becomes_has_borrows() {
        let repo = test_support::repository().await;
        let user = test_support::user(&repo, "A", "a@x.com").await;
        let author = test_support::author(&repo, "Orwell").await;
        let book = test_support::book(&repo, "1984", author.id).await;
        test_support::borrow(&repo, user.id, book.id).await;

        let err = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id)
            .execute(&repo.pool)
            .await
            .map_err(|e| {
                on_foreign_key(e, || AppError::HasBorrows("User 1 has borrow records".to_string()))
            })
            .unwrap_err();

        assert!(matches!(err, AppError::HasBorrows(_)));
        assert!(repo.users.exists(user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_violations_only_match_their_own_kind() {
        let repo = test_support::repository().await;
        test_support::user(&repo, "A", "a@x.com").await;

        let err = sqlx::query("INSERT INTO users (name, email) VALUES ('B', 'a@x.com')")
            .execute(&repo.pool)
            .await
            .map_err(|e| on_foreign_key(e, || AppError::NotFound(String::new())))
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let err = sqlx::query("INSERT INTO books (title, author_id) VALUES ('Ghost', 7)")
            .execute(&repo.pool)
            .await
            .map_err(|e| on_unique(e, String::new))
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_non_constraint_errors_stay_database_errors() {
        let err = on_unique(sqlx::Error::RowNotFound, || "dup".to_string());
        assert!(matches!(err, AppError::Database(_)));

        let err = on_foreign_key(sqlx::Error::PoolClosed, || {
            AppError::NotFound("missing".to_string())
        });
        assert!(matches!(err, AppError::Database(_)));
    }
}
