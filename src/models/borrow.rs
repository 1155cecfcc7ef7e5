//! Borrow (lending event) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A user borrowing a book at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrow {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    /// Set once at creation, never updated
    pub borrow_date: DateTime<Utc>,
}

/// Borrow as seen from the borrowing user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserBorrow {
    pub id: i64,
    pub book_id: i64,
    pub borrow_date: DateTime<Utc>,
}

/// Borrow as seen from the borrowed book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookBorrow {
    pub id: i64,
    pub user_id: i64,
    pub borrow_date: DateTime<Utc>,
}

/// Create borrow request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBorrow {
    pub user_id: i64,
    pub book_id: i64,
}
