//! Data models for the library records

pub mod author;
pub mod book;
pub mod borrow;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookShort};
pub use borrow::{BookBorrow, Borrow, UserBorrow};
pub use user::User;
