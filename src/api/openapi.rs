//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, borrows, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Records API",
        version = "1.0.0",
        description = "Users, authors, books and borrows REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Authors
        authors::list_authors,
        authors::create_author,
        // Books
        books::list_books,
        books::list_books_by_author,
        books::create_book,
        books::delete_book,
        // Borrows
        borrows::create_borrow,
        borrows::list_user_borrows,
        borrows::list_book_borrows,
    ),
    components(
        schemas(
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::CreateBook,
            crate::models::borrow::Borrow,
            crate::models::borrow::UserBorrow,
            crate::models::borrow::BookBorrow,
            crate::models::borrow::CreateBorrow,
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management"),
        (name = "authors", description = "Authors"),
        (name = "books", description = "Book catalog"),
        (name = "borrows", description = "Borrow records")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/users",
            "/users/{id}",
            "/authors",
            "/books",
            "/books/author/{author_id}",
            "/books/{id}",
            "/borrow",
            "/borrow/user/{id}",
            "/borrow/book/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
