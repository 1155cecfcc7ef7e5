//! Book catalog endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BookShort, CreateBook},
};

use super::{DeleteParams, JsonBody, MessageResponse, PathParam, QueryParam};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// List the books of one author
#[utoipa::path(
    get,
    path = "/books/author/{author_id}",
    tag = "books",
    params(
        ("author_id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Books by the author, empty if none", body = Vec<BookShort>)
    )
)]
pub async fn list_books_by_author(
    State(state): State<crate::AppState>,
    PathParam(author_id): PathParam<i64>,
) -> AppResult<Json<Vec<BookShort>>> {
    let books = state.services.books.list_by_author(author_id).await?;
    Ok(Json(books))
}

/// Add a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = MessageResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    JsonBody(book): JsonBody<CreateBook>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let created = state.services.books.create(book).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_id("New book added", created.id)),
    ))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book has borrow records", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    PathParam(id): PathParam<i64>,
    QueryParam(params): QueryParam<DeleteParams>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .books
        .delete(id, params.force.unwrap_or(false))
        .await?;
    Ok(Json(MessageResponse::new("Book deleted")))
}
