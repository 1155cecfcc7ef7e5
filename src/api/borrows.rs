//! Borrow endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::borrow::{BookBorrow, CreateBorrow, UserBorrow},
};

use super::{JsonBody, MessageResponse, PathParam};

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrows",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Book borrowed", body = MessageResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "User or book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_borrow(
    State(state): State<crate::AppState>,
    JsonBody(borrow): JsonBody<CreateBorrow>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let created = state.services.borrows.create(borrow).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_id("Book borrowed", created.id)),
    ))
}

/// Books borrowed by a user
#[utoipa::path(
    get,
    path = "/borrow/user/{id}",
    tag = "borrows",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Borrows of the user, empty if none", body = Vec<UserBorrow>)
    )
)]
pub async fn list_user_borrows(
    State(state): State<crate::AppState>,
    PathParam(user_id): PathParam<i64>,
) -> AppResult<Json<Vec<UserBorrow>>> {
    let borrows = state.services.borrows.list_by_user(user_id).await?;
    Ok(Json(borrows))
}

/// Users who borrowed a book
#[utoipa::path(
    get,
    path = "/borrow/book/{id}",
    tag = "borrows",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Borrows of the book, empty if none", body = Vec<BookBorrow>)
    )
)]
pub async fn list_book_borrows(
    State(state): State<crate::AppState>,
    PathParam(book_id): PathParam<i64>,
) -> AppResult<Json<Vec<BookBorrow>>> {
    let borrows = state.services.borrows.list_by_book(book_id).await?;
    Ok(Json(borrows))
}
