//! Author endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor},
};

use super::{JsonBody, MessageResponse};

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "List of authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Add a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = MessageResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    JsonBody(author): JsonBody<CreateAuthor>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let created = state.services.authors.create(author).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_id("New author added", created.id)),
    ))
}
