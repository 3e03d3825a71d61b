//! Author endpoints

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{author::Author, book::Book},
};

/// Author detail payload with the author's books attached
#[derive(Serialize, ToSchema)]
pub struct AuthorDetailResponse {
    pub author: Author,
    pub books: Vec<Book>,
}

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "List of authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.catalog.list_authors().await?;
    Ok(Json(authors))
}

/// Get author details by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorDetailResponse),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetailResponse>> {
    let author = state.services.catalog.get_author(id).await?;
    let books = state.services.catalog.get_author_books(id).await?;
    Ok(Json(AuthorDetailResponse { author, books }))
}

/// Resolve an author by exact name and redirect to the canonical
/// id-based detail route. Kept for legacy name-based URLs.
#[utoipa::path(
    get,
    path = "/authors/by-name/{name}",
    tag = "authors",
    params(
        ("name" = String, Path, description = "Exact author name")
    ),
    responses(
        (status = 308, description = "Redirect to the canonical author URL"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author_by_name(
    State(state): State<crate::AppState>,
    Path(name): Path<String>,
) -> AppResult<Redirect> {
    let author = state.services.catalog.resolve_author_by_name(&name).await?;
    Ok(Redirect::permanent(&format!("/api/v1/authors/{}", author.id)))
}
