//! Session-scoped favorites endpoints

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::book::Book};

use super::Session;

/// Favorite mutation payload. The id is kept as a string, exactly as the
/// session stores it.
#[derive(Deserialize, ToSchema)]
pub struct FavoriteRequest {
    pub book_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct FavoritesResponse {
    /// Favorited books that still exist in the catalog
    pub books: Vec<Book>,
}

/// List the session's favorite books
#[utoipa::path(
    get,
    path = "/favorites",
    tag = "favorites",
    responses(
        (status = 200, description = "Favorite books", body = FavoritesResponse)
    )
)]
pub async fn list_favorites(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<FavoritesResponse>)> {
    let (session, jar) = Session::resolve(jar);
    let books = state.services.favorites.list(&session.0).await?;
    Ok((jar, Json(FavoritesResponse { books })))
}

/// Add a book to the session's favorites. No de-duplication: adding the
/// same id twice yields two entries.
#[utoipa::path(
    post,
    path = "/favorites",
    tag = "favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Favorite added", body = FavoritesResponse)
    )
)]
pub async fn add_favorite(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    Json(request): Json<FavoriteRequest>,
) -> AppResult<(CookieJar, Json<FavoritesResponse>)> {
    let (session, jar) = Session::resolve(jar);
    state
        .services
        .favorites
        .add(&session.0, request.book_id)
        .await?;
    let books = state.services.favorites.list(&session.0).await?;
    Ok((jar, Json(FavoritesResponse { books })))
}

/// Remove a book from the session's favorites. Removing an id that is not
/// in the list is a silent no-op.
#[utoipa::path(
    delete,
    path = "/favorites",
    tag = "favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Favorite removed", body = FavoritesResponse)
    )
)]
pub async fn remove_favorite(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    Json(request): Json<FavoriteRequest>,
) -> AppResult<(CookieJar, Json<FavoritesResponse>)> {
    let (session, jar) = Session::resolve(jar);
    state
        .services
        .favorites
        .remove(&session.0, &request.book_id)
        .await?;
    let books = state.services.favorites.list(&session.0).await?;
    Ok((jar, Json(FavoritesResponse { books })))
}
