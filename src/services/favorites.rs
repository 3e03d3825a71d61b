//! Session-scoped favorites list management
//!
//! The list is an ordered sequence of book-id strings kept exactly as
//! received: no de-duplication on add and no existence check against the
//! books table at write time. Stale or garbage ids are filtered out when the
//! list is rendered, never from the session itself.

use crate::{
    error::AppResult,
    models::book::Book,
    repository::Repository,
};

use super::sessions::SessionStore;

/// Append a favorite. Duplicates are allowed; adding the same id twice
/// yields two entries.
fn push_favorite(list: &mut Vec<String>, book_id: String) {
    list.push(book_id);
}

/// Remove the first occurrence of `book_id`. Returns whether the list
/// changed; removing an absent id is a no-op.
fn remove_favorite(list: &mut Vec<String>, book_id: &str) -> bool {
    match list.iter().position(|id| id == book_id) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}

#[derive(Clone)]
pub struct FavoritesService {
    repository: Repository,
    sessions: SessionStore,
}

impl FavoritesService {
    pub fn new(repository: Repository, sessions: SessionStore) -> Self {
        Self {
            repository,
            sessions,
        }
    }

    /// Create an empty favorites list if the session has none. Idempotent.
    pub async fn ensure_initialized(&self, session_id: &str) -> AppResult<()> {
        if self.sessions.get_favorites(session_id).await?.is_none() {
            self.sessions.set_favorites(session_id, &[]).await?;
        }
        Ok(())
    }

    /// Append `book_id` to the session's favorites, as received
    pub async fn add(&self, session_id: &str, book_id: String) -> AppResult<()> {
        let mut list = self
            .sessions
            .get_favorites(session_id)
            .await?
            .unwrap_or_default();
        push_favorite(&mut list, book_id);
        self.sessions.set_favorites(session_id, &list).await
    }

    /// Remove the first occurrence of `book_id` from the session's
    /// favorites. Absent values are ignored; nothing is written then.
    pub async fn remove(&self, session_id: &str, book_id: &str) -> AppResult<()> {
        if let Some(mut list) = self.sessions.get_favorites(session_id).await? {
            if remove_favorite(&mut list, book_id) {
                self.sessions.set_favorites(session_id, &list).await?;
            }
        }
        Ok(())
    }

    /// Resolve the session's favorites against the catalog, returning only
    /// books that still exist. Ids referring to deleted books stay in the
    /// session but fall out of the result.
    pub async fn list(&self, session_id: &str) -> AppResult<Vec<Book>> {
        let ids = self
            .sessions
            .get_favorites(session_id)
            .await?
            .unwrap_or_default();

        let numeric_ids: Vec<i32> = ids.iter().filter_map(|id| id.parse().ok()).collect();
        self.repository.books.get_by_ids(&numeric_ids).await
    }
}
