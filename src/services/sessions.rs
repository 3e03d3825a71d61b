//! Redis-backed session store for per-visitor state
//!
//! The only session payload today is the favorites list, stored as a JSON
//! array of book-id strings under `session:{id}:favorite_books`. The TTL
//! slides forward on every write.

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct SessionStore {
    client: Client,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Create a new session store and verify the connection
    pub async fn new(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self {
            client,
            ttl_seconds,
        })
    }

    /// Check that Redis is reachable
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis ping failed: {}", e)))?;
        Ok(())
    }

    fn favorites_key(session_id: &str) -> String {
        format!("session:{}:favorite_books", session_id)
    }

    /// Read the favorites list; None means the session has no list yet
    pub async fn get_favorites(&self, session_id: &str) -> AppResult<Option<Vec<String>>> {
        let mut conn = self.connection().await?;

        let raw: Option<String> = conn
            .get(Self::favorites_key(session_id))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read session from Redis: {}", e)))?;

        match raw {
            Some(json) => {
                let ids: Vec<String> = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Corrupt favorites list in session: {}", e))
                })?;
                Ok(Some(ids))
            }
            None => Ok(None),
        }
    }

    /// Write the favorites list, refreshing the session TTL
    pub async fn set_favorites(&self, session_id: &str, ids: &[String]) -> AppResult<()> {
        let mut conn = self.connection().await?;

        let json = serde_json::to_string(ids)
            .map_err(|e| AppError::Internal(format!("Failed to serialize favorites: {}", e)))?;

        conn.set_ex::<_, _, ()>(Self::favorites_key(session_id), json, self.ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write session to Redis: {}", e)))?;

        Ok(())
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }
}
