//! API handlers for Biblio REST endpoints

pub mod auth;
pub mod authors;
pub mod books;
pub mod favorites;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication("Invalid authorization header format".to_string()));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Name of the per-visitor session cookie
pub const SESSION_COOKIE: &str = "biblio_session";

/// Per-visitor session identity, independent of authentication
pub struct Session(pub String);

impl Session {
    /// Read the session cookie, minting a fresh id (and cookie) when the
    /// visitor has none yet. The returned jar must be included in the
    /// response so a newly minted cookie reaches the client.
    pub fn resolve(jar: CookieJar) -> (Session, CookieJar) {
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            (Session(cookie.value().to_string()), jar)
        } else {
            let id = uuid::Uuid::new_v4().to_string();
            let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();
            (Session(id), jar.add(cookie))
        }
    }
}
