//! Biblio Book Catalog Server
//!
//! A REST JSON API for browsing a book catalog: list and search books and
//! authors, keep a session-scoped favorites list, and (for staff accounts)
//! create, edit and delete book records.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
