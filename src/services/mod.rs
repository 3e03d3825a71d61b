//! Business logic services

pub mod catalog;
pub mod favorites;
pub mod sessions;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub favorites: favorites::FavoritesService,
    pub users: users::UsersService,
    pub sessions: sessions::SessionStore,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        sessions: sessions::SessionStore,
    ) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            favorites: favorites::FavoritesService::new(repository.clone(), sessions.clone()),
            users: users::UsersService::new(repository.clone(), auth_config),
            sessions,
            repository,
        }
    }
}
