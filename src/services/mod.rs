//! Services module
//!
//! This module contains business logic services

pub mod event;
pub mod star;
pub mod update;
pub mod user;

// Re-export commonly used services
pub use event::EventService;
pub use star::StarService;
pub use update::UpdateService;
pub use user::UserService;

use std::sync::Arc;

use crate::config::Settings;
use crate::media::{HttpObjectStore, ObjectStore};
use crate::store::Datastore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub event_service: EventService,
    pub star_service: StarService,
    pub update_service: UpdateService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(store: Datastore, settings: &Settings) -> Result<Self> {
        let media: Arc<dyn ObjectStore> = Arc::new(HttpObjectStore::new(&settings.storage)?);
        Ok(Self::with_media(store, media, settings))
    }

    /// Wire services with an explicit object store collaborator
    pub fn with_media(store: Datastore, media: Arc<dyn ObjectStore>, settings: &Settings) -> Self {
        let user_service = UserService::new(store.users.clone());
        let event_service =
            EventService::new(store.events.clone(), store.stars.clone(), media);
        let star_service = StarService::new(store.events.clone(), store.stars.clone());
        let update_service = UpdateService::new(
            store.updates.clone(),
            store.events.clone(),
            settings.feed.fetch_limit,
        );

        Self {
            user_service,
            event_service,
            star_service,
            update_service,
        }
    }
}
