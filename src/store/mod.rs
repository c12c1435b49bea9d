//! Datastore access
//!
//! The durable datastore is an external collaborator; the services talk to
//! it through the trait seams below so the workflow logic stays independent
//! of the hosted backend. The Postgres implementations in [`postgres`] are
//! the production collaborators.

pub mod connection;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    CreateUserRequest, Event, EventCategory, EventUpdate, FestivalUpdate, NewEvent, StarredEvent,
    UpdateEventRequest, UpdateUserRequest, User, UserRole,
};
use crate::utils::errors::Result;

pub use connection::{create_pool, health_check, run_migrations, DatabasePool};
pub use postgres::{PgEventStore, PgStarStore, PgUpdateStore, PgUserStore};

/// User rows
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_auth_id(&self, auth_id: Uuid) -> Result<Option<User>>;
    async fn update(&self, id: Uuid, request: UpdateUserRequest) -> Result<User>;
    /// Atomically set role and elevation-request flag
    async fn set_role_state(
        &self,
        id: Uuid,
        role: UserRole,
        elevation_requested: bool,
    ) -> Result<User>;
    async fn list_elevation_requests(&self) -> Result<Vec<User>>;
}

/// Event rows
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create(&self, event: NewEvent) -> Result<Event>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;
    async fn update(&self, id: Uuid, patch: UpdateEventRequest) -> Result<Event>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn set_approved(&self, id: Uuid) -> Result<Event>;
    async fn list_approved(&self, category: Option<EventCategory>) -> Result<Vec<Event>>;
    async fn list_pending(&self) -> Result<Vec<Event>>;
    async fn list_by_organizer(&self, organizer_id: Uuid) -> Result<Vec<Event>>;
    /// Apply a star-count delta, floored at zero; returns the new count
    async fn adjust_star_count(&self, id: Uuid, delta: i64) -> Result<i64>;
    /// Read-repair: recompute `star_count` from the starred_events rows.
    /// Returns the number of drifted rows that were corrected.
    async fn reconcile_star_counts(&self) -> Result<u64>;
}

/// Star join rows, unique per (user, event) pair
#[async_trait]
pub trait StarStore: Send + Sync {
    /// Insert a star row; a duplicate pair is a `Conflict`
    async fn insert(&self, user_id: Uuid, event_id: Uuid) -> Result<StarredEvent>;
    /// Delete a star row; returns false when no such row existed
    async fn delete(&self, user_id: Uuid, event_id: Uuid) -> Result<bool>;
    async fn exists(&self, user_id: Uuid, event_id: Uuid) -> Result<bool>;
    async fn count_for_event(&self, event_id: Uuid) -> Result<i64>;
    async fn event_ids_for_user(&self, user_id: Uuid) -> Result<Vec<Uuid>>;
}

/// Append-only update rows
#[async_trait]
pub trait UpdateStore: Send + Sync {
    async fn insert_festival(&self, admin_id: Uuid, message: String) -> Result<FestivalUpdate>;
    async fn insert_event(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        message: String,
    ) -> Result<EventUpdate>;
    async fn recent_festival(&self, limit: i64) -> Result<Vec<FestivalUpdate>>;
    async fn recent_event(&self, limit: i64) -> Result<Vec<EventUpdate>>;
    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<EventUpdate>>;
}

/// The set of store handles the services are wired with
#[derive(Clone)]
pub struct Datastore {
    pub users: Arc<dyn UserStore>,
    pub events: Arc<dyn EventStore>,
    pub stars: Arc<dyn StarStore>,
    pub updates: Arc<dyn UpdateStore>,
}

impl Datastore {
    /// Postgres-backed stores over a shared pool
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            events: Arc::new(PgEventStore::new(pool.clone())),
            stars: Arc::new(PgStarStore::new(pool.clone())),
            updates: Arc::new(PgUpdateStore::new(pool)),
        }
    }
}
