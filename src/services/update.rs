//! Update service implementation
//!
//! Posts festival-wide and per-event updates and assembles the initial
//! notification feed. Festival updates are admin-only; event updates
//! follow the event's edit rule (organizer-owner or admin).

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::feed::NotificationFeed;
use crate::lifecycle::{self, Actor};
use crate::models::{EventUpdate, FestivalUpdate, UserRole};
use crate::store::{EventStore, UpdateStore};
use crate::utils::errors::{FestHubError, Result};

/// Update service for the two append-only update streams
#[derive(Clone)]
pub struct UpdateService {
    updates: Arc<dyn UpdateStore>,
    events: Arc<dyn EventStore>,
    fetch_limit: i64,
}

impl UpdateService {
    /// Create a new UpdateService instance
    pub fn new(
        updates: Arc<dyn UpdateStore>,
        events: Arc<dyn EventStore>,
        fetch_limit: i64,
    ) -> Self {
        Self {
            updates,
            events,
            fetch_limit,
        }
    }

    /// Post a festival-wide announcement; admin only
    pub async fn post_festival_update(
        &self,
        actor: &Actor,
        message: String,
    ) -> Result<FestivalUpdate> {
        if actor.role != UserRole::Admin {
            return Err(FestHubError::Authorization(
                "only admins can post festival updates".to_string(),
            ));
        }
        let message = validated_message(message)?;

        let update = self.updates.insert_festival(actor.user_id, message).await?;
        info!(update_id = %update.id, admin_id = %actor.user_id, "Festival update posted");
        Ok(update)
    }

    /// Post an update on an event; organizer-owner or admin only
    pub async fn post_event_update(
        &self,
        event_id: Uuid,
        actor: &Actor,
        message: String,
    ) -> Result<EventUpdate> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(FestHubError::EventNotFound { event_id })?;
        lifecycle::authorize_edit(&event, actor)?;
        let message = validated_message(message)?;

        let update = self
            .updates
            .insert_event(event_id, actor.user_id, message)
            .await?;
        info!(update_id = %update.id, event_id = %event_id, user_id = %actor.user_id, "Event update posted");
        Ok(update)
    }

    /// Updates posted on a single event, newest first
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<EventUpdate>> {
        self.updates.list_for_event(event_id).await
    }

    /// Assemble the initial notification feed from both streams
    ///
    /// A failed stream fetch degrades to a partial feed rather than an
    /// error; live inserts are pushed on top by the change feed pump.
    pub async fn load_feed(&self) -> NotificationFeed {
        debug!(limit = self.fetch_limit, "Loading notification feed");
        let festival = self.updates.recent_festival(self.fetch_limit).await;
        let event = self.updates.recent_event(self.fetch_limit).await;
        NotificationFeed::from_partial(festival, event)
    }
}

fn validated_message(message: String) -> Result<String> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(FestHubError::Validation("message cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
