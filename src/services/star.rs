//! Star service implementation
//!
//! Toggles a user's interest marker on an event and keeps the denormalized
//! `star_count` consistent. The row write and the counter write are two
//! ordered datastore calls with no cross-call transaction, so the counter
//! can drift under concurrent toggles; the periodic [`reconcile`] pass
//! recomputes it from the star rows as ground truth.
//!
//! [`reconcile`]: StarService::reconcile

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::Event;
use crate::store::{EventStore, StarStore};
use crate::utils::errors::{FestHubError, Result};

/// Star service for interest markers and count reconciliation
#[derive(Clone)]
pub struct StarService {
    events: Arc<dyn EventStore>,
    stars: Arc<dyn StarStore>,
}

impl StarService {
    /// Create a new StarService instance
    pub fn new(events: Arc<dyn EventStore>, stars: Arc<dyn StarStore>) -> Self {
        Self { events, stars }
    }

    /// Star an event for a user; returns the new star count
    ///
    /// A second star on the same pair is a `Conflict`.
    pub async fn star(&self, user_id: Uuid, event_id: Uuid) -> Result<i64> {
        debug!(user_id = %user_id, event_id = %event_id, "Starring event");

        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(FestHubError::EventNotFound { event_id });
        }

        // Row first, then counter. If the second call is lost the counter
        // undercounts until the next reconcile pass.
        self.stars.insert(user_id, event_id).await?;
        let count = self.events.adjust_star_count(event_id, 1).await?;

        info!(user_id = %user_id, event_id = %event_id, star_count = count, "Event starred");
        Ok(count)
    }

    /// Remove a user's star; returns the new star count
    ///
    /// Unstarring without a prior star is `StarNotFound` and leaves the
    /// counter untouched.
    pub async fn unstar(&self, user_id: Uuid, event_id: Uuid) -> Result<i64> {
        debug!(user_id = %user_id, event_id = %event_id, "Unstarring event");

        if !self.stars.delete(user_id, event_id).await? {
            return Err(FestHubError::StarNotFound { user_id, event_id });
        }
        let count = self.events.adjust_star_count(event_id, -1).await?;

        info!(user_id = %user_id, event_id = %event_id, star_count = count, "Event unstarred");
        Ok(count)
    }

    /// Whether the user has starred the event
    pub async fn is_starred(&self, user_id: Uuid, event_id: Uuid) -> Result<bool> {
        self.stars.exists(user_id, event_id).await
    }

    /// Profile listing: the events a user has starred, newest star first
    pub async fn starred_events(&self, user_id: Uuid) -> Result<Vec<Event>> {
        let ids = self.stars.event_ids_for_user(user_id).await?;

        let mut events = Vec::with_capacity(ids.len());
        for id in ids {
            // A star row may briefly outlive its event between the event
            // delete and the row cleanup; skip those.
            if let Some(event) = self.events.find_by_id(id).await? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Read-repair pass recomputing `star_count` from the star rows
    ///
    /// Returns the number of events whose counter had drifted.
    pub async fn reconcile(&self) -> Result<u64> {
        let repaired = self.events.reconcile_star_counts().await?;
        if repaired > 0 {
            info!(repaired = repaired, "Star counts reconciled");
        } else {
            debug!("Star counts already consistent");
        }
        Ok(repaired)
    }
}
