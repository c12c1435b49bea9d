//! Event service implementation
//!
//! This service drives the event approval workflow: submission with
//! admin auto-approve, the admin approve/reject queue, owner-or-admin
//! editing, and the browse/profile listings with per-viewer star markers.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::lifecycle::{self, Actor};
use crate::media::{unique_object_name, ObjectStore};
use crate::models::{
    CreateEventRequest, Event, EventCategory, EventView, UpdateEventRequest, UserRole,
};
use crate::store::{EventStore, StarStore};
use crate::utils::errors::{FestHubError, Result};

/// Event service for the approval workflow and listings
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    stars: Arc<dyn StarStore>,
    media: Arc<dyn ObjectStore>,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(
        events: Arc<dyn EventStore>,
        stars: Arc<dyn StarStore>,
        media: Arc<dyn ObjectStore>,
    ) -> Self {
        Self { events, stars, media }
    }

    /// Submit a new event
    ///
    /// Admin submissions publish immediately; organizer submissions wait
    /// in the approval queue.
    pub async fn submit(&self, request: CreateEventRequest, actor: &Actor) -> Result<Event> {
        debug!(user_id = %actor.user_id, role = %actor.role, "Submitting event");

        let new_event = lifecycle::submit(&request, actor)?;
        let event = self.events.create(new_event).await?;

        info!(
            event_id = %event.id,
            user_id = %actor.user_id,
            approved = event.is_approved,
            "Event submitted"
        );
        Ok(event)
    }

    /// Approve a pending event, making it visible to all users
    pub async fn approve(&self, event_id: Uuid, actor: &Actor) -> Result<Event> {
        let event = self.find(event_id).await?;
        lifecycle::approve(&event, actor)?;

        let event = self.events.set_approved(event_id).await?;
        info!(event_id = %event_id, admin_id = %actor.user_id, "Event approved");
        Ok(event)
    }

    /// Reject a pending event; the record is removed, not retained
    pub async fn reject(&self, event_id: Uuid, actor: &Actor) -> Result<()> {
        let event = self.find(event_id).await?;
        lifecycle::reject(&event, actor)?;

        self.events.delete(event_id).await?;
        warn!(event_id = %event_id, admin_id = %actor.user_id, "Event rejected and removed");
        Ok(())
    }

    /// Edit an event; owner or admin only, approval state untouched
    pub async fn edit(
        &self,
        event_id: Uuid,
        actor: &Actor,
        patch: UpdateEventRequest,
    ) -> Result<Event> {
        let event = self.find(event_id).await?;
        lifecycle::authorize_edit(&event, actor)?;

        let event = self.events.update(event_id, patch).await?;
        info!(event_id = %event_id, user_id = %actor.user_id, "Event updated");
        Ok(event)
    }

    /// Delete an event; owner or admin only
    pub async fn delete(&self, event_id: Uuid, actor: &Actor) -> Result<()> {
        let event = self.find(event_id).await?;
        lifecycle::authorize_delete(&event, actor)?;

        self.events.delete(event_id).await?;
        info!(event_id = %event_id, user_id = %actor.user_id, "Event deleted");
        Ok(())
    }

    /// Get an event by id
    pub async fn find(&self, event_id: Uuid) -> Result<Event> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(FestHubError::EventNotFound { event_id })
    }

    /// Get an event together with the viewer's star marker
    pub async fn find_for_viewer(&self, event_id: Uuid, viewer: Option<Uuid>) -> Result<EventView> {
        let event = self.find(event_id).await?;
        let is_starred = match viewer {
            Some(user_id) => self.stars.exists(user_id, event_id).await?,
            None => false,
        };
        Ok(EventView { event, is_starred })
    }

    /// Browse listing: approved events, optionally filtered by category,
    /// with the viewer's star markers attached
    pub async fn list_approved(
        &self,
        category: Option<EventCategory>,
        viewer: Option<Uuid>,
    ) -> Result<Vec<EventView>> {
        let events = self.events.list_approved(category).await?;

        let starred: HashSet<Uuid> = match viewer {
            Some(user_id) => self
                .stars
                .event_ids_for_user(user_id)
                .await?
                .into_iter()
                .collect(),
            None => HashSet::new(),
        };

        Ok(events
            .into_iter()
            .map(|event| {
                let is_starred = starred.contains(&event.id);
                EventView { event, is_starred }
            })
            .collect())
    }

    /// Admin dashboard listing: events awaiting approval
    pub async fn list_pending(&self, actor: &Actor) -> Result<Vec<Event>> {
        if actor.role != UserRole::Admin {
            return Err(FestHubError::Authorization(
                "only admins can view the approval queue".to_string(),
            ));
        }
        self.events.list_pending().await
    }

    /// Profile listing: events created by an organizer
    pub async fn list_by_organizer(&self, organizer_id: Uuid) -> Result<Vec<Event>> {
        self.events.list_by_organizer(organizer_id).await
    }

    /// Upload an event image and attach its public URL
    ///
    /// Same authorization rule as editing. Upload failures surface as
    /// `Upload` errors without retry.
    pub async fn attach_image(
        &self,
        event_id: Uuid,
        actor: &Actor,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<Event> {
        let event = self.find(event_id).await?;
        lifecycle::authorize_edit(&event, actor)?;

        let path = format!("{}/{}", actor.user_id, unique_object_name(file_name));
        let url = self.media.upload(&path, bytes, content_type).await?;

        let patch = UpdateEventRequest {
            image_url: Some(url),
            ..Default::default()
        };
        let event = self.events.update(event_id, patch).await?;
        info!(event_id = %event_id, user_id = %actor.user_id, "Event image attached");
        Ok(event)
    }
}
