//! Event approval state machine
//!
//! Events move Draft -> PendingApproval -> Published, with Rejected as a
//! terminal state in which the record is removed. An admin submission is
//! published immediately; everyone else waits for an explicit admin
//! approval. Editing never changes the approval state.

use crate::models::{CreateEventRequest, Event, NewEvent, UserRole};
use crate::utils::errors::{FestHubError, Result};

use super::Actor;

/// Lifecycle state of an event record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventState {
    /// Not yet persisted
    Draft,
    /// Persisted with `is_approved = false`, awaiting admin review
    PendingApproval,
    /// Persisted with `is_approved = true`, visible to all
    Published,
    /// Terminal; the record is deleted rather than retained
    Rejected,
}

impl EventState {
    pub fn of(event: &Event) -> Self {
        if event.is_approved {
            EventState::Published
        } else {
            EventState::PendingApproval
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventState::Draft => "draft",
            EventState::PendingApproval => "pending_approval",
            EventState::Published => "published",
            EventState::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for EventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a submission and compute the state it is created in
///
/// Only organizers and admins may create events. An admin submission is
/// auto-approved; any other submission lands in `PendingApproval`.
pub fn submit(request: &CreateEventRequest, actor: &Actor) -> Result<NewEvent> {
    if actor.role == UserRole::Attendee {
        return Err(FestHubError::Authorization(
            "only organizers and admins can create events".to_string(),
        ));
    }

    let mut missing = Vec::new();
    if request.name.trim().is_empty() {
        missing.push("name");
    }
    if request.category.is_none() {
        missing.push("category");
    }
    if request.date.is_none() {
        missing.push("date");
    }
    if request.time.is_none() {
        missing.push("time");
    }
    if request.venue.trim().is_empty() {
        missing.push("venue");
    }
    let (category, date, time) = match (request.category, request.date, request.time) {
        (Some(category), Some(date), Some(time)) if missing.is_empty() => (category, date, time),
        _ => {
            return Err(FestHubError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    };

    Ok(NewEvent {
        name: request.name.trim().to_string(),
        category,
        organizer_id: actor.user_id,
        date,
        time,
        venue: request.venue.trim().to_string(),
        department: request.department.clone(),
        college: request.college.clone(),
        description: request.description.clone(),
        image_url: request.image_url.clone(),
        is_approved: actor.role == UserRole::Admin,
    })
}

/// Authorize publishing a pending event
///
/// Valid only from `PendingApproval` and only for an admin actor.
pub fn approve(event: &Event, actor: &Actor) -> Result<()> {
    if actor.role != UserRole::Admin {
        return Err(FestHubError::Authorization(
            "only admins can approve events".to_string(),
        ));
    }
    match EventState::of(event) {
        EventState::PendingApproval => Ok(()),
        state => Err(FestHubError::InvalidStateTransition {
            from: state.to_string(),
            to: EventState::Published.to_string(),
        }),
    }
}

/// Authorize rejecting a pending event
///
/// Valid only from `PendingApproval` and only for an admin actor. The
/// caller deletes the record; rejection is not retained.
pub fn reject(event: &Event, actor: &Actor) -> Result<()> {
    if actor.role != UserRole::Admin {
        return Err(FestHubError::Authorization(
            "only admins can reject events".to_string(),
        ));
    }
    match EventState::of(event) {
        EventState::PendingApproval => Ok(()),
        state => Err(FestHubError::InvalidStateTransition {
            from: state.to_string(),
            to: EventState::Rejected.to_string(),
        }),
    }
}

/// Authorize editing an event
///
/// Permitted for the organizer-owner or an admin. Approval state is left
/// untouched: an admin editing someone else's pending event does not
/// approve it.
pub fn authorize_edit(event: &Event, actor: &Actor) -> Result<()> {
    if actor.user_id == event.organizer_id || actor.role == UserRole::Admin {
        Ok(())
    } else {
        Err(FestHubError::Authorization(format!(
            "user {} cannot edit event {}",
            actor.user_id, event.id
        )))
    }
}

/// Authorize deleting an event; same rule as editing
pub fn authorize_delete(event: &Event, actor: &Actor) -> Result<()> {
    if actor.user_id == event.organizer_id || actor.role == UserRole::Admin {
        Ok(())
    } else {
        Err(FestHubError::Authorization(format!(
            "user {} cannot delete event {}",
            actor.user_id, event.id
        )))
    }
}
