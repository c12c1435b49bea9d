//! Role elevation state machine
//!
//! Attendees may ask to become organizers; an admin resolves the request.
//! Roles only move upward, and only through an admin resolution. A repeated
//! request while one is already open is an idempotent no-op, matching the
//! behavior of the submission form it backs.

use crate::models::UserRole;
use crate::utils::errors::{FestHubError, Result};

/// Decision for a user asking to become an organizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationDecision {
    /// Set `role_elevation_requested = true`
    Request,
    /// A request is already open; nothing to persist
    AlreadyRequested,
}

/// Resolved role state for an elevation request
///
/// `role` is the role the user holds after resolution; the request flag is
/// always cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevationOutcome {
    pub role: UserRole,
    pub approved: bool,
}

/// Decide an elevation request for a user with the given role state
pub fn request_elevation(role: UserRole, already_requested: bool) -> Result<ElevationDecision> {
    match role {
        UserRole::Attendee if already_requested => Ok(ElevationDecision::AlreadyRequested),
        UserRole::Attendee => Ok(ElevationDecision::Request),
        other => Err(FestHubError::InvalidStateTransition {
            from: other.to_string(),
            to: UserRole::Organizer.to_string(),
        }),
    }
}

/// Resolve an open elevation request
///
/// Requires an admin actor. Approval promotes the user to organizer;
/// a decline leaves the role unchanged. Either way the request flag clears.
pub fn resolve_elevation(
    current_role: UserRole,
    actor_role: UserRole,
    approve: bool,
) -> Result<ElevationOutcome> {
    if actor_role != UserRole::Admin {
        return Err(FestHubError::Authorization(
            "only admins can resolve role elevation requests".to_string(),
        ));
    }

    Ok(ElevationOutcome {
        role: if approve { UserRole::Organizer } else { current_role },
        approved: approve,
    })
}
