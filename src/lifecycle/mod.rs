//! Event lifecycle engine
//!
//! Pure decision logic for the event approval workflow and the role
//! elevation workflow. Every operation is a function of the current
//! persisted state, the acting principal and the request; no I/O, no
//! clock, no ambient auth state. Callers apply the returned decisions
//! through the store layer.

pub mod elevation;
pub mod event;

pub use elevation::{request_elevation, resolve_elevation, ElevationDecision, ElevationOutcome};
pub use event::{authorize_delete, authorize_edit, submit, approve, reject, EventState};

use uuid::Uuid;

use crate::models::{User, UserRole};

/// The acting principal for a lifecycle operation
///
/// Passed explicitly into every engine call so the engine never reads
/// ambient session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
        }
    }
}
