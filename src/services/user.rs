//! User service implementation
//!
//! This service handles profile registration keyed by the identity
//! provider's auth id, profile updates, and the role elevation workflow.

use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::lifecycle::{self, Actor, ElevationDecision};
use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserRole};
use crate::store::UserStore;
use crate::utils::errors::{FestHubError, Result};

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern compiles")
    })
}

/// User service for profiles and role elevation
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Register a profile for a principal or return the existing one
    ///
    /// Every profile starts as an attendee; roles only change through the
    /// elevation workflow.
    pub async fn register_or_get(&self, request: CreateUserRequest) -> Result<User> {
        debug!(auth_id = %request.auth_id, "Attempting to register or get user");

        if let Some(existing) = self.users.find_by_auth_id(request.auth_id).await? {
            info!(user_id = %existing.id, auth_id = %request.auth_id, "User already exists");
            return Ok(existing);
        }

        if request.name.trim().is_empty() {
            return Err(FestHubError::Validation("name is required".to_string()));
        }
        if !email_pattern().is_match(&request.email) {
            return Err(FestHubError::Validation(format!(
                "invalid email address: {}",
                request.email
            )));
        }

        let user = self.users.create(request).await?;
        info!(user_id = %user.id, auth_id = %user.auth_id, "New user registered");
        Ok(user)
    }

    /// Get a user by id
    pub async fn find(&self, user_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(FestHubError::UserNotFound { user_id })
    }

    /// Get a user by the identity provider's auth id
    pub async fn find_by_auth(&self, auth_id: Uuid) -> Result<Option<User>> {
        self.users.find_by_auth_id(auth_id).await
    }

    /// Update profile fields
    pub async fn update_profile(&self, user_id: Uuid, request: UpdateUserRequest) -> Result<User> {
        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(FestHubError::Validation("name cannot be blank".to_string()));
            }
        }

        let user = self.users.update(user_id, request).await?;
        info!(user_id = %user_id, "User profile updated");
        Ok(user)
    }

    /// Ask to be elevated from attendee to organizer
    ///
    /// Repeating an open request is a no-op; organizers and admins cannot
    /// request at all.
    pub async fn request_elevation(&self, user_id: Uuid) -> Result<User> {
        let user = self.find(user_id).await?;

        match lifecycle::request_elevation(user.role, user.role_elevation_requested)? {
            ElevationDecision::AlreadyRequested => {
                debug!(user_id = %user_id, "Elevation already requested, ignoring");
                Ok(user)
            }
            ElevationDecision::Request => {
                let user = self
                    .users
                    .set_role_state(user_id, user.role, true)
                    .await?;
                info!(user_id = %user_id, "Role elevation requested");
                Ok(user)
            }
        }
    }

    /// Resolve an elevation request; admin only
    ///
    /// Approval promotes to organizer; a decline just clears the flag.
    pub async fn resolve_elevation(
        &self,
        user_id: Uuid,
        actor: &Actor,
        approve: bool,
    ) -> Result<User> {
        let user = self.find(user_id).await?;
        let outcome = lifecycle::resolve_elevation(user.role, actor.role, approve)?;

        let user = self
            .users
            .set_role_state(user_id, outcome.role, false)
            .await?;

        if outcome.approved {
            warn!(user_id = %user_id, admin_id = %actor.user_id, "User promoted to organizer");
        } else {
            info!(user_id = %user_id, admin_id = %actor.user_id, "Elevation request declined");
        }
        Ok(user)
    }

    /// Admin dashboard listing: open elevation requests
    pub async fn list_elevation_requests(&self, actor: &Actor) -> Result<Vec<User>> {
        if actor.role != UserRole::Admin {
            return Err(FestHubError::Authorization(
                "only admins can view elevation requests".to_string(),
            ));
        }
        self.users.list_elevation_requests().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(email_pattern().is_match("student@college.edu"));
        assert!(email_pattern().is_match("a.b+fest@dept.college.edu"));
        assert!(!email_pattern().is_match("not-an-email"));
        assert!(!email_pattern().is_match("missing@tld"));
        assert!(!email_pattern().is_match("spaced @college.edu"));
    }
}
