//! FestHub
//!
//! Backend for a college-festival event management application: browsing
//! and starring events, posting updates, and the role-gated admin approval
//! workflow for events and organizer elevation. Persistence, auth, and
//! live notification delivery are delegated to hosted collaborators behind
//! explicit interfaces; the workflow engine itself is pure and testable.

pub mod config;
pub mod feed;
pub mod identity;
pub mod lifecycle;
pub mod media;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{FestHubError, Result};

// Re-export main components for easy access
pub use feed::NotificationFeed;
pub use lifecycle::Actor;
pub use services::ServiceFactory;
pub use store::Datastore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
