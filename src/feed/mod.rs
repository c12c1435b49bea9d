//! Notification feed
//!
//! The aggregator merges the festival-wide and per-event update streams
//! into one viewer-scoped feed; the listener adapts the datastore's
//! LISTEN/NOTIFY push channel into the inbound messages the aggregator
//! consumes.

pub mod aggregator;
pub mod listener;

pub use aggregator::{FeedItem, NotificationFeed, UpdateSource};
pub use listener::{PgChangeFeed, EVENT_CHANNEL, FESTIVAL_CHANNEL};
