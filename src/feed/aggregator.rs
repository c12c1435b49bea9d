//! Notification feed aggregation
//!
//! Merges the festival-wide and per-event update streams into one
//! time-ordered, deduplicated feed with read/unread tracking against a
//! client-held last-read timestamp. The feed is owned and mutated by a
//! single task; there is no interior locking.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::models::{EventUpdate, FestivalUpdate};
use crate::utils::errors::Result;

/// Which stream a feed item came from.
///
/// Declaration order is the tie-break rule: on identical timestamps,
/// festival updates sort ahead of event updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateSource {
    Festival,
    Event,
}

/// One entry of the merged notification feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub source: UpdateSource,
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub author_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<FestivalUpdate> for FeedItem {
    fn from(update: FestivalUpdate) -> Self {
        Self {
            source: UpdateSource::Festival,
            id: update.id,
            event_id: None,
            author_id: update.admin_id,
            message: update.message,
            created_at: update.created_at,
        }
    }
}

impl From<EventUpdate> for FeedItem {
    fn from(update: EventUpdate) -> Self {
        Self {
            source: UpdateSource::Event,
            id: update.id,
            event_id: Some(update.event_id),
            author_id: update.user_id,
            message: update.message,
            created_at: update.created_at,
        }
    }
}

/// Merged, viewer-scoped notification feed
#[derive(Debug, Default)]
pub struct NotificationFeed {
    items: Vec<FeedItem>,
    seen: HashSet<(UpdateSource, Uuid)>,
    last_read: Option<DateTime<Utc>>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a feed from both backing streams
    pub fn from_streams(festival: Vec<FestivalUpdate>, event: Vec<EventUpdate>) -> Self {
        let mut feed = Self::new();
        let mut items: Vec<FeedItem> = Vec::with_capacity(festival.len() + event.len());
        items.extend(festival.into_iter().map(FeedItem::from));
        items.extend(event.into_iter().map(FeedItem::from));
        items.retain(|item| feed.seen.insert((item.source, item.id)));

        // Newest first; ties resolve festival-before-event, then arrival
        // order (the sort is stable).
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.source.cmp(&b.source)));
        feed.items = items;
        feed
    }

    /// Build a feed tolerating the failure of either stream fetch
    ///
    /// A failed stream degrades to empty so the surviving stream still
    /// renders.
    pub fn from_partial(
        festival: Result<Vec<FestivalUpdate>>,
        event: Result<Vec<EventUpdate>>,
    ) -> Self {
        let festival = festival.unwrap_or_else(|e| {
            warn!(error = %e, "Festival updates fetch failed, rendering partial feed");
            Vec::new()
        });
        let event = event.unwrap_or_else(|e| {
            warn!(error = %e, "Event updates fetch failed, rendering partial feed");
            Vec::new()
        });
        Self::from_streams(festival, event)
    }

    /// Restore the client-held last-read marker
    pub fn set_last_read(&mut self, last_read: Option<DateTime<Utc>>) {
        self.last_read = last_read;
    }

    pub fn last_read(&self) -> Option<DateTime<Utc>> {
        self.last_read
    }

    /// Live-append an incoming insert from the change feed
    ///
    /// The item is prepended and the unread badge moves in the same call;
    /// the returned reference is what the caller raises as a toast, so the
    /// two can never be observed apart. Duplicates are dropped.
    pub fn push(&mut self, item: FeedItem) -> Option<&FeedItem> {
        if !self.seen.insert((item.source, item.id)) {
            return None;
        }
        self.items.insert(0, item);
        self.items.first()
    }

    /// Items, newest first
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count of items newer than the last-read marker
    ///
    /// With no marker every item is unread.
    pub fn unread_count(&self) -> usize {
        match self.last_read {
            None => self.items.len(),
            Some(ts) => self.items.iter().filter(|item| item.created_at > ts).count(),
        }
    }

    /// Mark the feed read as of `now`
    ///
    /// Called once per view-open, not per item.
    pub fn mark_read(&mut self, now: DateTime<Utc>) {
        self.last_read = Some(now);
    }
}
