//! Event model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Category of a festival event, stored as lowercase text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Competition,
    Workshop,
    Stall,
    Exhibit,
    Performance,
    Lecture,
    Games,
    Food,
    Merch,
    Art,
    Sport,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Competition => "competition",
            EventCategory::Workshop => "workshop",
            EventCategory::Stall => "stall",
            EventCategory::Exhibit => "exhibit",
            EventCategory::Performance => "performance",
            EventCategory::Lecture => "lecture",
            EventCategory::Games => "games",
            EventCategory::Food => "food",
            EventCategory::Merch => "merch",
            EventCategory::Art => "art",
            EventCategory::Sport => "sport",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub category: EventCategory,
    pub organizer_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue: String,
    pub department: Option<String>,
    pub college: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_approved: bool,
    pub star_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form-shaped event submission, validated by the lifecycle engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub category: Option<EventCategory>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub venue: String,
    pub department: Option<String>,
    pub college: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Validated insert payload produced by the lifecycle engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub category: EventCategory,
    pub organizer_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue: String,
    pub department: Option<String>,
    pub college: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_approved: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub category: Option<EventCategory>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub venue: Option<String>,
    pub department: Option<String>,
    pub college: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Event joined with the viewer's star marker
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub is_starred: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StarredEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub created_at: DateTime<Utc>,
}
