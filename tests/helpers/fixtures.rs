//! Test fixtures and builders

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

use festhub::config::Settings;
use festhub::models::{CreateEventRequest, CreateUserRequest, EventCategory};
use festhub::services::ServiceFactory;

use super::memory::{MemoryObjectStore, MemoryStore};

/// Wire a full service factory over a shared in-memory store
pub fn setup_services() -> (MemoryStore, MemoryObjectStore, ServiceFactory) {
    let store = MemoryStore::new();
    let media = MemoryObjectStore::new();
    let services = ServiceFactory::with_media(
        store.datastore(),
        Arc::new(media.clone()),
        &Settings::default(),
    );
    (store, media, services)
}

pub fn create_user_request() -> CreateUserRequest {
    CreateUserRequest {
        auth_id: Uuid::new_v4(),
        name: Name().fake(),
        email: SafeEmail().fake(),
        phone: None,
        college: Some("State Engineering College".to_string()),
        department: None,
        course: None,
        admission_year: Some(2023),
        passout_year: Some(2027),
    }
}

/// The canonical valid submission used across workflow tests
pub fn hackathon_request() -> CreateEventRequest {
    CreateEventRequest {
        name: "Hackathon".to_string(),
        category: Some(EventCategory::Competition),
        date: NaiveDate::from_ymd_opt(2025, 5, 1),
        time: NaiveTime::from_hms_opt(9, 0, 0),
        venue: "Hall A".to_string(),
        department: None,
        college: None,
        description: Some("24-hour build sprint".to_string()),
        image_url: None,
    }
}

pub fn event_request(name: &str, category: EventCategory) -> CreateEventRequest {
    CreateEventRequest {
        name: name.to_string(),
        category: Some(category),
        date: NaiveDate::from_ymd_opt(2025, 5, 2),
        time: NaiveTime::from_hms_opt(14, 30, 0),
        venue: "Main Ground".to_string(),
        department: None,
        college: None,
        description: None,
        image_url: None,
    }
}
