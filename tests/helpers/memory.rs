//! In-memory store implementations for integration tests
//!
//! Mirrors the Postgres stores' semantics: unique star pairs, star counts
//! floored at zero, COALESCE-style patches, and the read-repair pass.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use festhub::media::ObjectStore;
use festhub::models::{
    CreateUserRequest, Event, EventCategory, EventUpdate, FestivalUpdate, NewEvent, StarredEvent,
    UpdateEventRequest, UpdateUserRequest, User, UserRole,
};
use festhub::store::{Datastore, EventStore, StarStore, UpdateStore, UserStore};
use festhub::utils::errors::{FestHubError, Result};

fn stream_down() -> FestHubError {
    FestHubError::Io(std::io::Error::new(std::io::ErrorKind::Other, "stream down"))
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    events: HashMap<Uuid, Event>,
    stars: Vec<StarredEvent>,
    festival_updates: Vec<FestivalUpdate>,
    event_updates: Vec<EventUpdate>,
    fail_festival_fetch: bool,
    fail_event_fetch: bool,
}

/// One shared backing state implementing every store trait
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn datastore(&self) -> Datastore {
        Datastore {
            users: Arc::new(self.clone()),
            events: Arc::new(self.clone()),
            stars: Arc::new(self.clone()),
            updates: Arc::new(self.clone()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store lock")
    }

    /// Insert a user with an explicit role, bypassing the attendee default
    pub fn seed_user_with_role(&self, role: UserRole) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            auth_id: Uuid::new_v4(),
            name: "Seeded User".to_string(),
            email: "seeded@college.edu".to_string(),
            phone: None,
            college: None,
            department: None,
            course: None,
            admission_year: None,
            passout_year: None,
            role,
            role_elevation_requested: false,
            created_at: now,
            updated_at: now,
        };
        self.lock().users.insert(user.id, user.clone());
        user
    }

    /// Force the given star count, simulating drift from a lost update
    pub fn force_star_count(&self, event_id: Uuid, count: i64) {
        if let Some(event) = self.lock().events.get_mut(&event_id) {
            event.star_count = count;
        }
    }

    pub fn set_fail_festival_fetch(&self, fail: bool) {
        self.lock().fail_festival_fetch = fail;
    }

    pub fn set_fail_event_fetch(&self, fail: bool) {
        self.lock().fail_event_fetch = fail;
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, request: CreateUserRequest) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            auth_id: request.auth_id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            college: request.college,
            department: request.department,
            course: request.course,
            admission_year: request.admission_year,
            passout_year: request.passout_year,
            role: UserRole::Attendee,
            role_elevation_requested: false,
            created_at: now,
            updated_at: now,
        };
        self.lock().users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn find_by_auth_id(&self, auth_id: Uuid) -> Result<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.auth_id == auth_id)
            .cloned())
    }

    async fn update(&self, id: Uuid, request: UpdateUserRequest) -> Result<User> {
        let mut inner = self.lock();
        let user = inner
            .users
            .get_mut(&id)
            .ok_or(FestHubError::UserNotFound { user_id: id })?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(phone) = request.phone {
            user.phone = Some(phone);
        }
        if let Some(college) = request.college {
            user.college = Some(college);
        }
        if let Some(department) = request.department {
            user.department = Some(department);
        }
        if let Some(course) = request.course {
            user.course = Some(course);
        }
        if let Some(admission_year) = request.admission_year {
            user.admission_year = Some(admission_year);
        }
        if let Some(passout_year) = request.passout_year {
            user.passout_year = Some(passout_year);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_role_state(
        &self,
        id: Uuid,
        role: UserRole,
        elevation_requested: bool,
    ) -> Result<User> {
        let mut inner = self.lock();
        let user = inner
            .users
            .get_mut(&id)
            .ok_or(FestHubError::UserNotFound { user_id: id })?;
        user.role = role;
        user.role_elevation_requested = elevation_requested;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn list_elevation_requests(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self
            .lock()
            .users
            .values()
            .filter(|u| u.role_elevation_requested)
            .cloned()
            .collect();
        users.sort_by_key(|u| u.updated_at);
        Ok(users)
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create(&self, event: NewEvent) -> Result<Event> {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            name: event.name,
            category: event.category,
            organizer_id: event.organizer_id,
            date: event.date,
            time: event.time,
            venue: event.venue,
            department: event.department,
            college: event.college,
            description: event.description,
            image_url: event.image_url,
            is_approved: event.is_approved,
            star_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.lock().events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        Ok(self.lock().events.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, patch: UpdateEventRequest) -> Result<Event> {
        let mut inner = self.lock();
        let event = inner
            .events
            .get_mut(&id)
            .ok_or(FestHubError::EventNotFound { event_id: id })?;

        if let Some(name) = patch.name {
            event.name = name;
        }
        if let Some(category) = patch.category {
            event.category = category;
        }
        if let Some(date) = patch.date {
            event.date = date;
        }
        if let Some(time) = patch.time {
            event.time = time;
        }
        if let Some(venue) = patch.venue {
            event.venue = venue;
        }
        if let Some(department) = patch.department {
            event.department = Some(department);
        }
        if let Some(college) = patch.college {
            event.college = Some(college);
        }
        if let Some(description) = patch.description {
            event.description = Some(description);
        }
        if let Some(image_url) = patch.image_url {
            event.image_url = Some(image_url);
        }
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut inner = self.lock();
        inner.events.remove(&id);
        inner.stars.retain(|s| s.event_id != id);
        inner.event_updates.retain(|u| u.event_id != id);
        Ok(())
    }

    async fn set_approved(&self, id: Uuid) -> Result<Event> {
        let mut inner = self.lock();
        let event = inner
            .events
            .get_mut(&id)
            .ok_or(FestHubError::EventNotFound { event_id: id })?;
        event.is_approved = true;
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    async fn list_approved(&self, category: Option<EventCategory>) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .lock()
            .events
            .values()
            .filter(|e| e.is_approved && category.map_or(true, |c| e.category == c))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.date, e.time));
        Ok(events)
    }

    async fn list_pending(&self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .lock()
            .events
            .values()
            .filter(|e| !e.is_approved)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.created_at);
        Ok(events)
    }

    async fn list_by_organizer(&self, organizer_id: Uuid) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .lock()
            .events
            .values()
            .filter(|e| e.organizer_id == organizer_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.date, e.time));
        Ok(events)
    }

    async fn adjust_star_count(&self, id: Uuid, delta: i64) -> Result<i64> {
        let mut inner = self.lock();
        let event = inner
            .events
            .get_mut(&id)
            .ok_or(FestHubError::EventNotFound { event_id: id })?;
        event.star_count = (event.star_count + delta).max(0);
        event.updated_at = Utc::now();
        Ok(event.star_count)
    }

    async fn reconcile_star_counts(&self) -> Result<u64> {
        let mut inner = self.lock();
        let counts: HashMap<Uuid, i64> =
            inner.stars.iter().fold(HashMap::new(), |mut acc, star| {
                *acc.entry(star.event_id).or_insert(0) += 1;
                acc
            });

        let mut repaired = 0;
        for event in inner.events.values_mut() {
            let actual = counts.get(&event.id).copied().unwrap_or(0);
            if event.star_count != actual {
                event.star_count = actual;
                event.updated_at = Utc::now();
                repaired += 1;
            }
        }
        Ok(repaired)
    }
}

#[async_trait]
impl StarStore for MemoryStore {
    async fn insert(&self, user_id: Uuid, event_id: Uuid) -> Result<StarredEvent> {
        let mut inner = self.lock();
        if inner
            .stars
            .iter()
            .any(|s| s.user_id == user_id && s.event_id == event_id)
        {
            return Err(FestHubError::Conflict(format!(
                "event {event_id} is already starred by user {user_id}"
            )));
        }

        let star = StarredEvent {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            created_at: Utc::now(),
        };
        inner.stars.push(star.clone());
        Ok(star)
    }

    async fn delete(&self, user_id: Uuid, event_id: Uuid) -> Result<bool> {
        let mut inner = self.lock();
        let before = inner.stars.len();
        inner
            .stars
            .retain(|s| !(s.user_id == user_id && s.event_id == event_id));
        Ok(inner.stars.len() < before)
    }

    async fn exists(&self, user_id: Uuid, event_id: Uuid) -> Result<bool> {
        Ok(self
            .lock()
            .stars
            .iter()
            .any(|s| s.user_id == user_id && s.event_id == event_id))
    }

    async fn count_for_event(&self, event_id: Uuid) -> Result<i64> {
        Ok(self
            .lock()
            .stars
            .iter()
            .filter(|s| s.event_id == event_id)
            .count() as i64)
    }

    async fn event_ids_for_user(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let mut stars: Vec<StarredEvent> = self
            .lock()
            .stars
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        stars.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stars.into_iter().map(|s| s.event_id).collect())
    }
}

#[async_trait]
impl UpdateStore for MemoryStore {
    async fn insert_festival(&self, admin_id: Uuid, message: String) -> Result<FestivalUpdate> {
        let update = FestivalUpdate {
            id: Uuid::new_v4(),
            admin_id,
            message,
            created_at: Utc::now(),
        };
        self.lock().festival_updates.push(update.clone());
        Ok(update)
    }

    async fn insert_event(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        message: String,
    ) -> Result<EventUpdate> {
        let update = EventUpdate {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            message,
            created_at: Utc::now(),
        };
        self.lock().event_updates.push(update.clone());
        Ok(update)
    }

    async fn recent_festival(&self, limit: i64) -> Result<Vec<FestivalUpdate>> {
        let inner = self.lock();
        if inner.fail_festival_fetch {
            return Err(stream_down());
        }
        let mut updates = inner.festival_updates.clone();
        updates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        updates.truncate(limit as usize);
        Ok(updates)
    }

    async fn recent_event(&self, limit: i64) -> Result<Vec<EventUpdate>> {
        let inner = self.lock();
        if inner.fail_event_fetch {
            return Err(stream_down());
        }
        let mut updates = inner.event_updates.clone();
        updates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        updates.truncate(limit as usize);
        Ok(updates)
    }

    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<EventUpdate>> {
        let mut updates: Vec<EventUpdate> = self
            .lock()
            .event_updates
            .iter()
            .filter(|u| u.event_id == event_id)
            .cloned()
            .collect();
        updates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(updates)
    }
}

/// Object store stub recording uploads and returning deterministic URLs
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    uploads: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploaded_paths(&self) -> Vec<String> {
        self.uploads
            .lock()
            .expect("memory object store lock")
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String> {
        self.uploads
            .lock()
            .expect("memory object store lock")
            .push((path.to_string(), bytes.len()));
        Ok(format!("memory://event-images/{path}"))
    }
}
