//! Postgres event store implementation

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{Event, EventCategory, NewEvent, UpdateEventRequest};
use crate::store::{DatabasePool, EventStore};
use crate::utils::errors::{FestHubError, Result};

const EVENT_COLUMNS: &str = "id, name, category, organizer_id, date, time, venue, department, \
     college, description, image_url, is_approved, star_count, created_at, updated_at";

#[derive(Clone)]
pub struct PgEventStore {
    pool: DatabasePool,
}

impl PgEventStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn create(&self, event: NewEvent) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (id, name, category, organizer_id, date, time, venue, department,
                                college, description, image_url, is_approved, star_count,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 0, $13, $13)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(event.name)
        .bind(event.category)
        .bind(event.organizer_id)
        .bind(event.date)
        .bind(event.time)
        .bind(event.venue)
        .bind(event.department)
        .bind(event.college)
        .bind(event.description)
        .bind(event.image_url)
        .bind(event.is_approved)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update(&self, id: Uuid, patch: UpdateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                date = COALESCE($4, date),
                time = COALESCE($5, time),
                venue = COALESCE($6, venue),
                department = COALESCE($7, department),
                college = COALESCE($8, college),
                description = COALESCE($9, description),
                image_url = COALESCE($10, image_url),
                updated_at = $11
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.category)
        .bind(patch.date)
        .bind(patch.time)
        .bind(patch.venue)
        .bind(patch.department)
        .bind(patch.college)
        .bind(patch.description)
        .bind(patch.image_url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(FestHubError::EventNotFound { event_id: id })?;

        Ok(event)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_approved(&self, id: Uuid) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET is_approved = true, updated_at = $2
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(FestHubError::EventNotFound { event_id: id })?;

        Ok(event)
    }

    async fn list_approved(&self, category: Option<EventCategory>) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE is_approved = true AND ($1::text IS NULL OR category = $1)
            ORDER BY date ASC, time ASC
            "#
        ))
        .bind(category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn list_pending(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE is_approved = false ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn list_by_organizer(&self, organizer_id: Uuid) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE organizer_id = $1 ORDER BY date ASC, time ASC"
        ))
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn adjust_star_count(&self, id: Uuid, delta: i64) -> Result<i64> {
        // Floored at zero so concurrent double-decrements cannot drive the
        // counter negative.
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE events
            SET star_count = GREATEST(star_count + $2, 0), updated_at = $3
            WHERE id = $1
            RETURNING star_count
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(FestHubError::EventNotFound { event_id: id })?;

        Ok(count)
    }

    async fn reconcile_star_counts(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE events e
            SET star_count = s.actual, updated_at = $1
            FROM (
                SELECT e2.id, COUNT(se.id) AS actual
                FROM events e2
                LEFT JOIN starred_events se ON se.event_id = e2.id
                GROUP BY e2.id
            ) s
            WHERE e.id = s.id AND e.star_count <> s.actual
            "#,
        )
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
