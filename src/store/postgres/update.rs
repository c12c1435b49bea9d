//! Postgres update store implementation
//!
//! Inserts into both tables fire `pg_notify` triggers (see migrations), so
//! every append lands on the change feed without any extra plumbing here.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{EventUpdate, FestivalUpdate};
use crate::store::{DatabasePool, UpdateStore};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct PgUpdateStore {
    pool: DatabasePool,
}

impl PgUpdateStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UpdateStore for PgUpdateStore {
    async fn insert_festival(&self, admin_id: Uuid, message: String) -> Result<FestivalUpdate> {
        let update = sqlx::query_as::<_, FestivalUpdate>(
            r#"
            INSERT INTO festival_updates (id, admin_id, message, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, admin_id, message, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(admin_id)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(update)
    }

    async fn insert_event(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        message: String,
    ) -> Result<EventUpdate> {
        let update = sqlx::query_as::<_, EventUpdate>(
            r#"
            INSERT INTO event_updates (id, event_id, user_id, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, user_id, message, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(user_id)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(update)
    }

    async fn recent_festival(&self, limit: i64) -> Result<Vec<FestivalUpdate>> {
        let updates = sqlx::query_as::<_, FestivalUpdate>(
            "SELECT id, admin_id, message, created_at FROM festival_updates \
             ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(updates)
    }

    async fn recent_event(&self, limit: i64) -> Result<Vec<EventUpdate>> {
        let updates = sqlx::query_as::<_, EventUpdate>(
            "SELECT id, event_id, user_id, message, created_at FROM event_updates \
             ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(updates)
    }

    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<EventUpdate>> {
        let updates = sqlx::query_as::<_, EventUpdate>(
            "SELECT id, event_id, user_id, message, created_at FROM event_updates \
             WHERE event_id = $1 ORDER BY created_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(updates)
    }
}
