//! Postgres star store implementation

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::StarredEvent;
use crate::store::{DatabasePool, StarStore};
use crate::utils::errors::{FestHubError, Result};

#[derive(Clone)]
pub struct PgStarStore {
    pool: DatabasePool,
}

impl PgStarStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StarStore for PgStarStore {
    async fn insert(&self, user_id: Uuid, event_id: Uuid) -> Result<StarredEvent> {
        let star = sqlx::query_as::<_, StarredEvent>(
            r#"
            INSERT INTO starred_events (id, user_id, event_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, event_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(event_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => FestHubError::Conflict(
                format!("event {event_id} is already starred by user {user_id}"),
            ),
            _ => FestHubError::Database(err),
        })?;

        Ok(star)
    }

    async fn delete(&self, user_id: Uuid, event_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM starred_events WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, user_id: Uuid, event_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM starred_events WHERE user_id = $1 AND event_id = $2)",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn count_for_event(&self, event_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM starred_events WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn event_ids_for_user(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT event_id FROM starred_events WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
