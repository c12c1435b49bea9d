//! Postgres user store implementation

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserRole};
use crate::store::{DatabasePool, UserStore};
use crate::utils::errors::{FestHubError, Result};

const USER_COLUMNS: &str = "id, auth_id, name, email, phone, college, department, course, \
     admission_year, passout_year, role, role_elevation_requested, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: DatabasePool,
}

impl PgUserStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, request: CreateUserRequest) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, auth_id, name, email, phone, college, department, course,
                               admission_year, passout_year, role, role_elevation_requested,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, false, $12, $12)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.auth_id)
        .bind(request.name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.college)
        .bind(request.department)
        .bind(request.course)
        .bind(request.admission_year)
        .bind(request.passout_year)
        .bind(UserRole::Attendee)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_auth_id(&self, auth_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE auth_id = $1"
        ))
        .bind(auth_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: Uuid, request: UpdateUserRequest) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                college = COALESCE($4, college),
                department = COALESCE($5, department),
                course = COALESCE($6, course),
                admission_year = COALESCE($7, admission_year),
                passout_year = COALESCE($8, passout_year),
                updated_at = $9
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.phone)
        .bind(request.college)
        .bind(request.department)
        .bind(request.course)
        .bind(request.admission_year)
        .bind(request.passout_year)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(FestHubError::UserNotFound { user_id: id })?;

        Ok(user)
    }

    async fn set_role_state(
        &self,
        id: Uuid,
        role: UserRole,
        elevation_requested: bool,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET role = $2, role_elevation_requested = $3, updated_at = $4
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(role)
        .bind(elevation_requested)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(FestHubError::UserNotFound { user_id: id })?;

        Ok(user)
    }

    async fn list_elevation_requests(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role_elevation_requested = true \
             ORDER BY updated_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
