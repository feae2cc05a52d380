use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{UpdateProfileRequest, User};
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert by Firebase identity. The profile row is created on first
    /// token exchange and refreshed with the latest claims afterwards.
    pub async fn upsert_by_firebase_uid(
        &self,
        firebase_uid: &str,
        name: &str,
        email: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (firebase_uid, name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (firebase_uid)
            DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email, updated_at = now()
            RETURNING *
            "#,
        )
        .bind(firebase_uid)
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_firebase_uid(&self, firebase_uid: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE firebase_uid = $1")
            .bind(firebase_uid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                skills = COALESCE($4, skills),
                portfolio_url = COALESCE($5, portfolio_url),
                saved_events = COALESCE($6, saved_events),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name)
        .bind(request.phone)
        .bind(request.skills)
        .bind(request.portfolio_url)
        .bind(request.saved_events)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Case-insensitive substring search over name or email, capped at 5
    /// results. Used by the team-invite picker.
    pub async fn search(&self, query: &str) -> Result<Vec<User>, AppError> {
        let pattern = format!("%{}%", query);
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE name ILIKE $1 OR email ILIKE $1 ORDER BY name LIMIT 5",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Resolve a batch of ids, preserving only the ones that exist.
    pub async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
