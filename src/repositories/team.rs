use sqlx::PgPool;
use uuid::Uuid;

use crate::models::team::{Team, TeamInvite, TeamMember};
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the team row and all member rows in one transaction: the
    /// leader as accepted member 0, invitees pending in submission
    /// order. A (leader, name) unique violation bubbles up for the
    /// service to map to Conflict.
    pub async fn create_with_members(
        &self,
        name: &str,
        leader_id: Uuid,
        size: i32,
        invitee_ids: &[Uuid],
    ) -> Result<Team, AppError> {
        let mut tx = self.pool.begin().await?;

        let team = sqlx::query_as::<_, Team>(
            "INSERT INTO teams (name, leader_id, size) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(leader_id)
        .bind(size)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO team_members (team_id, user_id, status, position) VALUES ($1, $2, 'accepted', 0)",
        )
        .bind(team.id)
        .bind(leader_id)
        .execute(&mut *tx)
        .await?;

        for (i, invitee_id) in invitee_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO team_members (team_id, user_id, status, position) VALUES ($1, $2, 'pending', $3)",
            )
            .bind(team.id)
            .bind(invitee_id)
            .bind((i + 1) as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(team)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, AppError> {
        let team = sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(team)
    }

    pub async fn members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, AppError> {
        let members = sqlx::query_as::<_, TeamMember>(
            "SELECT * FROM team_members WHERE team_id = $1 ORDER BY position",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Teams where the user still has a pending invite, with leader
    /// display info for the invite list.
    pub async fn pending_invites_for(&self, user_id: Uuid) -> Result<Vec<TeamInvite>, AppError> {
        let invites = sqlx::query_as::<_, TeamInvite>(
            r#"
            SELECT t.id AS team_id, t.name AS team_name, t.size,
                   u.id AS leader_id, u.name AS leader_name, u.email AS leader_email
            FROM team_members m
            JOIN teams t ON t.id = m.team_id
            JOIN users u ON u.id = t.leader_id
            WHERE m.user_id = $1 AND m.status = 'pending'
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invites)
    }

    /// Accept: pending -> accepted, scoped to the caller's own pending
    /// row. Zero rows means there was no invite to accept.
    pub async fn accept_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE team_members SET status = 'accepted' WHERE team_id = $1 AND user_id = $2 AND status = 'pending'",
        )
        .bind(team_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Reject: the pending row is removed outright.
    pub async fn remove_pending_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM team_members WHERE team_id = $1 AND user_id = $2 AND status = 'pending'",
        )
        .bind(team_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
