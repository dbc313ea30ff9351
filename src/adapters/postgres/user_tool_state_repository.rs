//! PostgreSQL implementation of UserToolStateRepository.
//!
//! The `(user_id, tool_id)` unique constraint is what makes get-or-create
//! converge: a losing concurrent insert surfaces as `UserToolStateExists`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, ToolId, UserId, UserToolStateId};
use crate::domain::playground::UserToolState;
use crate::ports::UserToolStateRepository;

const PAIR_CONSTRAINT: &str = "user_tool_state_user_tool_key";
const TOOL_FOREIGN_KEY: &str = "user_tool_state_tool_id_fkey";

#[derive(Clone)]
pub struct PostgresUserToolStateRepository {
    pool: PgPool,
}

impl PostgresUserToolStateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserToolStateRow {
    id: Uuid,
    user_id: String,
    tool_id: Uuid,
    saved_data: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserToolStateRow> for UserToolState {
    type Error = DomainError;

    fn try_from(row: UserToolStateRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?;

        Ok(UserToolState::reconstitute(
            UserToolStateId::from_uuid(row.id),
            user_id,
            ToolId::from_uuid(row.tool_id),
            row.saved_data,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

fn database_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl UserToolStateRepository for PostgresUserToolStateRepository {
    async fn find(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
    ) -> Result<Option<UserToolState>, DomainError> {
        let row: Option<UserToolStateRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, tool_id, saved_data, created_at, updated_at
            FROM user_tool_state
            WHERE user_id = $1 AND tool_id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(tool_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("fetch user tool state", e))?;

        row.map(UserToolState::try_from).transpose()
    }

    async fn create(&self, state: &UserToolState) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_tool_state (id, user_id, tool_id, saved_data, created_at, updated_at)
            VALUES ($1, $2, $3, $4::text::json, $5, $6)
            "#,
        )
        .bind(state.id().as_uuid())
        .bind(state.user_id().as_str())
        .bind(state.tool_id().as_uuid())
        .bind(state.saved_data().to_string())
        .bind(state.created_at().as_datetime())
        .bind(state.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                match db_err.constraint() {
                    Some(PAIR_CONSTRAINT) => {
                        return DomainError::new(
                            ErrorCode::UserToolStateExists,
                            "User already has state for this tool",
                        )
                    }
                    Some(TOOL_FOREIGN_KEY) => {
                        return DomainError::new(
                            ErrorCode::ToolNotFound,
                            format!("Tool not found: {}", state.tool_id()),
                        )
                    }
                    _ => {}
                }
            }
            database_error("insert user tool state", e)
        })?;

        Ok(())
    }

    async fn update(&self, state: &UserToolState) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE user_tool_state
            SET saved_data = $2::text::json, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(state.id().as_uuid())
        .bind(state.saved_data().to_string())
        .bind(state.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("update user tool state", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserToolStateNotFound,
                format!("User tool state not found: {}", state.id()),
            ));
        }

        Ok(())
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM user_tool_state WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete user tool state", e))?;

        Ok(result.rows_affected())
    }

    async fn count_for_tool(&self, tool_id: &ToolId) -> Result<u64, DomainError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_tool_state WHERE tool_id = $1")
                .bind(tool_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| database_error("count user tool state", e))?;

        Ok(count as u64)
    }
}
