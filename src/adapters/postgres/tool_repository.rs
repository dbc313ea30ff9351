//! PostgreSQL implementation of ToolRepository.
//!
//! Documents are bound as text and cast to `json`, which stores the text
//! as given. Binding a `Value` directly would go through `jsonb` and lose
//! key order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, ToolId, UserId};
use crate::domain::playground::{ComponentName, Slug, Tool};
use crate::ports::{ToolFilter, ToolRepository};

const SLUG_CONSTRAINT: &str = "playground_tools_slug_key";
const COMPONENT_CONSTRAINT: &str = "playground_tools_component_name_key";

/// PostgreSQL implementation of the ToolRepository port.
#[derive(Clone)]
pub struct PostgresToolRepository {
    pool: PgPool,
}

impl PostgresToolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a tool.
#[derive(Debug, sqlx::FromRow)]
struct ToolRow {
    id: Uuid,
    name: String,
    slug: String,
    description: Option<String>,
    icon: String,
    component_name: String,
    configuration: Value,
    is_active: bool,
    owner_user_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ToolRow> for Tool {
    type Error = DomainError;

    fn try_from(row: ToolRow) -> Result<Self, Self::Error> {
        let corrupt =
            |field: &str, e: &dyn std::fmt::Display| DomainError::database(format!("Invalid {}: {}", field, e));

        let slug = Slug::parse(row.slug).map_err(|e| corrupt("slug", &e))?;
        let component_name =
            ComponentName::parse(row.component_name).map_err(|e| corrupt("component_name", &e))?;
        let owner = row
            .owner_user_id
            .map(UserId::new)
            .transpose()
            .map_err(|e| corrupt("owner_user_id", &e))?;

        Ok(Tool::reconstitute(
            ToolId::from_uuid(row.id),
            row.name,
            slug,
            row.description,
            row.icon,
            component_name,
            row.configuration,
            row.is_active,
            owner,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

const SELECT_TOOL: &str = r#"
    SELECT id, name, slug, description, icon, component_name, configuration,
           is_active, owner_user_id, created_at, updated_at
    FROM playground_tools
"#;

const RETURNING_TOOL: &str = r#"
    RETURNING id, name, slug, description, icon, component_name, configuration,
              is_active, owner_user_id, created_at, updated_at
"#;

fn tool_not_found(id: &ToolId) -> DomainError {
    DomainError::new(ErrorCode::ToolNotFound, format!("Tool not found: {}", id))
}

fn database_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl ToolRepository for PostgresToolRepository {
    async fn save(&self, tool: &Tool) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO playground_tools (
                id, name, slug, description, icon, component_name, configuration,
                is_active, owner_user_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7::text::json, $8, $9, $10, $11)
            "#,
        )
        .bind(tool.id().as_uuid())
        .bind(tool.name())
        .bind(tool.slug().as_str())
        .bind(tool.description())
        .bind(tool.icon())
        .bind(tool.component_name().as_str())
        .bind(tool.configuration().to_string())
        .bind(tool.is_active())
        .bind(tool.owner().map(UserId::as_str))
        .bind(tool.created_at().as_datetime())
        .bind(tool.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                match db_err.constraint() {
                    Some(SLUG_CONSTRAINT) => {
                        return DomainError::new(
                            ErrorCode::ToolSlugTaken,
                            format!("A tool with slug '{}' already exists", tool.slug()),
                        )
                    }
                    Some(COMPONENT_CONSTRAINT) => {
                        return DomainError::new(
                            ErrorCode::ComponentNameTaken,
                            format!(
                                "A tool with component '{}' already exists",
                                tool.component_name()
                            ),
                        )
                    }
                    _ => {}
                }
            }
            database_error("insert tool", e)
        })?;

        Ok(())
    }

    async fn replace_configuration(
        &self,
        id: &ToolId,
        configuration: &Value,
    ) -> Result<Tool, DomainError> {
        let row: Option<ToolRow> = sqlx::query_as(&format!(
            r#"
            UPDATE playground_tools
            SET configuration = $2::text::json, updated_at = $3
            WHERE id = $1 AND is_active
            {}
            "#,
            RETURNING_TOOL
        ))
        .bind(id.as_uuid())
        .bind(configuration.to_string())
        .bind(Timestamp::now().as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("replace tool configuration", e))?;

        row.map(Tool::try_from)
            .transpose()?
            .ok_or_else(|| tool_not_found(id))
    }

    async fn set_active(&self, id: &ToolId, active: bool) -> Result<Tool, DomainError> {
        let row: Option<ToolRow> = sqlx::query_as(&format!(
            r#"
            UPDATE playground_tools
            SET is_active = $2,
                updated_at = CASE WHEN is_active = $2 THEN updated_at ELSE $3 END
            WHERE id = $1
            {}
            "#,
            RETURNING_TOOL
        ))
        .bind(id.as_uuid())
        .bind(active)
        .bind(Timestamp::now().as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("set tool active flag", e))?;

        row.map(Tool::try_from)
            .transpose()?
            .ok_or_else(|| tool_not_found(id))
    }

    async fn find_by_id(&self, id: &ToolId) -> Result<Option<Tool>, DomainError> {
        let row: Option<ToolRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_TOOL))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("fetch tool", e))?;

        row.map(Tool::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tool>, DomainError> {
        let row: Option<ToolRow> = sqlx::query_as(&format!("{} WHERE slug = $1", SELECT_TOOL))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("fetch tool by slug", e))?;

        row.map(Tool::try_from).transpose()
    }

    async fn list(&self, filter: &ToolFilter) -> Result<Vec<Tool>, DomainError> {
        let rows: Vec<ToolRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE ($1::boolean IS NULL OR is_active = $1)
              AND ($2::text IS NULL OR owner_user_id = $2)
            ORDER BY name COLLATE "C", slug
            "#,
            SELECT_TOOL
        ))
        .bind(filter.active)
        .bind(filter.owner.as_ref().map(UserId::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list tools", e))?;

        rows.into_iter().map(Tool::try_from).collect()
    }

    async fn delete(&self, id: &ToolId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM playground_tools WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete tool", e))?;

        if result.rows_affected() == 0 {
            return Err(tool_not_found(id));
        }

        Ok(())
    }

    async fn clear_owner(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE playground_tools
            SET owner_user_id = NULL, updated_at = NOW()
            WHERE owner_user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("clear tool owner", e))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    const TOOLS_TABLE: &str =
        include_str!("../../../migrations/20250813000001_create_playground_tools.sql");
    const STATE_TABLE: &str =
        include_str!("../../../migrations/20250813000002_create_user_tool_state.sql");

    fn column_type<'a>(ddl: &'a str, column: &str) -> Option<&'a str> {
        ddl.lines()
            .map(str::trim)
            .find(|line| line.starts_with(column))
            .and_then(|line| line.split_whitespace().nth(1))
    }

    #[test]
    fn document_columns_store_text_as_given() {
        assert_eq!(column_type(TOOLS_TABLE, "configuration"), Some("JSON"));
        assert_eq!(column_type(STATE_TABLE, "saved_data"), Some("JSON"));
    }
}
