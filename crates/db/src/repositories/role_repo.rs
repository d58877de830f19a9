//! Lookups against the seeded `roles` table (`staff`, `member`).

use libris_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

const ROLE_COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Read-only access to roles. Roles are seeded by migration and never
/// written at runtime.
pub struct RoleRepo;

impl RoleRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let sql = format!("SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact match on `name`, e.g. [`libris_core::roles::ROLE_STAFF`].
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let sql = format!("SELECT {ROLE_COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&sql)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Name of the role a user points at, as embedded in tokens and user
    /// payloads. A dangling id reads as `"unknown"`.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(pool)
            .await?;
        Ok(name.unwrap_or_else(|| "unknown".to_string()))
    }
}
