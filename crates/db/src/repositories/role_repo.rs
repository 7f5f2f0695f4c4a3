//! Repository for the `roles` table.

use roster_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::role::Role;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at";

/// Role lookups, runtime role creation, and startup seeding.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY name ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Insert a role, returning `None` if one with that name already exists.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!(
            "INSERT INTO roles (id, name) VALUES ($1, $2)
             ON CONFLICT (name) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(new_id())
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Create the role if it does not exist yet. Returns `true` if a row was inserted.
    pub async fn ensure(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        Ok(Self::create(pool, name).await?.is_some())
    }

    /// Resolve a role ID to its name, returning `"unknown"` if the ID is missing.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        Ok(Self::find_by_id(pool, role_id)
            .await?
            .map(|r| r.name)
            .unwrap_or_else(|| "unknown".to_string()))
    }
}
