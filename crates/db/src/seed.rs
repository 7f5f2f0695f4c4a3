//! Idempotent startup seeding of roles and lookup data.

use roster_core::lookup::{DEFAULT_DEPARTMENTS, DEFAULT_DESIGNATIONS};
use roster_core::roles::SEEDED_ROLES;
use roster_core::types::new_id;
use sqlx::PgPool;

use crate::repositories::RoleRepo;

/// Ensure every well-known role exists. Returns how many were created.
pub async fn seed_roles(pool: &PgPool) -> Result<usize, sqlx::Error> {
    let mut created = 0;
    for name in SEEDED_ROLES {
        if RoleRepo::ensure(pool, name).await? {
            tracing::info!(role = %name, "Seeded role");
            created += 1;
        }
    }
    Ok(created)
}

/// Populate `departments` and `designations` with defaults, but only when a
/// table is empty. Both tables are filled in one transaction.
///
/// Returns `(departments_inserted, designations_inserted)`.
pub async fn seed_lookup_data(pool: &PgPool) -> Result<(usize, usize), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let departments = seed_table(&mut tx, "departments", DEFAULT_DEPARTMENTS).await?;
    let designations = seed_table(&mut tx, "designations", DEFAULT_DESIGNATIONS).await?;

    tx.commit().await?;

    if departments + designations > 0 {
        tracing::info!(departments, designations, "Seeded lookup data");
    }
    Ok((departments, designations))
}

async fn seed_table(
    conn: &mut sqlx::PgConnection,
    table: &str,
    names: &[&str],
) -> Result<usize, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&mut *conn)
        .await?;
    if count > 0 {
        return Ok(0);
    }

    let insert = format!("INSERT INTO {table} (id, name) VALUES ($1, $2)");
    for name in names {
        sqlx::query(&insert)
            .bind(new_id())
            .bind(*name)
            .execute(&mut *conn)
            .await?;
    }
    Ok(names.len())
}
