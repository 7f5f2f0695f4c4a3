//! Startup provisioning of the first administrator account.

use roster_core::account::{validate_password, validate_username};
use roster_core::employee::validate_email;
use roster_core::roles::ROLE_ADMIN;
use roster_db::models::user::CreateUser;
use roster_db::repositories::{RoleRepo, UserRepo};
use sqlx::PgPool;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// What [`ensure_admin`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminBootstrapOutcome {
    Created,
    /// The account existed with another role and now holds `admin`.
    Promoted,
    AlreadyAdmin,
}

/// Make sure the configured account exists and holds the `admin` role.
///
/// An existing account keeps its password and email; only its role changes.
/// Roles must already be seeded.
pub async fn ensure_admin(
    pool: &PgPool,
    admin: &AdminBootstrap,
) -> AppResult<AdminBootstrapOutcome> {
    validate_username(&admin.username)?;
    validate_email(&admin.email)?;
    validate_password(&admin.password)?;

    let role = RoleRepo::find_by_name(pool, ROLE_ADMIN)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Role '{ROLE_ADMIN}' is not seeded")))?;

    if let Some(user) = UserRepo::find_by_username(pool, &admin.username).await? {
        if user.role_id == role.id {
            return Ok(AdminBootstrapOutcome::AlreadyAdmin);
        }
        UserRepo::set_role(pool, user.id, role.id).await?;
        tracing::warn!(
            user_id = %user.id,
            username = %user.username,
            "Promoted existing account to admin"
        );
        return Ok(AdminBootstrapOutcome::Promoted);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Created bootstrap admin");
    Ok(AdminBootstrapOutcome::Created)
}
