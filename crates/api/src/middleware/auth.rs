//! Bearer-token identity for roster handlers.
//!
//! Every route except `/health`, `/auth/register` and `/auth/login` takes an
//! [`AuthUser`] (directly or through the RBAC wrappers), so the token carries
//! everything a handler needs: the account id, its username, and the single
//! role the account held when the token was issued.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use roster_core::error::CoreError;
use roster_core::roles::ROLE_ADMIN;
use roster_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The account behind a validated access token.
///
/// A role change made through `/auth/assign-role` only shows up here once the
/// account logs in again and receives a new token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `claims.sub`.
    pub user_id: DbId,
    pub username: String,
    pub role: String,
}

impl AuthUser {
    /// Whether the token grants department/designation writes and role management.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Pull the raw token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Authorization header is not valid text"))?;

    match value.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>",
        )),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        })
    }
}
