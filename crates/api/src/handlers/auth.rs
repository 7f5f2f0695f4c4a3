//! Handlers for the `/auth` resource: accounts, tokens, and role management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roster_core::account::{validate_password, validate_username};
use roster_core::employee::validate_email;
use roster_core::error::CoreError;
use roster_core::roles::{validate_role_name, DEFAULT_ROLE, ROLE_ADMIN};
use roster_db::models::role::Role;
use roster_db::models::user::{CreateUser, User, UserResponse};
use roster_db::repositories::{RoleRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/add-role`.
#[derive(Debug, Deserialize)]
pub struct AddRoleRequest {
    pub name: String,
}

/// Request body for `POST /auth/assign-role`.
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub username: String,
    pub role: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account with the default role. Returns 201 with the new user.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let username = input.username.trim();
    let email = input.email.trim();
    validate_username(username)?;
    validate_email(email)?;
    validate_password(&input.password)?;

    if UserRepo::find_by_username(&state.pool, username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Username '{username}' is already taken"
        ))));
    }

    let role = RoleRepo::find_by_name(&state.pool, DEFAULT_ROLE)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Role '{DEFAULT_ROLE}' is not seeded")))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(to_response(user, role.name))))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns a bearer access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(username = %user.username, "Failed login attempt");
        return Err(invalid());
    }

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    let access_token = generate_access_token(user.id, &user.username, &role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
        user: to_response(user, role),
    }))
}

/// GET /api/v1/auth/me
///
/// The account behind the presented token.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(to_response(user, role)))
}

/// GET /api/v1/auth/roles
///
/// Every role, ordered by name. Admin only.
pub async fn roles(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Role>>> {
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(Json(roles))
}

/// POST /api/v1/auth/add-role
///
/// Create a new role. Returns 201, or 409 if the name is taken. Admin only.
pub async fn add_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AddRoleRequest>,
) -> AppResult<(StatusCode, Json<Role>)> {
    let name = input.name.trim();
    validate_role_name(name)?;

    let role = RoleRepo::create(&state.pool, name).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!("Role '{name}' already exists")))
    })?;

    tracing::info!(role = %role.name, by = %admin.username, "Role created");
    Ok((StatusCode::CREATED, Json(role)))
}

/// POST /api/v1/auth/assign-role
///
/// Move an account to another role. Admin only.
///
/// Each account holds exactly one role, so assignment replaces the current
/// one. Admins cannot change their own role, which keeps at least the
/// caller's admin account in place.
pub async fn assign_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AssignRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    let username = input.username.trim();
    let role_name = input.role.trim();

    let user = UserRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("User '{username}' not found")))?;
    let role = RoleRepo::find_by_name(&state.pool, role_name)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Role '{role_name}' not found")))?;

    if user.role_id == role.id {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "User '{username}' already has role '{role_name}'"
        ))));
    }
    if user.id == admin.user_id && role.name != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot change their own role".into(),
        )));
    }

    let user = UserRepo::set_role(&state.pool, user.id, role.id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("User '{username}' not found")))?;

    tracing::info!(
        user_id = %user.id,
        role = %role.name,
        by = %admin.username,
        "Role assigned"
    );
    Ok(Json(to_response(user, role.name)))
}

fn to_response(user: User, role: String) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role,
        created_at: user.created_at,
    }
}
