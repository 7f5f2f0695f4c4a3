//! Integration tests for role creation and role assignment.

use roster_core::roles::{ROLE_ADMIN, ROLE_USER};
use roster_db::models::user::CreateUser;
use roster_db::repositories::{RoleRepo, UserRepo};
use roster_db::seed::seed_roles;
use sqlx::PgPool;
use uuid::Uuid;

async fn new_user(pool: &PgPool, username: &str) -> roster_db::models::user::User {
    let role = RoleRepo::find_by_name(pool, ROLE_USER).await.unwrap().unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.into(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".into(),
            role_id: role.id,
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_role_rejects_duplicates(pool: PgPool) {
    seed_roles(&pool).await.unwrap();

    let auditor = RoleRepo::create(&pool, "auditor").await.unwrap().unwrap();
    assert_eq!(auditor.name, "auditor");

    assert!(RoleRepo::create(&pool, "auditor").await.unwrap().is_none());
    assert!(RoleRepo::create(&pool, ROLE_ADMIN).await.unwrap().is_none());

    let names: Vec<_> = RoleRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, [ROLE_ADMIN, "auditor", ROLE_USER]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_role_moves_user(pool: PgPool) {
    seed_roles(&pool).await.unwrap();
    let user = new_user(&pool, "ann").await;
    let admin = RoleRepo::find_by_name(&pool, ROLE_ADMIN).await.unwrap().unwrap();

    let updated = UserRepo::set_role(&pool, user.id, admin.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.role_id, admin.id);
    assert_eq!(updated.username, user.username);

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(RoleRepo::resolve_name(&pool, stored.role_id).await.unwrap(), ROLE_ADMIN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_role_on_missing_user_returns_none(pool: PgPool) {
    seed_roles(&pool).await.unwrap();
    let admin = RoleRepo::find_by_name(&pool, ROLE_ADMIN).await.unwrap().unwrap();

    let result = UserRepo::set_role(&pool, Uuid::now_v7(), admin.id).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_role_to_unknown_role_is_fk_violation(pool: PgPool) {
    seed_roles(&pool).await.unwrap();
    let user = new_user(&pool, "bob").await;

    let err = UserRepo::set_role(&pool, user.id, Uuid::now_v7())
        .await
        .unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code());
    assert_eq!(code.as_deref(), Some("23503"));
}
