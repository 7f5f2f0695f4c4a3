//! Repository layer.
//!
//! Employees, departments and designations share the five-method
//! [`Repository`] contract. Their repositories are cheap values built per
//! request around a pool handle; they hold no state of their own. Users and
//! roles are plain zero-sized structs providing async functions that accept
//! `&PgPool` as the first argument.

use async_trait::async_trait;
use roster_core::types::DbId;

pub mod department_repo;
pub mod designation_repo;
pub mod employee_repo;
pub mod role_repo;
pub mod user_repo;

pub use department_repo::DepartmentRepo;
pub use designation_repo::DesignationRepo;
pub use employee_repo::EmployeeRepo;
pub use role_repo::RoleRepo;
pub use user_repo::UserRepo;

/// CRUD contract shared by the entity repositories.
///
/// Absence is never an error: lookups, updates and deletes of a missing key
/// return `Ok(None)`. Constraint and connectivity failures surface as
/// `sqlx::Error`. Every write runs in exactly one transaction.
#[async_trait]
pub trait Repository: Send + Sync {
    /// What reads and writes return.
    type Entity: Send;
    /// Input accepted by [`Repository::add`].
    type Create: Sync;
    /// Input accepted by [`Repository::update`].
    type Update: Sync;

    /// Every row, in a stable order. Empty when the table is empty.
    async fn get_all(&self) -> Result<Vec<Self::Entity>, sqlx::Error>;

    async fn get_by_id(&self, id: DbId) -> Result<Option<Self::Entity>, sqlx::Error>;

    /// Insert with a freshly generated key and return the stored entity.
    async fn add(&self, input: &Self::Create) -> Result<Self::Entity, sqlx::Error>;

    /// Load, apply the mutable fields from `changes`, save.
    async fn update(
        &self,
        id: DbId,
        changes: &Self::Update,
    ) -> Result<Option<Self::Entity>, sqlx::Error>;

    /// Remove a row, returning its state prior to deletion.
    async fn delete(&self, id: DbId) -> Result<Option<Self::Entity>, sqlx::Error>;
}
