//! Repository for the `departments` table.

use async_trait::async_trait;
use chrono::Utc;
use roster_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::department::{CreateDepartment, Department, UpdateDepartment};
use crate::repositories::Repository;
use crate::unit_of_work::{Persist, UnitOfWork};

/// Provides CRUD operations for departments.
#[derive(Debug, Clone)]
pub struct DepartmentRepo {
    pool: PgPool,
}

impl DepartmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for DepartmentRepo {
    type Entity = Department;
    type Create = CreateDepartment;
    type Update = UpdateDepartment;

    /// List all departments ordered by name.
    async fn get_all(&self) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!("SELECT {} FROM departments ORDER BY name, id", Department::COLUMNS);
        sqlx::query_as::<_, Department>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {} FROM departments WHERE id = $1", Department::COLUMNS);
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn add(&self, input: &CreateDepartment) -> Result<Department, sqlx::Error> {
        let now = Utc::now();
        let entity = Department {
            id: new_id(),
            name: input.name.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let stored = uow.add(&entity).await?;
        uow.commit().await?;

        tracing::info!(department_id = %entity.id, name = %entity.name, "Department created");
        Ok(stored.into_current())
    }

    async fn update(
        &self,
        id: DbId,
        changes: &UpdateDepartment,
    ) -> Result<Option<Department>, sqlx::Error> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let Some(mut tracked) = uow.find::<Department>(id).await? else {
            return Ok(None);
        };

        tracked.current_mut().name = changes.name.trim().to_string();
        uow.save(&mut tracked).await?;
        uow.commit().await?;

        Ok(Some(tracked.into_current()))
    }

    /// Fails with a foreign-key violation while employees still reference the department.
    async fn delete(&self, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let Some(tracked) = uow.find::<Department>(id).await? else {
            return Ok(None);
        };

        let prior = uow.remove(tracked).await?;
        uow.commit().await?;

        tracing::info!(department_id = %id, "Department deleted");
        Ok(Some(prior))
    }
}
