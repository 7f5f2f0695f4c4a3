//! Repository for the `employees` table.

use async_trait::async_trait;
use chrono::Utc;
use roster_core::types::{new_id, DbId};
use sqlx::{PgConnection, PgPool};

use crate::config::ReadStrategy;
use crate::materialize::{detail_query, DetailFilter};
use crate::models::employee::{
    CreateEmployee, Employee, EmployeeChanges, EmployeeDetail, UpdateEmployee,
};
use crate::repositories::Repository;
use crate::unit_of_work::UnitOfWork;

/// Employee reads (one joined query) and tracked writes.
#[derive(Debug, Clone)]
pub struct EmployeeRepo {
    pool: PgPool,
    strategy: ReadStrategy,
}

impl EmployeeRepo {
    pub fn new(pool: PgPool, strategy: ReadStrategy) -> Self {
        Self { pool, strategy }
    }

    /// Employees of one department, with relations populated.
    pub async fn list_by_department(
        &self,
        department_id: DbId,
    ) -> Result<Vec<EmployeeDetail>, sqlx::Error> {
        let query = detail_query(self.strategy, DetailFilter::ByDepartment);
        sqlx::query_as::<_, EmployeeDetail>(&query)
            .bind(department_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Employees holding one designation, with relations populated.
    pub async fn list_by_designation(
        &self,
        designation_id: DbId,
    ) -> Result<Vec<EmployeeDetail>, sqlx::Error> {
        let query = detail_query(self.strategy, DetailFilter::ByDesignation);
        sqlx::query_as::<_, EmployeeDetail>(&query)
            .bind(designation_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Re-read a row inside a unit of work so the result reflects uncommitted writes.
    async fn detail_in(
        &self,
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<EmployeeDetail, sqlx::Error> {
        let query = detail_query(self.strategy, DetailFilter::ById);
        sqlx::query_as::<_, EmployeeDetail>(&query)
            .bind(id)
            .fetch_one(conn)
            .await
    }
}

#[async_trait]
impl Repository for EmployeeRepo {
    type Entity = EmployeeDetail;
    type Create = CreateEmployee;
    type Update = UpdateEmployee;

    async fn get_all(&self) -> Result<Vec<EmployeeDetail>, sqlx::Error> {
        let query = detail_query(self.strategy, DetailFilter::All);
        sqlx::query_as::<_, EmployeeDetail>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<EmployeeDetail>, sqlx::Error> {
        let query = detail_query(self.strategy, DetailFilter::ById);
        sqlx::query_as::<_, EmployeeDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn add(&self, input: &CreateEmployee) -> Result<EmployeeDetail, sqlx::Error> {
        let entity = input.to_entity(new_id(), Utc::now());

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let stored = uow.add(&entity).await?;
        let detail = self.detail_in(uow.connection(), stored.current().id).await?;
        uow.commit().await?;

        tracing::info!(employee_id = %detail.employee.id, "Employee created");
        Ok(detail)
    }

    async fn update(
        &self,
        id: DbId,
        changes: &UpdateEmployee,
    ) -> Result<Option<EmployeeDetail>, sqlx::Error> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let Some(mut tracked) = uow.find::<Employee>(id).await? else {
            return Ok(None);
        };

        EmployeeChanges::from(changes).apply_to(tracked.current_mut());
        let written = uow.save(&mut tracked).await?;
        let detail = self.detail_in(uow.connection(), id).await?;
        uow.commit().await?;

        tracing::info!(employee_id = %id, written, "Employee updated");
        Ok(Some(detail))
    }

    async fn delete(&self, id: DbId) -> Result<Option<EmployeeDetail>, sqlx::Error> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let Some(tracked) = uow.find::<Employee>(id).await? else {
            return Ok(None);
        };

        let prior = self.detail_in(uow.connection(), id).await?;
        uow.remove(tracked).await?;
        uow.commit().await?;

        tracing::info!(employee_id = %id, "Employee deleted");
        Ok(Some(prior))
    }
}
