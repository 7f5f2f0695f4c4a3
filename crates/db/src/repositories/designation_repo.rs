//! Repository for the `designations` table.

use async_trait::async_trait;
use chrono::Utc;
use roster_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::designation::{CreateDesignation, Designation, UpdateDesignation};
use crate::repositories::Repository;
use crate::unit_of_work::{Persist, UnitOfWork};

/// Provides CRUD operations for designations.
#[derive(Debug, Clone)]
pub struct DesignationRepo {
    pool: PgPool,
}

impl DesignationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for DesignationRepo {
    type Entity = Designation;
    type Create = CreateDesignation;
    type Update = UpdateDesignation;

    async fn get_all(&self) -> Result<Vec<Designation>, sqlx::Error> {
        let query = format!("SELECT {} FROM designations ORDER BY name, id", Designation::COLUMNS);
        sqlx::query_as::<_, Designation>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Designation>, sqlx::Error> {
        let query = format!("SELECT {} FROM designations WHERE id = $1", Designation::COLUMNS);
        sqlx::query_as::<_, Designation>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn add(&self, input: &CreateDesignation) -> Result<Designation, sqlx::Error> {
        let now = Utc::now();
        let entity = Designation {
            id: new_id(),
            name: input.name.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let stored = uow.add(&entity).await?;
        uow.commit().await?;

        tracing::info!(designation_id = %entity.id, name = %entity.name, "Designation created");
        Ok(stored.into_current())
    }

    async fn update(
        &self,
        id: DbId,
        changes: &UpdateDesignation,
    ) -> Result<Option<Designation>, sqlx::Error> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let Some(mut tracked) = uow.find::<Designation>(id).await? else {
            return Ok(None);
        };

        tracked.current_mut().name = changes.name.trim().to_string();
        uow.save(&mut tracked).await?;
        uow.commit().await?;

        Ok(Some(tracked.into_current()))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Designation>, sqlx::Error> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let Some(tracked) = uow.find::<Designation>(id).await? else {
            return Ok(None);
        };

        let prior = uow.remove(tracked).await?;
        uow.commit().await?;

        tracing::info!(designation_id = %id, "Designation deleted");
        Ok(Some(prior))
    }
}
