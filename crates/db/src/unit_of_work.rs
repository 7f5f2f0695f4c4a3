//! Change-tracked write path.
//!
//! A [`UnitOfWork`] owns one transaction. Entities are loaded with a row lock
//! into a [`Tracked`] snapshot, mutated in memory, and saved; nothing is
//! visible to other connections until [`UnitOfWork::commit`]. Dropping a unit
//! of work without committing rolls everything back.

use async_trait::async_trait;
use roster_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, Transaction};

use crate::models::department::Department;
use crate::models::designation::Designation;
use crate::models::employee::Employee;

/// An entity that the unit of work knows how to load, insert, update and delete.
#[async_trait]
pub trait Persist: for<'r> FromRow<'r, PgRow> + Clone + PartialEq + Send + Sync + Unpin {
    /// Table the entity lives in.
    const TABLE: &'static str;
    /// Column list returned by every statement.
    const COLUMNS: &'static str;

    fn id(&self) -> DbId;

    /// Insert the entity as-is, returning the stored row.
    async fn insert(&self, conn: &mut PgConnection) -> Result<Self, sqlx::Error>;

    /// Write every mutable column of the entity, returning the stored row.
    async fn update(&self, conn: &mut PgConnection) -> Result<Self, sqlx::Error>;
}

/// A loaded entity plus the snapshot it was loaded with.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    original: T,
    current: T,
}

impl<T: Clone + PartialEq> Tracked<T> {
    pub fn new(entity: T) -> Self {
        Self {
            original: entity.clone(),
            current: entity,
        }
    }

    /// The entity as it was when loaded (or last saved).
    pub fn original(&self) -> &T {
        &self.original
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut T {
        &mut self.current
    }

    /// Whether the in-memory entity differs from the loaded snapshot.
    pub fn is_dirty(&self) -> bool {
        self.original != self.current
    }

    /// Replace both snapshots with the freshly stored row.
    fn accept(&mut self, stored: T) {
        self.original = stored.clone();
        self.current = stored;
    }

    pub fn into_current(self) -> T {
        self.current
    }
}

/// One transaction's worth of tracked writes.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    /// Load an entity by key and lock its row until commit.
    pub async fn find<T: Persist>(&mut self, id: DbId) -> Result<Option<Tracked<T>>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1 FOR UPDATE",
            T::COLUMNS,
            T::TABLE
        );
        let entity = sqlx::query_as::<_, T>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(entity.map(Tracked::new))
    }

    /// Insert a new entity and start tracking the stored row.
    pub async fn add<T: Persist>(&mut self, entity: &T) -> Result<Tracked<T>, sqlx::Error> {
        let stored = entity.insert(&mut self.tx).await?;
        Ok(Tracked::new(stored))
    }

    /// Flush a tracked entity. Issues no statement when nothing changed.
    ///
    /// Returns `true` if an update was written.
    pub async fn save<T: Persist>(&mut self, tracked: &mut Tracked<T>) -> Result<bool, sqlx::Error> {
        if !tracked.is_dirty() {
            return Ok(false);
        }
        let stored = tracked.current().update(&mut self.tx).await?;
        tracked.accept(stored);
        Ok(true)
    }

    /// Delete a tracked entity, returning the state it had when loaded.
    pub async fn remove<T: Persist>(&mut self, tracked: Tracked<T>) -> Result<T, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        sqlx::query(&query)
            .bind(tracked.original().id())
            .execute(&mut *self.tx)
            .await?;
        Ok(tracked.original)
    }

    /// The transaction's connection, for reads that must see uncommitted writes.
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }
}

const EMPLOYEE_COLUMNS: &str = "id, name, email, phone, salary, department_id, designation_id, \
                                created_at, updated_at";

#[async_trait]
impl Persist for Employee {
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static str = EMPLOYEE_COLUMNS;

    fn id(&self) -> DbId {
        self.id
    }

    async fn insert(&self, conn: &mut PgConnection) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees
                (id, name, email, phone, salary, department_id, designation_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(self.id)
            .bind(&self.name)
            .bind(&self.email)
            .bind(&self.phone)
            .bind(self.salary)
            .bind(self.department_id)
            .bind(self.designation_id)
            .bind(self.created_at)
            .bind(self.updated_at)
            .fetch_one(conn)
            .await
    }

    async fn update(&self, conn: &mut PgConnection) -> Result<Self, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                name = $2,
                email = $3,
                phone = $4,
                salary = $5,
                department_id = $6,
                designation_id = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(self.id)
            .bind(&self.name)
            .bind(&self.email)
            .bind(&self.phone)
            .bind(self.salary)
            .bind(self.department_id)
            .bind(self.designation_id)
            .fetch_one(conn)
            .await
    }
}

const LOOKUP_COLUMNS: &str = "id, name, created_at, updated_at";

#[async_trait]
impl Persist for Department {
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static str = LOOKUP_COLUMNS;

    fn id(&self) -> DbId {
        self.id
    }

    async fn insert(&self, conn: &mut PgConnection) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (id, name, created_at, updated_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {LOOKUP_COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(self.id)
            .bind(&self.name)
            .bind(self.created_at)
            .bind(self.updated_at)
            .fetch_one(conn)
            .await
    }

    async fn update(&self, conn: &mut PgConnection) -> Result<Self, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET name = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {LOOKUP_COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(self.id)
            .bind(&self.name)
            .fetch_one(conn)
            .await
    }
}

#[async_trait]
impl Persist for Designation {
    const TABLE: &'static str = "designations";
    const COLUMNS: &'static str = LOOKUP_COLUMNS;

    fn id(&self) -> DbId {
        self.id
    }

    async fn insert(&self, conn: &mut PgConnection) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO designations (id, name, created_at, updated_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {LOOKUP_COLUMNS}"
        );
        sqlx::query_as::<_, Designation>(&query)
            .bind(self.id)
            .bind(&self.name)
            .bind(self.created_at)
            .bind(self.updated_at)
            .fetch_one(conn)
            .await
    }

    async fn update(&self, conn: &mut PgConnection) -> Result<Self, sqlx::Error> {
        let query = format!(
            "UPDATE designations SET name = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {LOOKUP_COLUMNS}"
        );
        sqlx::query_as::<_, Designation>(&query)
            .bind(self.id)
            .bind(&self.name)
            .fetch_one(conn)
            .await
    }
}
