use std::sync::Arc;

use roster_db::repositories::{DepartmentRepo, DesignationRepo, EmployeeRepo};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted and the config is
/// behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: roster_db::DbPool,
    /// Server configuration (read by middleware and handlers).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Employee repository using the configured read strategy.
    pub fn employee_repo(&self) -> EmployeeRepo {
        EmployeeRepo::new(self.pool.clone(), self.config.read_strategy)
    }

    pub fn department_repo(&self) -> DepartmentRepo {
        DepartmentRepo::new(self.pool.clone())
    }

    pub fn designation_repo(&self) -> DesignationRepo {
        DesignationRepo::new(self.pool.clone())
    }
}
