//! Entity structs and transfer objects.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` request DTOs for inserts and updates
//! - A `Serialize` transfer object for API responses, where one differs from the entity

pub mod department;
pub mod designation;
pub mod employee;
pub mod role;
pub mod user;
