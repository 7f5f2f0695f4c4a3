//! Domain types and rules shared by the database and API crates.

pub mod account;
pub mod employee;
pub mod error;
pub mod lookup;
pub mod roles;
pub mod types;
