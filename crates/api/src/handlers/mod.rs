pub mod auth;
pub mod department;
pub mod designation;
pub mod employee;
pub mod lookup;
