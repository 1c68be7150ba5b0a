//! Customer Service Library
//!
//! CRUD HTTP service over the `customer` table, split into domain logic,
//! repository adapters, configuration and the axum API layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
