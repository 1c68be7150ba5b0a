// Customer domain module
// Contains the customer entity, its write models and error taxonomy

#![allow(clippy::module_inception)]

pub mod customer;
pub mod errors;

// Re-export main types for convenience
pub use customer::{Customer, CustomerPatch, NewCustomer};
pub use errors::{CustomerError, CustomerResult};
