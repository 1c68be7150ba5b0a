use async_trait::async_trait;

use crate::domain::customer::{Customer, CustomerResult, NewCustomer};

/// Repository trait for the Customer entity
///
/// Defines the contract for persisting and retrieving customers.
/// Implementations translate store failures into `CustomerError` kinds.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// List every customer in insertion (id) order
    async fn find_all(&self) -> CustomerResult<Vec<Customer>>;

    /// Find a customer by its ID
    async fn find_by_id(&self, id: i32) -> CustomerResult<Option<Customer>>;

    /// Find a customer by email address
    async fn find_by_email(&self, email: &str) -> CustomerResult<Option<Customer>>;

    /// Insert a customer and return it with its generated ID
    async fn create(&self, customer: NewCustomer) -> CustomerResult<Customer>;

    /// Overwrite the stored fields of an existing customer
    ///
    /// Returns `None` if the row no longer exists.
    async fn update(&self, customer: &Customer) -> CustomerResult<Option<Customer>>;

    /// Delete a customer by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> CustomerResult<bool>;
}
