use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::customer::{Customer, CustomerError, CustomerResult, NewCustomer};
use crate::domain::repositories::CustomerRepository;

#[derive(Debug)]
struct Table {
    /// `None` once the id sequence is exhausted
    next_id: Option<i32>,
    rows: BTreeMap<i32, Customer>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|c| c.email() == email && Some(c.id()) != except)
    }
}

/// In-process implementation of CustomerRepository
///
/// Mirrors the `customer` table: auto-increment ids starting after the
/// highest seeded id, and a unique constraint on `cust_email`.
#[derive(Debug)]
pub struct InMemoryCustomerRepository {
    table: RwLock<Table>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::with_customers(Vec::new())
    }

    /// Creates a repository pre-populated with existing rows
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        let next_id = customers.iter().map(Customer::id).max().unwrap_or(0).checked_add(1);
        let rows = customers.into_iter().map(|c| (c.id(), c)).collect();

        Self {
            table: RwLock::new(Table { next_id, rows }),
        }
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate_email(email: &str) -> CustomerError {
    CustomerError::Conflict(format!(
        "duplicate key value violates unique constraint: cust_email={}",
        email
    ))
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_all(&self) -> CustomerResult<Vec<Customer>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> CustomerResult<Option<Customer>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> CustomerResult<Option<Customer>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|c| c.email() == email)
            .cloned())
    }

    async fn create(&self, customer: NewCustomer) -> CustomerResult<Customer> {
        let mut table = self.table.write().await;
        if table.email_taken(&customer.email, None) {
            return Err(duplicate_email(&customer.email));
        }

        // Ids are consumed even when later rows are deleted, like a sequence
        let id = table.next_id.ok_or_else(|| {
            CustomerError::Store("customer id sequence exhausted".to_string())
        })?;
        table.next_id = id.checked_add(1);

        let customer = Customer::from_new(id, customer);
        table.rows.insert(id, customer.clone());
        Ok(customer)
    }

    async fn update(&self, customer: &Customer) -> CustomerResult<Option<Customer>> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&customer.id()) {
            return Ok(None);
        }
        if table.email_taken(customer.email(), Some(customer.id())) {
            return Err(duplicate_email(customer.email()));
        }

        table.rows.insert(customer.id(), customer.clone());
        Ok(Some(customer.clone()))
    }

    async fn delete(&self, id: i32) -> CustomerResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(name: &str, phone: i32, email: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            phone,
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryCustomerRepository::new();

        let first = repo.create(new_customer("A", 1, "a@abc.com")).await.unwrap();
        let second = repo.create(new_customer("B", 2, "b@abc.com")).await.unwrap();

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
    }

    #[tokio::test]
    async fn ids_continue_after_seeded_rows() {
        let repo = InMemoryCustomerRepository::with_customers(vec![Customer::from_persistence(
            3,
            "Jie Mi".to_string(),
            96543218,
            "jiemi@abc.com".to_string(),
        )]);

        let created = repo.create(new_customer("Sin Yee", 96647332, "sinyee@abc.com")).await.unwrap();
        assert_eq!(created.id(), 4);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let repo = InMemoryCustomerRepository::new();
        let first = repo.create(new_customer("A", 1, "a@abc.com")).await.unwrap();

        assert!(repo.delete(first.id()).await.unwrap());
        let second = repo.create(new_customer("B", 2, "b@abc.com")).await.unwrap();

        assert_eq!(second.id(), 2);
    }

    #[tokio::test]
    async fn duplicate_email_on_create_is_conflict() {
        let repo = InMemoryCustomerRepository::new();
        repo.create(new_customer("A", 1, "same@abc.com")).await.unwrap();

        let err = repo
            .create(new_customer("B", 2, "same@abc.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_email_on_update_is_conflict() {
        let repo = InMemoryCustomerRepository::new();
        repo.create(new_customer("A", 1, "a@abc.com")).await.unwrap();
        let mut b = repo.create(new_customer("B", 2, "b@abc.com")).await.unwrap();

        b.apply(crate::domain::customer::CustomerPatch {
            email: Some("a@abc.com".to_string()),
            ..Default::default()
        });
        let err = repo.update(&b).await.unwrap_err();
        assert!(matches!(err, CustomerError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_keeps_own_email() {
        let repo = InMemoryCustomerRepository::new();
        let mut a = repo.create(new_customer("A", 1, "a@abc.com")).await.unwrap();

        a.apply(crate::domain::customer::CustomerPatch {
            phone: Some(5),
            ..Default::default()
        });
        let updated = repo.update(&a).await.unwrap().unwrap();
        assert_eq!(updated.phone(), 5);
        assert_eq!(updated.email(), "a@abc.com");
    }

    #[tokio::test]
    async fn update_missing_row_returns_none() {
        let repo = InMemoryCustomerRepository::new();
        let ghost = Customer::from_persistence(9, "X".to_string(), 1, "x@abc.com".to_string());

        assert_eq!(repo.update(&ghost).await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_by_email_and_find_all() {
        let repo = InMemoryCustomerRepository::new();
        repo.create(new_customer("A", 1, "a@abc.com")).await.unwrap();
        repo.create(new_customer("B", 2, "b@abc.com")).await.unwrap();

        let found = repo.find_by_email("b@abc.com").await.unwrap().unwrap();
        assert_eq!(found.name(), "B");
        assert!(repo.find_by_email("zzz@abc.com").await.unwrap().is_none());

        let names: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn id_sequence_exhaustion_is_store_error() {
        let repo = InMemoryCustomerRepository::with_customers(vec![Customer::from_persistence(
            i32::MAX - 1,
            "Last".to_string(),
            1,
            "last@abc.com".to_string(),
        )]);

        let created = repo.create(new_customer("A", 1, "a@abc.com")).await.unwrap();
        assert_eq!(created.id(), i32::MAX);

        let err = repo.create(new_customer("B", 2, "b@abc.com")).await.unwrap_err();
        assert!(matches!(err, CustomerError::Store(_)));
    }

    #[tokio::test]
    async fn seeding_max_id_does_not_overflow() {
        let repo = InMemoryCustomerRepository::with_customers(vec![Customer::from_persistence(
            i32::MAX,
            "Last".to_string(),
            1,
            "last@abc.com".to_string(),
        )]);

        let err = repo.create(new_customer("A", 1, "a@abc.com")).await.unwrap_err();
        assert!(matches!(err, CustomerError::Store(_)));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_row_returns_false() {
        let repo = InMemoryCustomerRepository::new();
        assert!(!repo.delete(1).await.unwrap());
    }
}
