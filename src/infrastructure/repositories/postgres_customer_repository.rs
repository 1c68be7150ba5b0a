use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::PgPool;

use crate::domain::customer::{Customer, CustomerError, CustomerResult, NewCustomer};
use crate::domain::repositories::CustomerRepository;

/// Row shape of the `customer` table
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    cust_id: i32,
    cust_name: String,
    cust_phone: i32,
    cust_email: String,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Customer::from_persistence(r.cust_id, r.cust_name, r.cust_phone, r.cust_email)
    }
}

/// PostgreSQL implementation of CustomerRepository
///
/// Every operation is a single statement on the pool; no explicit
/// transactions or row locks are taken.
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    /// Creates a new PostgresCustomerRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Sorts a sqlx failure into the customer error taxonomy
pub(crate) fn classify(err: sqlx::Error) -> CustomerError {
    match &err {
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::UniqueViolation => CustomerError::Conflict(db.message().to_string()),
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                CustomerError::Validation(db.message().to_string())
            }
            // 22001 string_data_right_truncation, 22003 numeric_value_out_of_range
            _ if matches!(db.code().as_deref(), Some("22001") | Some("22003")) => {
                CustomerError::Validation(db.message().to_string())
            }
            _ => CustomerError::Store(err.to_string()),
        },
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => CustomerError::StoreUnavailable(err.to_string()),
        _ => CustomerError::Store(err.to_string()),
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_all(&self) -> CustomerResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT cust_id, cust_name, cust_phone, cust_email
            FROM customer
            ORDER BY cust_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> CustomerResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT cust_id, cust_name, cust_phone, cust_email
            FROM customer
            WHERE cust_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> CustomerResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT cust_id, cust_name, cust_phone, cust_email
            FROM customer
            WHERE cust_email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(Customer::from))
    }

    async fn create(&self, customer: NewCustomer) -> CustomerResult<Customer> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customer (cust_name, cust_phone, cust_email)
            VALUES ($1, $2, $3)
            RETURNING cust_id, cust_name, cust_phone, cust_email
            "#,
        )
        .bind(&customer.name)
        .bind(customer.phone)
        .bind(&customer.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to insert customer");
            classify(e)
        })?;

        Ok(row.into())
    }

    async fn update(&self, customer: &Customer) -> CustomerResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE customer
            SET cust_name = $2, cust_phone = $3, cust_email = $4
            WHERE cust_id = $1
            RETURNING cust_id, cust_name, cust_phone, cust_email
            "#,
        )
        .bind(customer.id())
        .bind(customer.name())
        .bind(customer.phone())
        .bind(customer.email())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::warn!(cust_id = customer.id(), error = %e, "Failed to update customer");
            classify(e)
        })?;

        Ok(row.map(Customer::from))
    }

    async fn delete(&self, id: i32) -> CustomerResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM customer WHERE cust_id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::warn!(cust_id = id, error = %e, "Failed to delete customer");
            classify(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
