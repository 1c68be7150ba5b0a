use thiserror::Error;

/// Failures that can occur while reading or writing customers
///
/// Each kind maps to its own HTTP status in the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    NotFound(i32),

    /// Malformed input or a store-side data constraint (not null, length)
    #[error("{0}")]
    Validation(String),

    /// Unique constraint violation, i.e. a duplicate `cust_email`
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    StoreUnavailable(String),

    #[error("{0}")]
    Store(String),
}

pub type CustomerResult<T> = Result<T, CustomerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_includes_id() {
        assert_eq!(CustomerError::NotFound(7).to_string(), "Customer not found: 7");
    }

    #[test]
    fn other_kinds_display_raw_description() {
        let err = CustomerError::Conflict("duplicate key value".to_string());
        assert_eq!(err.to_string(), "duplicate key value");
    }
}
