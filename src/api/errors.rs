use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::customer::CustomerError;

pub const CUSTOMER_NOT_FOUND: &str = "Customer not found.";

/// API error type with HTTP status code and JSON body fields
///
/// Renders as `{ data?, message, error? }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error: Option<String>,
    pub data: Option<Value>,
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
            data: None,
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 404 body used by lookups: `{ message }`
    pub fn customer_not_found() -> Self {
        Self::not_found(CUSTOMER_NOT_FOUND)
    }

    /// 404 body used by update and delete, echoing the requested id
    ///
    /// Takes `i64` so ids outside the stored range are echoed as sent.
    pub fn customer_id_not_found(id: i64) -> Self {
        Self::customer_not_found().with_data(json!({ "cust_id": id }))
    }

    /// Maps a failed operation to its status, keeping the raw description in `error`
    ///
    /// # Status mapping
    /// - NotFound -> 404 (id-echoing body)
    /// - Validation -> 400
    /// - Conflict -> 409
    /// - StoreUnavailable -> 503
    /// - Store -> 500
    pub fn operation_failed(message: impl Into<String>, err: CustomerError) -> Self {
        let status = match &err {
            CustomerError::NotFound(id) => return Self::customer_id_not_found(i64::from(*id)),
            CustomerError::Validation(_) => StatusCode::BAD_REQUEST,
            CustomerError::Conflict(_) => StatusCode::CONFLICT,
            CustomerError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CustomerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self::new(status, message).with_error(err.to_string())
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = ?self.error, "{}", self.message);
        }

        let body = Json(ErrorBody {
            data: self.data,
            message: self.message,
            error: self.error,
        });

        (self.status, body).into_response()
    }
}
