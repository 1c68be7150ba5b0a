use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::errors::ApiError;
use crate::api::router::AppState;
use crate::domain::customer::{Customer, CustomerError, CustomerPatch, NewCustomer};

const LOOKUP_FAILED: &str = "An error occurred retrieving the customer.";
const CREATE_FAILED: &str = "An error occurred creating the customer.";
const UPDATE_FAILED: &str = "An error occurred in updating the customer.";
const DELETE_FAILED: &str = "An error occurred deleting the customer.";
const NO_CUSTOMERS: &str = "There are no customers.";

/// Request body for creating a customer
///
/// All fields are required; unknown fields are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCustomerRequest {
    pub cust_name: String,
    pub cust_phone: i32,
    pub cust_email: String,
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(req: CreateCustomerRequest) -> Self {
        Self {
            name: req.cust_name,
            phone: req.cust_phone,
            email: req.cust_email,
        }
    }
}

/// Request body for a partial update
///
/// Outer `None` means the key was absent; `Some(None)` means an explicit `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCustomerRequest {
    #[serde(default, deserialize_with = "present")]
    pub cust_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub cust_phone: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub cust_email: Option<Option<String>>,
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn not_null<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, CustomerError> {
    match value {
        Some(None) => Err(CustomerError::Validation(format!("{} cannot be null", field))),
        other => Ok(other.flatten()),
    }
}

impl TryFrom<UpdateCustomerRequest> for CustomerPatch {
    type Error = CustomerError;

    fn try_from(req: UpdateCustomerRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: not_null("cust_name", req.cust_name)?,
            phone: not_null("cust_phone", req.cust_phone)?,
            email: not_null("cust_email", req.cust_email)?,
        })
    }
}

/// JSON form of a customer
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub cust_id: i32,
    pub cust_name: String,
    pub cust_phone: i32,
    pub cust_email: String,
}

impl From<&Customer> for CustomerResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            cust_id: customer.id(),
            cust_name: customer.name().to_string(),
            cust_phone: customer.phone(),
            cust_email: customer.email().to_string(),
        }
    }
}

/// `{ data: ... }` envelope
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerIdResponse {
    pub cust_id: i32,
}

#[derive(Debug, Serialize)]
pub struct CustomerList {
    pub customers: Vec<CustomerResponse>,
}

/// Listing body; an empty table answers with a message instead of data
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CustomerListResponse {
    Customers { data: CustomerList },
    Empty { message: &'static str },
}

/// Parses the id segment; non-integers are a 400, integers are returned as sent
fn customer_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        ApiError::bad_request("Invalid customer id.").with_error(rejection.body_text())
    })
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>, message: &str) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        ApiError::operation_failed(message, CustomerError::Validation(rejection.body_text()))
    })
}

/// List all customers
///
/// GET /customer
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<CustomerListResponse>, ApiError> {
    let customers = state
        .customers
        .find_all()
        .await
        .map_err(|e| ApiError::operation_failed(LOOKUP_FAILED, e))?;

    if customers.is_empty() {
        return Ok(Json(CustomerListResponse::Empty {
            message: NO_CUSTOMERS,
        }));
    }

    Ok(Json(CustomerListResponse::Customers {
        data: CustomerList {
            customers: customers.iter().map(CustomerResponse::from).collect(),
        },
    }))
}

/// Get a customer by ID
///
/// GET /customer/:id
pub async fn get_customer(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DataResponse<CustomerResponse>>, ApiError> {
    // Ids beyond the column range cannot exist
    let id = i32::try_from(customer_id(path)?)
        .map_err(|_| ApiError::customer_not_found())?;
    let customer = state
        .customers
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::operation_failed(LOOKUP_FAILED, e))?
        .ok_or_else(ApiError::customer_not_found)?;

    Ok(Json(DataResponse::new(CustomerResponse::from(&customer))))
}

/// Get a customer by email address
///
/// GET /customer/by-email/:email
pub async fn get_customer_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<DataResponse<CustomerResponse>>, ApiError> {
    let customer = state
        .customers
        .find_by_email(&email)
        .await
        .map_err(|e| ApiError::operation_failed(LOOKUP_FAILED, e))?
        .ok_or_else(ApiError::customer_not_found)?;

    Ok(Json(DataResponse::new(CustomerResponse::from(&customer))))
}

/// Create a new customer
///
/// POST /customer
pub async fn create_customer(
    State(state): State<AppState>,
    body: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<CustomerResponse>>), ApiError> {
    let req = json_body(body, CREATE_FAILED)?;

    let customer = state
        .customers
        .create(req.into())
        .await
        .map_err(|e| ApiError::operation_failed(CREATE_FAILED, e))?;

    tracing::info!(cust_id = customer.id(), "Customer created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(CustomerResponse::from(&customer))),
    ))
}

/// Partially update a customer
///
/// PATCH /customer/:id
///
/// Read-then-write without locking; concurrent patches of one id may lose updates.
pub async fn update_customer(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> Result<Json<DataResponse<CustomerResponse>>, ApiError> {
    let requested = customer_id(path)?;
    let id = i32::try_from(requested)
        .map_err(|_| ApiError::customer_id_not_found(requested))?;
    let mut customer = state
        .customers
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::operation_failed(UPDATE_FAILED, e))?
        .ok_or_else(|| ApiError::customer_id_not_found(requested))?;

    let patch = CustomerPatch::try_from(json_body(body, UPDATE_FAILED)?)
        .map_err(|e| ApiError::operation_failed(UPDATE_FAILED, e))?;

    if patch.is_empty() {
        return Ok(Json(DataResponse::new(CustomerResponse::from(&customer))));
    }

    customer.apply(patch);
    let updated = state
        .customers
        .update(&customer)
        .await
        .map_err(|e| ApiError::operation_failed(UPDATE_FAILED, e))?
        .ok_or_else(|| ApiError::customer_id_not_found(requested))?;

    Ok(Json(DataResponse::new(CustomerResponse::from(&updated))))
}

/// Delete a customer
///
/// DELETE /customer/:id
pub async fn delete_customer(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DataResponse<CustomerIdResponse>>, ApiError> {
    let requested = customer_id(path)?;
    let id = i32::try_from(requested)
        .map_err(|_| ApiError::customer_id_not_found(requested))?;
    let removed = state
        .customers
        .delete(id)
        .await
        .map_err(|e| ApiError::operation_failed(DELETE_FAILED, e))?;

    if !removed {
        return Err(ApiError::customer_id_not_found(requested));
    }

    tracing::info!(cust_id = id, "Customer deleted");

    Ok(Json(DataResponse::new(CustomerIdResponse { cust_id: id })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_requires_all_fields() {
        let err = serde_json::from_value::<CreateCustomerRequest>(json!({})).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn create_request_rejects_unknown_fields() {
        let result = serde_json::from_value::<CreateCustomerRequest>(json!({
            "cust_name": "Sin Yee",
            "cust_phone": 96647332,
            "cust_email": "sinyee@abc.com",
            "cust_id": 9
        }));
        assert!(result.is_err());
    }

    #[test]
    fn update_request_distinguishes_absent_from_null() {
        let req: UpdateCustomerRequest =
            serde_json::from_value(json!({ "cust_name": null, "cust_phone": 1 })).unwrap();

        assert_eq!(req.cust_name, Some(None));
        assert_eq!(req.cust_phone, Some(Some(1)));
        assert_eq!(req.cust_email, None);
    }

    #[test]
    fn patch_from_request_keeps_present_fields_only() {
        let req: UpdateCustomerRequest =
            serde_json::from_value(json!({ "cust_email": "carmen@abc.com" })).unwrap();
        let patch = CustomerPatch::try_from(req).unwrap();

        assert_eq!(
            patch,
            CustomerPatch {
                email: Some("carmen@abc.com".to_string()),
                ..CustomerPatch::default()
            }
        );
    }

    #[test]
    fn patch_with_null_field_is_validation_error() {
        let req: UpdateCustomerRequest =
            serde_json::from_value(json!({ "cust_phone": null })).unwrap();

        assert_eq!(
            CustomerPatch::try_from(req).unwrap_err(),
            CustomerError::Validation("cust_phone cannot be null".to_string())
        );
    }

    #[test]
    fn empty_list_serializes_message_only() {
        let body = serde_json::to_value(CustomerListResponse::Empty {
            message: NO_CUSTOMERS,
        })
        .unwrap();
        assert_eq!(body, json!({ "message": "There are no customers." }));
    }
}
