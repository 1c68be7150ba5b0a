use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{customers, health};
use crate::domain::repositories::CustomerRepository;

/// Shared handler state; the repository is chosen at startup
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerRepository>,
}

impl AppState {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }
}

/// Build the service router with CORS and request tracing
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Customer routes
        .route(
            "/customer",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/customer/by-email/:email",
            get(customers::get_customer_by_email),
        )
        .route(
            "/customer/:id",
            get(customers::get_customer)
                .patch(customers::update_customer)
                .delete(customers::delete_customer),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
