use std::error::Error;
use std::sync::Arc;

use tokio::signal;

use customer_service::api::{self, AppState};
use customer_service::config::{Config, ConfigError, StoreKind};
use customer_service::domain::repositories::CustomerRepository;
use customer_service::infrastructure::database;
use customer_service::infrastructure::repositories::{
    InMemoryCustomerRepository, PostgresCustomerRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    let (customers, pool) = match config.store {
        StoreKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::MissingDatabaseUrl)?;

            tracing::info!("Connecting to database...");
            let pool = database::connect(&config, database_url).await?;
            tracing::info!(
                max_connections = config.max_connections,
                "Database connected successfully"
            );

            let repository: Arc<dyn CustomerRepository> =
                Arc::new(PostgresCustomerRepository::new(pool.clone()));
            (repository, Some(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store, data is lost on shutdown");
            let repository: Arc<dyn CustomerRepository> =
                Arc::new(InMemoryCustomerRepository::new());
            (repository, None)
        }
    };

    let app = api::router(AppState::new(customers));

    let addr = config.bind_addr();
    tracing::info!(store = %config.store, "Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
