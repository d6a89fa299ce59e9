//! Biblion Server - Library Loan Management System
//!
//! REST API server for the Biblion staff interface.

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblion_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblion_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblion Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration: the staff UI is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health
        .route("/", get(api::health::hello))
        .route("/health", get(api::health::health_check))
        // Books: list/create/borrow/delete share the collection route
        .route(
            "/books",
            get(api::books::list_books)
                .post(api::books::create_book)
                .put(api::books::borrow_book)
                .delete(api::books::delete_book),
        )
        .route("/findBook", get(api::books::find_books))
        .route("/guestWatchList", get(api::books::guest_watch_list))
        // Customers
        .route(
            "/customers",
            get(api::customers::list_customers)
                .post(api::customers::create_customer)
                .put(api::customers::update_customer)
                .delete(api::customers::delete_customer),
        )
        .route("/findCustomer", get(api::customers::find_customers))
        .route("/customerToUpdate", get(api::customers::customer_to_update))
        // Loans
        .route(
            "/loans",
            get(api::loans::list_loans).delete(api::loans::return_loan),
        )
        .route("/lateLoans", get(api::loans::list_late_loans))
        // Authentication & member routes
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/manager", get(api::auth::manager_dashboard))
        .route("/user", get(api::auth::user_dashboard))
        .route("/findCustomersBooks", get(api::auth::my_loaned_books))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
