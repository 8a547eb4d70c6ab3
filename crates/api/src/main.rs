use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use larder_api::config::ServerConfig;
use larder_api::logging::init_tracing;
use larder_api::router::build_app_router;
use larder_api::state::AppState;
use larder_core::scheduling::refresh_interval;
use larder_db::store::PgStore;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");

    // --- Tracing ---
    init_tracing(&config).expect("Failed to open log file");
    tracing::info!(
        host = %config.host,
        port = %config.port,
        mode = ?config.mode,
        thresholds = config.thresholds.len(),
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = larder_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    larder_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    larder_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- App state ---
    let refresh_every =
        refresh_interval(config.grocery_refresh_hours).expect("Invalid grocery refresh interval");
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState::new(Arc::new(PgStore::new(pool)), config);

    // --- Grocery list scheduler ---
    let grocery_cancel = CancellationToken::new();
    let grocery_handle = tokio::spawn(
        Arc::clone(&state.grocery_job).run(refresh_every, grocery_cancel.clone()),
    );
    tracing::info!("Grocery list scheduler started");

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    grocery_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), grocery_handle).await;
    tracing::info!("Grocery list scheduler stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
