//! Application builder — wires repositories, services, and auth into the
//! shared state and runs the HTTP server.

use std::sync::Arc;

use sqlx::SqlitePool;

use arbor_auth::jwt::decoder::JwtDecoder;
use arbor_auth::jwt::encoder::JwtEncoder;
use arbor_auth::password::hasher::PasswordHasher;
use arbor_core::config::AppConfig;
use arbor_core::error::AppError;
use arbor_database::repositories::node::NodeRepository;
use arbor_database::repositories::user::UserRepository;
use arbor_service::tree::service::TreeService;
use arbor_service::user::service::UserService;

use crate::router::build_router;
use crate::state::AppState;

/// Construct the application state from configuration and a connected pool.
pub fn build_state(config: AppConfig, db_pool: SqlitePool) -> AppState {
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let node_repo = Arc::new(NodeRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));

    let tree_service = Arc::new(TreeService::new(node_repo, config.tree.clone()));
    let user_service = Arc::new(UserService::new(
        user_repo,
        Arc::new(PasswordHasher::new()),
        Arc::new(JwtEncoder::new(&config.auth)),
        &config.auth,
    ));

    AppState {
        config: Arc::new(config),
        db_pool,
        jwt_decoder,
        tree_service,
        user_service,
    }
}

/// Runs the Arbor server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: SqlitePool) -> Result<(), AppError> {
    let host = config.server.host.clone();
    let port = config.server.port;

    let state = build_state(config, db_pool);
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Arbor server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Arbor server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
