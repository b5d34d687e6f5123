//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::SqlitePool;

use arbor_auth::jwt::decoder::JwtDecoder;
use arbor_core::config::AppConfig;
use arbor_service::tree::service::TreeService;
use arbor_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// SQLite connection pool.
    pub db_pool: SqlitePool,
    /// JWT token decoder used by the `AuthUser` extractor.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Tree maintenance service.
    pub tree_service: Arc<TreeService>,
    /// User account service.
    pub user_service: Arc<UserService>,
}
