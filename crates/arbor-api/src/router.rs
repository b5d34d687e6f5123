//! Route definitions for the Arbor HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(tree_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, register-admin, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/register-admin", post(handlers::auth::register_admin))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Node CRUD, subtree, full tree, and export
fn tree_routes() -> Router<AppState> {
    Router::new()
        .route("/tree/nodes", get(handlers::tree::list_root_nodes))
        .route("/tree/nodes", post(handlers::tree::create_node))
        .route("/tree/nodes/{id}", get(handlers::tree::get_node))
        .route("/tree/nodes/{id}", put(handlers::tree::update_node))
        .route("/tree/nodes/{id}", delete(handlers::tree::delete_node))
        .route(
            "/tree/nodes/{id}/subtree",
            get(handlers::tree::get_subtree),
        )
        .route("/tree/tree", get(handlers::tree::get_tree))
        .route("/tree/export", get(handlers::tree::export_tree))
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
