//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use arbor_auth::password::hasher::PasswordHasher;
use arbor_core::config::AppConfig;
use arbor_database::repositories::user::UserRepository;
use arbor_entity::user::model::CreateUser;
use arbor_entity::user::role::UserRole;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: SqlitePool,
}

impl TestApp {
    /// Create a new test application backed by an in-memory database.
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        // A single connection keeps every request on the same in-memory db.
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        arbor_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let state = arbor_api::app::build_state(config, db_pool.clone());
        let router = arbor_api::router::build_router(state);

        Self { router, db_pool }
    }

    /// Issue a request and return the status plus the parsed JSON body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    /// GET helper.
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, path, token, None).await
    }

    /// POST helper.
    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request(Method::POST, path, token, Some(body)).await
    }

    /// PUT helper.
    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, path, token, Some(body)).await
    }

    /// DELETE helper.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, token, None).await
    }

    /// Register a regular user and return a login token.
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let (status, _) = self
            .post(
                "/api/auth/register",
                None,
                json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        self.login(username, password).await
    }

    /// Log an existing user in and return the token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        body["data"]["token"]
            .as_str()
            .expect("login response token")
            .to_string()
    }

    /// Seed an administrator directly in the database and return a token.
    pub async fn seed_admin(&self, username: &str, password: &str) -> String {
        let hasher = PasswordHasher::new();
        let repo = UserRepository::new(self.db_pool.clone());
        repo.create(&CreateUser {
            username: username.to_string(),
            password_hash: hasher.hash_password(password).expect("hash password"),
            role: UserRole::Administrator,
        })
        .await
        .expect("seed admin");

        self.login(username, password).await
    }

    /// Create a node via the API and return its id.
    pub async fn create_node(
        &self,
        token: &str,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Uuid {
        let (status, body) = self
            .post(
                "/api/tree/nodes",
                Some(token),
                json!({ "name": name, "parent_id": parent_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create node failed: {body}");

        body["data"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("created node id")
    }

    /// Read a node's materialized path straight from the database.
    pub async fn path_of(&self, id: Uuid) -> Option<String> {
        sqlx::query_scalar("SELECT path FROM nodes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .expect("query node path")
    }
}
