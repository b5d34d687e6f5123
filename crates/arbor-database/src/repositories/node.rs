//! Node repository: CRUD and materialized-path tree queries.

use chrono::Utc;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use uuid::Uuid;

use arbor_core::error::{AppError, ErrorKind};
use arbor_core::result::AppResult;
use arbor_entity::node::model::{CreateNode, Node};

/// Repository for node CRUD and subtree queries.
///
/// Read helpers execute against the pool. Methods that participate in a
/// mutating unit of work take a `&mut SqliteConnection` so that the service
/// layer can scope validation, writes, and the path cascade to a single
/// transaction obtained from [`NodeRepository::begin`].
#[derive(Debug, Clone)]
pub struct NodeRepository {
    pool: SqlitePool,
}

impl NodeRepository {
    /// Create a new node repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin a transaction for a read-validate-write-commit unit of work.
    ///
    /// Dropping the transaction without committing rolls back every write
    /// made through it.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    /// Find a node by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find node", e))
    }

    /// Find a node by ID inside an open transaction.
    pub async fn find_by_id_in(
        &self,
        conn: &mut SqliteConnection,
        id: Uuid,
    ) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find node", e))
    }

    /// List root nodes ordered by name.
    pub async fn find_roots(&self) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE parent_id IS NULL ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list root nodes", e))
    }

    /// Load every node, ordered by path so ancestors sort before descendants.
    pub async fn find_all_ordered(&self) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes ORDER BY path ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list nodes", e))
    }

    /// Load a node and its whole subtree via a path-prefix range scan,
    /// ordered by path.
    pub async fn find_subtree(&self, path: &str) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes WHERE path = ? OR path LIKE ? ORDER BY path ASC",
        )
        .bind(path)
        .bind(format!("{path}/%"))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load subtree", e))
    }

    /// Fetch the `parent_id` link of a node, distinguishing a missing row
    /// (`None`) from a root node (`Some(None)`). Used by the cycle walk.
    pub async fn parent_link(
        &self,
        conn: &mut SqliteConnection,
        id: Uuid,
    ) -> AppResult<Option<Option<Uuid>>> {
        sqlx::query_scalar::<_, Option<Uuid>>("SELECT parent_id FROM nodes WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read parent link", e))
    }

    /// Load all strict descendants of the given path prefix, ordered by path
    /// so ancestors come first. `prefix` must already end in the separator.
    pub async fn find_descendants(
        &self,
        conn: &mut SqliteConnection,
        prefix: &str,
    ) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE path LIKE ? ORDER BY path ASC")
            .bind(format!("{prefix}%"))
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list descendants", e))
    }

    /// Insert a new node.
    pub async fn insert(&self, conn: &mut SqliteConnection, data: &CreateNode) -> AppResult<Node> {
        let now = Utc::now();
        sqlx::query_as::<_, Node>(
            "INSERT INTO nodes (id, name, description, parent_id, path, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.parent_id)
        .bind(&data.path)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create node", e))
    }

    /// Persist a node's mutable fields.
    pub async fn update(&self, conn: &mut SqliteConnection, node: &Node) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE nodes SET name = ?, description = ?, parent_id = ?, path = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&node.name)
        .bind(&node.description)
        .bind(node.parent_id)
        .bind(&node.path)
        .bind(node.updated_at)
        .bind(node.id)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update node", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Node {} not found", node.id)));
        }
        Ok(())
    }

    /// Rewrite a single node's materialized path (descendant cascade step).
    pub async fn set_path(
        &self,
        conn: &mut SqliteConnection,
        id: Uuid,
        path: &str,
    ) -> AppResult<()> {
        sqlx::query("UPDATE nodes SET path = ? WHERE id = ?")
            .bind(path)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rewrite path", e))?;
        Ok(())
    }

    /// Delete a node and its whole subtree. Returns the number of rows
    /// removed.
    pub async fn delete_subtree(
        &self,
        conn: &mut SqliteConnection,
        id: Uuid,
        path: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM nodes WHERE id = ? OR path LIKE ?")
            .bind(id)
            .bind(format!("{path}/%"))
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete subtree", e))?;
        Ok(result.rows_affected())
    }
}
