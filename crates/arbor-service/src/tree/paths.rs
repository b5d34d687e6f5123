//! Materialized path computation and cascading rewrites.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::SqliteConnection;
use uuid::Uuid;

use arbor_core::error::AppError;
use arbor_core::result::AppResult;
use arbor_database::repositories::node::NodeRepository;
use arbor_entity::node::PATH_SEPARATOR;

/// Join a parent's path with a node's own id.
///
/// Root nodes (no parent path) get their bare id as the path.
pub fn join_path(parent_path: Option<&str>, id: Uuid) -> String {
    match parent_path {
        Some(parent) => format!("{parent}{PATH_SEPARATOR}{id}"),
        None => id.to_string(),
    }
}

/// Maintains the materialized path column across creates and reparents.
#[derive(Debug, Clone)]
pub struct PathMaintainer {
    /// Node repository.
    node_repo: Arc<NodeRepository>,
    /// Whether a dangling parent reference fails the operation.
    strict_ancestry: bool,
}

impl PathMaintainer {
    /// Creates a new path maintainer.
    pub fn new(node_repo: Arc<NodeRepository>, strict_ancestry: bool) -> Self {
        Self {
            node_repo,
            strict_ancestry,
        }
    }

    /// Resolve the path of the referenced parent, honoring the ancestry
    /// policy: strict mode fails on a missing parent row, lenient mode
    /// treats it as absent and lets the node become path-root.
    pub async fn resolve_parent_path(
        &self,
        conn: &mut SqliteConnection,
        parent_id: Option<Uuid>,
    ) -> AppResult<Option<String>> {
        let Some(parent_id) = parent_id else {
            return Ok(None);
        };

        match self.node_repo.find_by_id_in(conn, parent_id).await? {
            Some(parent) => Ok(Some(parent.path)),
            None if self.strict_ancestry => Err(AppError::not_found(format!(
                "Parent node {parent_id} not found"
            ))),
            None => Ok(None),
        }
    }

    /// Rewrite descendant paths after a node moved from `old_path` to
    /// `new_path`.
    ///
    /// Descendants are processed in ascending old-path order, so every
    /// node's parent has already received its new path by the time the node
    /// itself is recomputed. Returns the number of rewritten rows.
    pub async fn cascade(
        &self,
        conn: &mut SqliteConnection,
        moved_id: Uuid,
        old_path: &str,
        new_path: &str,
    ) -> AppResult<u64> {
        let prefix = format!("{old_path}{PATH_SEPARATOR}");
        let descendants = self.node_repo.find_descendants(conn, &prefix).await?;

        let mut rewritten: HashMap<Uuid, String> = HashMap::with_capacity(descendants.len() + 1);
        rewritten.insert(moved_id, new_path.to_string());

        let mut count = 0u64;
        for descendant in &descendants {
            let parent_path = descendant
                .parent_id
                .and_then(|pid| rewritten.get(&pid).cloned());
            let path = match parent_path {
                Some(parent_path) => join_path(Some(&parent_path), descendant.id),
                // The ancestor chain is broken mid-subtree; splice the
                // relative suffix onto the new prefix instead.
                None => format!("{new_path}{}", &descendant.path[old_path.len()..]),
            };

            self.node_repo.set_path(conn, descendant.id, &path).await?;
            rewritten.insert(descendant.id, path);
            count += 1;
        }

        Ok(count)
    }
}
