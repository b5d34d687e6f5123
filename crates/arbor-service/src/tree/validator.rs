//! Cycle detection for reparenting operations.

use std::collections::HashSet;
use std::sync::Arc;

use sqlx::SqliteConnection;
use uuid::Uuid;

use arbor_core::error::AppError;
use arbor_core::result::AppResult;
use arbor_database::repositories::node::NodeRepository;

/// Validates that placing a node under a new parent keeps the parent graph
/// acyclic.
#[derive(Debug, Clone)]
pub struct TreeValidator {
    /// Node repository.
    node_repo: Arc<NodeRepository>,
    /// Whether a missing ancestor record fails the walk.
    strict_ancestry: bool,
}

impl TreeValidator {
    /// Creates a new tree validator.
    pub fn new(node_repo: Arc<NodeRepository>, strict_ancestry: bool) -> Self {
        Self {
            node_repo,
            strict_ancestry,
        }
    }

    /// Walk the ancestor chain upward from `new_parent_id`, rejecting the
    /// placement if `node_id` (or any already-visited node) reappears.
    ///
    /// The walk is a pure read; the caller runs it inside the same
    /// transaction as the subsequent path update.
    pub async fn validate_no_cycle(
        &self,
        conn: &mut SqliteConnection,
        node_id: Uuid,
        new_parent_id: Uuid,
    ) -> AppResult<()> {
        let mut visited: HashSet<Uuid> = HashSet::from([node_id]);
        let mut current = new_parent_id;

        loop {
            if !visited.insert(current) {
                return Err(AppError::cycle_detected(format!(
                    "Node {node_id} cannot be placed under {new_parent_id}: \
                     the move would make the node its own ancestor"
                )));
            }

            match self.node_repo.parent_link(conn, current).await? {
                // Reached a root: the chain is acyclic.
                Some(None) => return Ok(()),
                Some(Some(parent_id)) => current = parent_id,
                // Ancestor record missing: bounded chain, but possibly a
                // broken one.
                None if self.strict_ancestry => {
                    return Err(AppError::not_found(format!(
                        "Ancestor node {current} not found while validating placement"
                    )));
                }
                None => return Ok(()),
            }
        }
    }
}
