//! Tree node entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Separator between ancestor ids in a materialized path.
pub const PATH_SEPARATOR: char = '/';

/// A node in the tree hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Node {
    /// Unique node identifier.
    pub id: Uuid,
    /// Node name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Parent node ID (null for root nodes).
    pub parent_id: Option<Uuid>,
    /// Materialized path: ancestor ids joined by `/`, ending in this
    /// node's own id (e.g., `"<root-id>/<child-id>"`).
    pub path: String,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
    /// When the node was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Check if this is a root node (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new node.
///
/// The id is generated up front because the materialized path must end in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNode {
    /// Pre-generated node ID.
    pub id: Uuid,
    /// Node name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent node (None for root).
    pub parent_id: Option<Uuid>,
    /// Full materialized path.
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_root() {
        let id = Uuid::new_v4();
        let node = Node {
            id,
            name: "root".to_string(),
            description: None,
            parent_id: None,
            path: id.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(node.is_root());
        assert_eq!(node.path, id.to_string());
    }
}
