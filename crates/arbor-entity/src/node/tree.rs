//! Nested tree structures for hierarchical display and export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Node;

/// A node with its descendants attached, as returned by the tree endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Node ID.
    pub id: Uuid,
    /// Node name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent node ID.
    pub parent_id: Option<Uuid>,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
    /// When the node was last updated.
    pub updated_at: DateTime<Utc>,
    /// Child subtrees, ordered by path.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// A childless tree node copied from a flat entity row.
    pub fn leaf(node: &Node) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            description: node.description.clone(),
            parent_id: node.parent_id,
            created_at: node.created_at,
            updated_at: node.updated_at,
            children: Vec::new(),
        }
    }

    /// The synthetic wrapper returned when assembling a multi-root forest.
    pub fn synthetic_root(children: Vec<TreeNode>) -> Self {
        Self {
            id: Uuid::nil(),
            name: "Root".to_string(),
            description: None,
            parent_id: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            children,
        }
    }

    /// Total number of nodes in this subtree, excluding synthetic wrappers.
    pub fn node_count(&self) -> u64 {
        let own = u64::from(!self.id.is_nil());
        own + self.children.iter().map(TreeNode::node_count).sum::<u64>()
    }
}
