//! Node CRUD operations and tree reads.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use arbor_core::config::TreeConfig;
use arbor_core::error::AppError;
use arbor_core::result::AppResult;
use arbor_database::repositories::node::NodeRepository;
use arbor_entity::node::model::{CreateNode, Node};
use arbor_entity::node::tree::TreeNode;

use crate::context::RequestContext;

use super::assemble::assemble_forest;
use super::paths::{PathMaintainer, join_path};
use super::validator::TreeValidator;

/// Manages node CRUD and tree assembly.
///
/// Every mutating operation runs read-validate-write-commit inside a single
/// transaction; dropping the transaction on an error path rolls back all of
/// its writes.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Node repository.
    node_repo: Arc<NodeRepository>,
    /// Materialized path maintenance.
    paths: PathMaintainer,
    /// Cycle validation.
    validator: TreeValidator,
}

/// Request to create a new node.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateNodeRequest {
    /// Node name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent node ID (None for root-level).
    pub parent_id: Option<Uuid>,
}

/// Request to update an existing node. `None` name/description leave the
/// field unchanged; a `None` parent moves the node to the root level.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateNodeRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New parent node ID.
    pub parent_id: Option<Uuid>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(node_repo: Arc<NodeRepository>, config: TreeConfig) -> Self {
        let paths = PathMaintainer::new(Arc::clone(&node_repo), config.strict_ancestry);
        let validator = TreeValidator::new(Arc::clone(&node_repo), config.strict_ancestry);
        Self {
            node_repo,
            paths,
            validator,
        }
    }

    /// Gets a node by ID, without children.
    pub async fn get_node(&self, _ctx: &RequestContext, node_id: Uuid) -> AppResult<Node> {
        self.node_repo
            .find_by_id(node_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Node {node_id} not found")))
    }

    /// Lists root nodes ordered by name.
    pub async fn list_roots(&self, _ctx: &RequestContext) -> AppResult<Vec<Node>> {
        self.node_repo.find_roots().await
    }

    /// Creates a new node, validating acyclicity and materializing its path.
    pub async fn create_node(
        &self,
        ctx: &RequestContext,
        req: CreateNodeRequest,
    ) -> AppResult<Node> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Node name cannot be empty"));
        }

        let node_id = Uuid::new_v4();
        let mut tx = self.node_repo.begin().await?;

        if let Some(parent_id) = req.parent_id {
            self.validator
                .validate_no_cycle(&mut tx, node_id, parent_id)
                .await?;
        }

        let parent_path = self.paths.resolve_parent_path(&mut tx, req.parent_id).await?;
        let path = join_path(parent_path.as_deref(), node_id);

        let node = self
            .node_repo
            .insert(
                &mut tx,
                &CreateNode {
                    id: node_id,
                    name: req.name,
                    description: req.description,
                    parent_id: req.parent_id,
                    path,
                },
            )
            .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit node creation: {e}")))?;

        info!(
            user_id = %ctx.user_id,
            node_id = %node.id,
            path = %node.path,
            "Node created"
        );

        Ok(node)
    }

    /// Updates a node's name, description, and/or parent. A parent change
    /// revalidates acyclicity and cascades the path rewrite to every
    /// descendant.
    pub async fn update_node(
        &self,
        ctx: &RequestContext,
        node_id: Uuid,
        req: UpdateNodeRequest,
    ) -> AppResult<Node> {
        let mut tx = self.node_repo.begin().await?;

        let mut node = self
            .node_repo
            .find_by_id_in(&mut tx, node_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Node {node_id} not found")))?;

        if let Some(name) = req.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Node name cannot be empty"));
            }
            node.name = name;
        }
        if let Some(description) = req.description {
            node.description = Some(description);
        }

        let reparented = req.parent_id != node.parent_id;
        if reparented {
            if let Some(parent_id) = req.parent_id {
                self.validator
                    .validate_no_cycle(&mut tx, node.id, parent_id)
                    .await?;
            }

            let old_path = node.path.clone();
            node.parent_id = req.parent_id;

            let parent_path = self.paths.resolve_parent_path(&mut tx, node.parent_id).await?;
            node.path = join_path(parent_path.as_deref(), node.id);

            node.updated_at = Utc::now();
            self.node_repo.update(&mut tx, &node).await?;

            let rewritten = self
                .paths
                .cascade(&mut tx, node.id, &old_path, &node.path)
                .await?;

            info!(
                user_id = %ctx.user_id,
                node_id = %node.id,
                old_path = %old_path,
                new_path = %node.path,
                descendants = rewritten,
                "Node reparented"
            );
        } else {
            node.updated_at = Utc::now();
            self.node_repo.update(&mut tx, &node).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit node update: {e}")))?;

        info!(user_id = %ctx.user_id, node_id = %node.id, "Node updated");

        Ok(node)
    }

    /// Deletes a node and its entire subtree. Returns the number of nodes
    /// removed.
    pub async fn delete_node(&self, ctx: &RequestContext, node_id: Uuid) -> AppResult<u64> {
        let mut tx = self.node_repo.begin().await?;

        let node = self
            .node_repo
            .find_by_id_in(&mut tx, node_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Node {node_id} not found")))?;

        let removed = self
            .node_repo
            .delete_subtree(&mut tx, node.id, &node.path)
            .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit node deletion: {e}")))?;

        info!(
            user_id = %ctx.user_id,
            node_id = %node_id,
            path = %node.path,
            removed = removed,
            "Node deleted"
        );

        Ok(removed)
    }

    /// Assembles the tree rooted at `root_id`, or the whole forest under a
    /// synthetic root when no root is given.
    pub async fn get_tree(
        &self,
        _ctx: &RequestContext,
        root_id: Option<Uuid>,
    ) -> AppResult<TreeNode> {
        match root_id {
            Some(root_id) => {
                let root = self
                    .node_repo
                    .find_by_id(root_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::invalid_root(format!("Root node {root_id} not found"))
                    })?;

                let nodes = self.node_repo.find_subtree(&root.path).await?;
                assemble_forest(&nodes, Some(root_id))
                    .pop()
                    .ok_or_else(|| AppError::internal("Subtree assembly produced no root"))
            }
            None => {
                let nodes = self.node_repo.find_all_ordered().await?;
                Ok(TreeNode::synthetic_root(assemble_forest(&nodes, None)))
            }
        }
    }

    /// Returns the assembled children of a node (its subtree minus the node
    /// itself).
    pub async fn get_subtree(
        &self,
        ctx: &RequestContext,
        node_id: Uuid,
    ) -> AppResult<Vec<TreeNode>> {
        let node = self.get_node(ctx, node_id).await?;
        let nodes = self.node_repo.find_subtree(&node.path).await?;

        Ok(assemble_forest(&nodes, Some(node_id))
            .pop()
            .map(|tree| tree.children)
            .unwrap_or_default())
    }
}
