//! Tree handlers — node CRUD, subtree, full tree, and export.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;
use validator::Validate;

use arbor_core::error::AppError;
use arbor_entity::node::tree::TreeNode;
use arbor_service::tree::service::{
    CreateNodeRequest as SvcCreateNode, UpdateNodeRequest as SvcUpdateNode,
};

use crate::dto::request::{CreateNodeRequest, TreeQuery, UpdateNodeRequest};
use crate::dto::response::{ApiResponse, MessageResponse, NodeResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/tree/nodes
pub async fn list_root_nodes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<NodeResponse>>>, ApiError> {
    let nodes = state.tree_service.list_roots(&auth).await?;
    let nodes = nodes.iter().map(NodeResponse::from).collect();
    Ok(Json(ApiResponse::ok(nodes)))
}

/// GET /api/tree/nodes/{id}
pub async fn get_node(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<NodeResponse>>, ApiError> {
    let node = state.tree_service.get_node(&auth, id).await?;
    Ok(Json(ApiResponse::ok(NodeResponse::from(&node))))
}

/// POST /api/tree/nodes
pub async fn create_node(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateNodeRequest>,
) -> Result<Json<ApiResponse<NodeResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let node = state
        .tree_service
        .create_node(
            &auth,
            SvcCreateNode {
                name: req.name,
                description: req.description,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(NodeResponse::from(&node))))
}

/// PUT /api/tree/nodes/{id}
pub async fn update_node(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNodeRequest>,
) -> Result<Json<ApiResponse<NodeResponse>>, ApiError> {
    require_admin(&auth)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let node = state
        .tree_service
        .update_node(
            &auth,
            id,
            SvcUpdateNode {
                name: req.name,
                description: req.description,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(NodeResponse::from(&node))))
}

/// DELETE /api/tree/nodes/{id}
pub async fn delete_node(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_admin(&auth)?;

    let removed = state.tree_service.delete_node(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Deleted {removed} node(s)"),
    })))
}

/// GET /api/tree/nodes/{id}/subtree
pub async fn get_subtree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TreeNode>>>, ApiError> {
    let subtree = state.tree_service.get_subtree(&auth, id).await?;
    Ok(Json(ApiResponse::ok(subtree)))
}

/// GET /api/tree/tree?root_id=
pub async fn get_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TreeQuery>,
) -> Result<Json<ApiResponse<TreeNode>>, ApiError> {
    let tree = state.tree_service.get_tree(&auth, query.root_id).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/tree/export?root_id=
///
/// Returns the assembled tree as pretty-printed JSON.
pub async fn export_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TreeQuery>,
) -> Result<Response, ApiError> {
    let tree = state.tree_service.get_tree(&auth, query.root_id).await?;

    let json = serde_json::to_string_pretty(&tree).map_err(AppError::from)?;

    tracing::info!(
        user = %auth.username,
        root_id = ?query.root_id,
        nodes = tree.node_count(),
        "Tree exported"
    );

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        json,
    )
        .into_response())
}
