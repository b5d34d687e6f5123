//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request body. Password length policy is enforced by the
/// account service from configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create node request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNodeRequest {
    /// Node name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent node ID.
    pub parent_id: Option<Uuid>,
}

/// Update node request. Omitted name/description are left unchanged; an
/// omitted parent moves the node to the root level.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateNodeRequest {
    /// New name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New parent node ID.
    pub parent_id: Option<Uuid>,
}

/// Query parameters selecting an optional tree root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeQuery {
    /// Root node of the requested tree; the whole forest when absent.
    pub root_id: Option<Uuid>,
}
