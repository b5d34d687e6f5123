//! Tree node domain entities.

pub mod model;
pub mod tree;

pub use model::{CreateNode, Node, PATH_SEPARATOR};
pub use tree::TreeNode;
