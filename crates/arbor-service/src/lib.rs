//! # arbor-service
//!
//! Business logic service layer for Arbor. Each service orchestrates
//! repositories and authentication primitives to implement application-level
//! use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod tree;
pub mod user;

pub use context::RequestContext;
pub use tree::{CreateNodeRequest, TreeService, TreeValidator, UpdateNodeRequest};
pub use user::UserService;
