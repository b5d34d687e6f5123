//! Tree maintenance: node CRUD, materialized paths, cycle validation,
//! and forest assembly.

pub mod assemble;
pub mod paths;
pub mod service;
pub mod validator;

pub use service::{CreateNodeRequest, TreeService, UpdateNodeRequest};
pub use validator::TreeValidator;
