//! Middleware layers and request guards.

pub mod cors;
pub mod logging;
pub mod rbac;
