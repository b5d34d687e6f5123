//! # arbor-database
//!
//! SQLite connection management and concrete repository implementations
//! for the Arbor entities.

pub mod connection;
pub mod migration;
pub mod repositories;
