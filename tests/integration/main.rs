//! Integration tests driving the full router over in-memory SQLite.

mod helpers;

mod auth_test;
mod tree_test;
