//! Infrastructure layer - External systems integration
//!
//! This module handles the database connection, table bootstrap
//! and the user repository.

pub mod db;
pub mod repositories;

pub use db::Database;
pub use repositories::{DeleteOutcome, InsertOutcome, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
