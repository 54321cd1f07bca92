//! HBNB Store - the two storage backends and the selector between them
//!
//! Provides:
//! - File backend: in-memory index persisted as one JSON document
//! - Relational backend: SQLite tables with schema-enforced constraints
//! - Configuration from environment-style keys
//! - `engine::open` building the process-wide storage instance

pub mod config;
pub mod db;
pub mod engine;
pub mod errors;
pub mod file;

pub use config::{Config, DbConfig};
pub use db::DbStorage;
pub use engine::open;
pub use errors::Result;
pub use file::FileStorage;
