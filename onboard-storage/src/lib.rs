//! # Onboard Storage
//!
//! Record storage for client and user registrations. The store is a
//! keyed-upsert capability: writes are idempotent by key, and the only
//! read is a single-row point lookup. PostgreSQL-backed, with the table
//! names supplied by configuration at process start.

pub mod models;
pub mod postgres;
pub mod store;

// Re-export commonly used types
pub use models::{ClientRecord, UserRecord};
pub use postgres::{PostgresStore, TableConfig};
pub use store::RecordStore;

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for storage operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
