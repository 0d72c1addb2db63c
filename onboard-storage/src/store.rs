//! Store capability consumed by the webhook processor

use crate::models::{ClientRecord, UserRecord};
use crate::Result;
use async_trait::async_trait;

/// Keyed record store for client and user registrations.
///
/// Implementations must provide idempotent upsert-by-key writes: the
/// check-then-create sequence upstream is not atomic, and concurrent
/// duplicate creates are resolved only by these write semantics. Each
/// call is a single bounded request; no retries happen at this layer.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upsert a client record keyed by `client_id`.
    async fn put_client(&self, client: &ClientRecord) -> Result<()>;

    /// Upsert a user record keyed by `(client_id, user_email)`.
    async fn put_user(&self, user: &UserRecord) -> Result<()>;

    /// Point lookup: whether a client record exists for `client_id`.
    /// Consults at most one row.
    async fn client_exists(&self, client_id: &str) -> Result<bool>;
}
