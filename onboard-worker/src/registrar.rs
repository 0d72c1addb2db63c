//! Client registration over the record store

use onboard_storage::{ClientRecord, RecordStore, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Ensures a client record exists before any user record references it.
///
/// The existence check folds lookup errors into "does not exist": a
/// transient lookup failure can trigger a redundant client upsert, which
/// the store's keyed-write idempotence absorbs. The fold lives here and
/// only here, so switching to fail-closed is a one-place change.
pub struct ClientRegistrar {
    store: Arc<dyn RecordStore>,
}

impl ClientRegistrar {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Point lookup for a client record. Lookup errors are logged and
    /// reported as absence.
    pub async fn exists(&self, client_id: &str) -> bool {
        match self.store.client_exists(client_id).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(
                    client_id = %client_id,
                    error = %e,
                    "Client lookup failed, treating as absent"
                );
                false
            }
        }
    }

    /// Create the client record when the lookup does not find one.
    ///
    /// Check-then-act without a lock: concurrent invocations for a new
    /// client may both attempt the create, and the store's upsert-by-key
    /// semantics resolve the duplicate. Write failures propagate.
    pub async fn ensure_exists(&self, client_id: &str) -> Result<()> {
        if self.exists(client_id).await {
            debug!(client_id = %client_id, "Client already registered");
            return Ok(());
        }

        let client = ClientRecord {
            client_id: client_id.to_string(),
        };
        self.store.put_client(&client).await?;

        info!(client_id = %client_id, "Client registered");
        Ok(())
    }
}
