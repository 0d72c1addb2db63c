//! Event processing pipeline
//!
//! Turns one qualifying lifecycle event into at most two store writes:
//! extract identity, register the client when absent, persist the user.

use crate::registrar::ClientRegistrar;
use onboard_core::{EventEnvelope, ExtractedIdentity};
use onboard_storage::{RecordStore, UserRecord};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Errors surfaced by event processing
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Client registration failed: {0}")]
    ClientWrite(#[source] onboard_storage::Error),

    #[error("User registration failed: {0}")]
    UserWrite(#[source] onboard_storage::Error),
}

/// Processes one inbound envelope per invocation.
///
/// Stateless across invocations: no cache of known clients, no retries.
/// The store is the only synchronization point under concurrent
/// invocations for the same client id.
pub struct EventProcessor {
    store: Arc<dyn RecordStore>,
    registrar: ClientRegistrar,
}

impl EventProcessor {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let registrar = ClientRegistrar::new(store.clone());
        Self { store, registrar }
    }

    /// Process one inbound envelope.
    ///
    /// The client record is ensured before the user record is written; a
    /// client write failure aborts with no user write. Extraction gaps
    /// (missing `User` or `UserGroup` targets) fall through to
    /// default-valued fields rather than failing the event.
    #[instrument(skip(self, envelope), fields(event_id = %envelope.event_id))]
    pub async fn process(&self, envelope: &EventEnvelope) -> Result<(), ProcessError> {
        let identity = ExtractedIdentity::from_targets(envelope.targets());

        let user = UserRecord {
            client_id: identity.client_id,
            user_email: identity.user_email,
            client_name: identity.client_name,
            is_admin: identity.is_admin,
            user_name: identity.user_name,
        };

        self.registrar
            .ensure_exists(&user.client_id)
            .await
            .map_err(ProcessError::ClientWrite)?;

        self.store
            .put_user(&user)
            .await
            .map_err(ProcessError::UserWrite)?;

        info!(
            client_id = %user.client_id,
            user_email = %user.user_email,
            is_admin = user.is_admin,
            "User registered"
        );
        Ok(())
    }
}
