//! Mock implementations for external collaborators
//!
//! Provides an in-memory [`RecordStore`] so handler and processor tests
//! run without a database.

use async_trait::async_trait;
use onboard_storage::{ClientRecord, Error, RecordStore, Result, UserRecord};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// A single write accepted by [`MemoryStore`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Client { client_id: String },
    User { client_id: String, user_email: String },
}

/// Failure switches for [`MemoryStore`].
#[derive(Debug, Default)]
pub struct FaultConfig {
    pub fail_client_writes: bool,
    pub fail_user_writes: bool,
    pub fail_lookups: bool,
}

/// In-memory record store with upsert-by-key semantics.
///
/// Mirrors the keyed-write contract of the real backend: client records
/// keyed by id, user records keyed by `(client id, email)`, repeats
/// overwrite. Every accepted write is appended to a journal so tests can
/// assert write counts and ordering.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    faults: Mutex<FaultConfig>,
}

#[derive(Default)]
struct Inner {
    clients: BTreeMap<String, ClientRecord>,
    users: BTreeMap<(String, String), UserRecord>,
    journal: Vec<WriteOp>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the fault configuration.
    pub fn set_faults(&self, faults: FaultConfig) {
        *self.faults.lock() = faults;
    }

    pub fn client(&self, client_id: &str) -> Option<ClientRecord> {
        self.inner.lock().clients.get(client_id).cloned()
    }

    pub fn user(&self, client_id: &str, user_email: &str) -> Option<UserRecord> {
        self.inner
            .lock()
            .users
            .get(&(client_id.to_string(), user_email.to_string()))
            .cloned()
    }

    pub fn client_count(&self) -> usize {
        self.inner.lock().clients.len()
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().users.len()
    }

    /// All accepted writes, in order.
    pub fn journal(&self) -> Vec<WriteOp> {
        self.inner.lock().journal.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put_client(&self, client: &ClientRecord) -> Result<()> {
        if self.faults.lock().fail_client_writes {
            return Err(Error::Internal("injected client write failure".to_string()));
        }

        let mut inner = self.inner.lock();
        inner.journal.push(WriteOp::Client {
            client_id: client.client_id.clone(),
        });
        inner.clients.insert(client.client_id.clone(), client.clone());
        Ok(())
    }

    async fn put_user(&self, user: &UserRecord) -> Result<()> {
        if self.faults.lock().fail_user_writes {
            return Err(Error::Internal("injected user write failure".to_string()));
        }

        let mut inner = self.inner.lock();
        inner.journal.push(WriteOp::User {
            client_id: user.client_id.clone(),
            user_email: user.user_email.clone(),
        });
        inner
            .users
            .insert((user.client_id.clone(), user.user_email.clone()), user.clone());
        Ok(())
    }

    async fn client_exists(&self, client_id: &str) -> Result<bool> {
        if self.faults.lock().fail_lookups {
            return Err(Error::Internal("injected lookup failure".to_string()));
        }

        Ok(self.inner.lock().clients.contains_key(client_id))
    }
}
