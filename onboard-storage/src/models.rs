//! Record models for client and user registrations

use serde::{Deserialize, Serialize};

/// Client registration record, one per distinct client id.
///
/// Created on first sight of a client identifier, never mutated and
/// never deleted by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub client_id: String,
}

/// User registration record, keyed by `(client_id, user_email)`.
///
/// `client_name` is a denormalized copy of the client's display name at
/// write time. The client reference is not enforced referentially by the
/// store; ordering (client before user) is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub client_id: String,
    pub user_email: String,
    pub client_name: String,
    pub is_admin: bool,
    pub user_name: String,
}
