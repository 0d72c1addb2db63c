//! Okta event hook envelope
//!
//! Wire-shaped types for the payload Okta delivers on POST. These are
//! structural only: unknown fields are ignored, missing optional fields
//! fall back to their zero values, and no validation happens beyond
//! shape-matching.
//!
//! The receiver only ever inspects the first lifecycle event of an
//! envelope; any further events are currently ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Event type for assigning an application to a user.
pub const APP_ADD_USER: &str = "application.user_membership.add";
/// Event type for creating a new user.
pub const USER_CREATE: &str = "user.lifecycle.create";
/// Event type for adding a user to a group. The only type that drives
/// registration.
pub const GROUP_ADD_USER: &str = "group.user_membership.add";

/// An entity (user or group) affected by a lifecycle event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(default)]
    pub id: String,
    /// Discriminator: `"User"`, `"UserGroup"`, or other (ignored).
    #[serde(rename = "type", default)]
    pub target_type: String,
    /// Secondary identifier; for `User` targets this is the email.
    #[serde(default)]
    pub alternate_id: String,
    #[serde(default)]
    pub display_name: String,
}

/// Result of the action described by a lifecycle event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(default)]
    pub result: String,
}

/// A single lifecycle event inside the envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "display", default)]
    pub display_message: String,
    #[serde(default)]
    pub severity: String,
    /// Actor of the event; shape varies per event type, kept opaque.
    #[serde(default)]
    pub actor: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub outcome: Outcome,
    #[serde(rename = "target", default)]
    pub targets: Vec<Target>,
}

/// Payload section of the envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub events: Vec<LifecycleEvent>,
}

/// Top-level event hook envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub data: EventData,
}

impl EventEnvelope {
    /// First lifecycle event of the envelope, if any.
    pub fn first_event(&self) -> Option<&LifecycleEvent> {
        self.data.events.first()
    }

    /// Event type of the first lifecycle event.
    pub fn event_type(&self) -> Option<&str> {
        self.first_event().map(|e| e.event_type.as_str())
    }

    /// Targets of the first lifecycle event; empty when the envelope
    /// carries no events.
    pub fn targets(&self) -> &[Target] {
        self.first_event()
            .map(|e| e.targets.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_envelope() {
        let value = json!({
            "eventId": "evt-42",
            "eventTime": "2024-05-21T19:59:27.137Z",
            "data": {
                "events": [{
                    "uuid": "a1b2",
                    "published": "2024-05-21T19:59:26.000Z",
                    "eventType": GROUP_ADD_USER,
                    "version": "0",
                    "display": "Add user to group membership",
                    "severity": "INFO",
                    "actor": {"id": "00u0", "type": "User"},
                    "outcome": {"result": "SUCCESS"},
                    "target": [
                        {
                            "id": "00u1",
                            "type": "User",
                            "alternateId": "u@x.com",
                            "displayName": "U Name"
                        },
                        {
                            "id": "00g1",
                            "type": "UserGroup",
                            "alternateId": "unknown",
                            "displayName": "EXT-acme"
                        }
                    ]
                }]
            }
        });

        let envelope: EventEnvelope = serde_json::from_value(value).unwrap();
        assert_eq!(envelope.event_id, "evt-42");
        assert_eq!(envelope.event_type(), Some(GROUP_ADD_USER));
        assert_eq!(envelope.targets().len(), 2);
        assert_eq!(envelope.targets()[0].alternate_id, "u@x.com");
        assert_eq!(envelope.targets()[1].display_name, "EXT-acme");

        let event = envelope.first_event().unwrap();
        assert_eq!(event.outcome.result, "SUCCESS");
        assert_eq!(event.severity, "INFO");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let value = json!({
            "eventId": "evt-1",
            "eventTime": "t",
            "contentType": "application/json",
            "data": {
                "events": [{
                    "eventType": USER_CREATE,
                    "legacyEventType": "core.user.config.user_creation.success",
                    "target": []
                }]
            }
        });

        let envelope: EventEnvelope = serde_json::from_value(value).unwrap();
        assert_eq!(envelope.event_type(), Some(USER_CREATE));
    }

    #[test]
    fn missing_fields_default() {
        let envelope: EventEnvelope = serde_json::from_value(json!({})).unwrap();
        assert_eq!(envelope.event_id, "");
        assert!(envelope.first_event().is_none());
        assert_eq!(envelope.event_type(), None);
        assert!(envelope.targets().is_empty());
    }

    #[test]
    fn only_first_event_is_exposed() {
        let value = json!({
            "data": {
                "events": [
                    {"eventType": GROUP_ADD_USER, "target": []},
                    {"eventType": APP_ADD_USER, "target": []}
                ]
            }
        });

        let envelope: EventEnvelope = serde_json::from_value(value).unwrap();
        assert_eq!(envelope.event_type(), Some(GROUP_ADD_USER));
    }
}
