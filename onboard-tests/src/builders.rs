//! Type-safe builders for constructing test objects
//!
//! Builders provide a fluent API for event envelopes and the HTTP
//! requests that deliver them.

use axum::body::Body;
use http::{header, Request};
use serde_json::{json, Value};

/// Builder for event hook envelopes
pub struct EnvelopeBuilder {
    event_id: String,
    event_type: String,
    targets: Vec<Value>,
}

impl EnvelopeBuilder {
    /// Create a builder for a group-membership-add envelope with no
    /// targets yet.
    pub fn new() -> Self {
        Self {
            event_id: "evt-1".to_string(),
            event_type: "group.user_membership.add".to_string(),
            targets: vec![],
        }
    }

    /// Set the envelope's event id
    pub fn event_id(mut self, id: &str) -> Self {
        self.event_id = id.to_string();
        self
    }

    /// Set the lifecycle event's type
    pub fn event_type(mut self, event_type: &str) -> Self {
        self.event_type = event_type.to_string();
        self
    }

    /// Add a `User` target with the given email and display name
    pub fn user_target(mut self, email: &str, name: &str) -> Self {
        self.targets.push(json!({
            "id": "00u1",
            "type": "User",
            "alternateId": email,
            "displayName": name,
        }));
        self
    }

    /// Add a `UserGroup` target with the given display name
    pub fn group_target(mut self, display_name: &str) -> Self {
        self.targets.push(json!({
            "id": "00g1",
            "type": "UserGroup",
            "alternateId": "unknown",
            "displayName": display_name,
        }));
        self
    }

    /// Add an arbitrary target value
    pub fn raw_target(mut self, target: Value) -> Self {
        self.targets.push(target);
        self
    }

    /// Build the envelope as a JSON value
    pub fn build(self) -> Value {
        json!({
            "eventId": self.event_id,
            "eventTime": "2024-05-21T19:59:27.137Z",
            "data": {
                "events": [
                    {
                        "eventType": self.event_type,
                        "target": self.targets,
                    }
                ]
            }
        })
    }

    /// Build a POST request delivering the envelope
    pub fn into_request(self) -> Request<Body> {
        let body = serde_json::to_vec(&self.build()).expect("envelope serializes");
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request builds")
    }
}

impl Default for EnvelopeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a GET verification request carrying the challenge header
pub fn verification_request(challenge: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/")
        .header("X-Okta-Verification-Challenge", challenge)
        .body(Body::empty())
        .expect("request builds")
}

/// Build a POST request with a raw, possibly malformed body
pub fn raw_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}
