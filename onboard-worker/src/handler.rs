//! HTTP handlers for the webhook API
//!
//! Implements:
//! - GET / - Okta endpoint verification challenge echo
//! - POST / - Event delivery; group-membership adds drive registration
//! - GET /health - Health check endpoint

use crate::processor::{EventProcessor, ProcessError};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use onboard_core::event::GROUP_ADD_USER;
use onboard_core::EventEnvelope;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Header Okta sends on endpoint verification requests
pub const VERIFICATION_HEADER: &str = "x-okta-verification-challenge";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<EventProcessor>,
}

/// Body of the verification challenge response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub verification: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Endpoint verification challenge
///
/// Okta probes the endpoint with a GET carrying the challenge header;
/// the value must be echoed back to prove endpoint ownership. A missing
/// header is a client error.
pub async fn verify_handler(headers: HeaderMap) -> Result<Json<VerificationResponse>, ApiError> {
    let challenge = headers
        .get(VERIFICATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingChallenge)?;

    info!("Answering endpoint verification challenge");
    Ok(Json(VerificationResponse {
        verification: challenge.to_string(),
    }))
}

/// Event delivery
///
/// The body must parse as an event envelope. Group-membership-add events
/// are handed to the processor; every other event type is acknowledged
/// without action. Success and acknowledgment both respond 200 with an
/// empty JSON body; a store failure during processing is a server error.
pub async fn event_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let envelope: EventEnvelope = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Failed to parse event envelope");
        ApiError::InvalidPayload(format!("Invalid JSON: {}", e))
    })?;

    match envelope.event_type() {
        Some(GROUP_ADD_USER) => {
            state.processor.process(&envelope).await.map_err(|e| {
                error!(
                    event_id = %envelope.event_id,
                    event_type = GROUP_ADD_USER,
                    error = %e,
                    "Event processing failed"
                );
                ApiError::Processing(e)
            })?;
        }
        other => {
            debug!(
                event_id = %envelope.event_id,
                event_type = ?other,
                "Acknowledging non-qualifying event"
            );
        }
    }

    Ok(empty_json(StatusCode::OK))
}

/// Health check endpoint
///
/// Returns 200 OK if the service is running.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// 200-family response with an empty JSON body
fn empty_json(status: StatusCode) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        String::new(),
    )
        .into_response()
}

/// Error types for the webhook handlers
#[derive(Debug)]
pub enum ApiError {
    MissingChallenge,
    InvalidPayload(String),
    Processing(ProcessError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingChallenge => {
                warn!("No verification challenge provided in request");
                (
                    StatusCode::BAD_REQUEST,
                    "Missing verification challenge header",
                )
            }
            ApiError::InvalidPayload(ref msg) => {
                warn!(error = %msg, "Invalid event payload received");
                (StatusCode::BAD_REQUEST, "Invalid payload")
            }
            ApiError::Processing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Event processing failed")
            }
        };

        (status, message).into_response()
    }
}
