//! Webhook endpoint handler.
//!
//! Runs the quick actions of a GitHub delivery before answering, so the
//! response status tells GitHub (and whoever reads the delivery log) whether
//! every command went through.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::AppState;
use crate::dispatch::DispatchError;
use crate::events::EventType;
use crate::types::DeliveryId;

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub delivery ID.
const HEADER_DELIVERY: &str = "x-github-delivery";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing required header.
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        match self {
            e @ WebhookError::MissingHeader(_) => {
                (StatusCode::BAD_REQUEST, format!("{e}\n")).into_response()
            }
            WebhookError::Dispatch(DispatchError::Commands(failures)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "errors": failures.messages() })),
            )
                .into_response(),
            WebhookError::Dispatch(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}\n")).into_response()
            }
        }
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Required headers:
///   - `X-GitHub-Event`: Event type (e.g., "issue_comment")
///   - `X-GitHub-Delivery`: Unique delivery ID
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 200 OK: Every quick action succeeded (or there was nothing to do)
/// - 202 Accepted: No quick action is registered for the event type
/// - 400 Bad Request: Missing header
/// - 500 Internal Server Error: JSON `{"errors": [...]}` when quick actions
///   failed, plain text when the payload could not be normalized
///
/// If the client goes away mid-delivery, the request's cancellation token
/// fires and commands not yet started are skipped.
pub async fn webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError> {
    let event_type = get_header(&headers, HEADER_EVENT)?;
    let delivery_id = DeliveryId::new(get_header(&headers, HEADER_DELIVERY)?);

    debug!(
        delivery_id = %delivery_id,
        event_type = %event_type,
        "Received webhook"
    );

    let handled = EventType::from_tag(&event_type)
        .is_some_and(|t| app_state.dispatcher().handles().contains(&t));
    if !handled {
        debug!(
            delivery_id = %delivery_id,
            event_type = %event_type,
            "No quick action for event type, acknowledged"
        );
        return Ok((StatusCode::ACCEPTED, "Accepted"));
    }

    // Dropping the request future cancels the delivery.
    let cancel = CancellationToken::new();
    let guard = cancel.clone().drop_guard();

    let result = app_state
        .dispatcher()
        .handle(&cancel, &event_type, &delivery_id, &body)
        .await;
    guard.disarm();

    match result {
        Ok(()) => {
            info!(
                delivery_id = %delivery_id,
                event_type = %event_type,
                "Webhook processed"
            );
            Ok((StatusCode::OK, "OK"))
        }
        Err(e) => {
            warn!(
                delivery_id = %delivery_id,
                event_type = %event_type,
                error = %e,
                "Webhook processing failed"
            );
            Err(e.into())
        }
    }
}

/// Extracts a required header value as a string.
fn get_header(headers: &HeaderMap, name: &'static str) -> Result<String, WebhookError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .ok_or(WebhookError::MissingHeader(name))
}
