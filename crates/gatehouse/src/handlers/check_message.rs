//! Error-path exercise handler.
//!
//! Consumers use this endpoint to verify the error surfaces end-to-end: a
//! missing message is a 400 with the fixed body, "OK" (any case) echoes
//! back with a 200, and anything else panics so the outermost boundary
//! converts it into the generic 500 body.

use crate::errors::GateError;
use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Query parameters for `/v1/check-message`.
#[derive(Debug, Deserialize)]
pub struct CheckMessageParams {
    /// Message to check; blank counts as missing.
    #[serde(default)]
    pub message: String,
}

/// Response for a message that checked out.
#[derive(Debug, Clone, Serialize)]
pub struct CheckMessageResponse {
    /// The message echoed back.
    pub message: String,
}

/// Handler for GET /v1/check-message
///
/// ## Response
///
/// - 400 when the `message` query parameter is missing or blank
/// - 200 echoing the message when it equals "OK" (case-insensitive)
/// - 500 (via the panic boundary) for any other message
#[allow(clippy::panic)] // the non-OK arm exists to exercise the panic boundary
#[instrument(skip_all, name = "gate.handlers.check_message")]
pub async fn check_message(
    Query(params): Query<CheckMessageParams>,
) -> Result<Json<CheckMessageResponse>, GateError> {
    if params.message.trim().is_empty() {
        return Err(GateError::BadRequest("Message was missing".to_string()));
    }

    if params.message.eq_ignore_ascii_case("OK") {
        return Ok(Json(CheckMessageResponse {
            message: params.message,
        }));
    }

    panic!("{}", params.message);
}
