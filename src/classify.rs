//! Non-2xx response classification.
//!
//! The API folds its error taxonomy into a handful of status codes and
//! embeds the finer-grained type in the body (`error` tag plus human
//! `description`). [`classify`] recovers that structure: it is applied as
//! a decorator to every response the client receives, passing 2xx
//! responses through untouched and turning everything else into a typed
//! [`ApiError`].

use serde::Deserialize;

use crate::error::{ApiError, ApiErrorKind};
use crate::transport::RawResponse;

/// Message used when an error body carries no parseable `description`.
pub const FALLBACK_MESSAGE: &str = "Something went wrong in the request.";

const UNKNOWN_TAG: &str = "UnknownError";

/// Structured error payload the API embeds in non-2xx bodies.
///
/// 404/415/500 responses have no reliable structured body, so every field
/// is optional and a parse failure degrades to defaults — it must never
/// mask the HTTP-level error itself.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ErrorBody {
    fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    fn tag(&self) -> String {
        self.error.clone().unwrap_or_else(|| UNKNOWN_TAG.to_string())
    }
}

/// Pass 2xx responses through; classify everything else.
///
/// # Errors
///
/// Returns [`ApiError`] for any non-2xx status, with the raw response
/// attached for caller inspection.
pub fn classify(response: RawResponse) -> Result<RawResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }

    let body = ErrorBody::parse(&response.body);
    let (kind, error_type) = match response.status {
        400 => (ApiErrorKind::InvalidRequest, body.tag()),
        403 => (ApiErrorKind::Unauthorized, body.tag()),
        404 => (ApiErrorKind::NotFound, "NotFoundError".to_string()),
        415 => (ApiErrorKind::MissingPayload, "MissingJsonPayloadError".to_string()),
        500 => (ApiErrorKind::ServerFault, "ServerError".to_string()),
        _ => (ApiErrorKind::UnknownHttp, UNKNOWN_TAG.to_string()),
    };
    let message = body
        .description
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
    tracing::debug!(
        status = response.status,
        kind = %kind,
        error_type = %error_type,
        "classified API error response"
    );
    Err(ApiError {
        kind,
        error_type,
        message,
        response,
    })
}
