//! Error taxonomy for the PurpleAir client.
//!
//! Three layers, all programmatically distinguishable without string
//! matching on messages:
//!
//! - [`OptionsError`] — the caller supplied malformed input; raised before
//!   any network call is made.
//! - [`ApiError`] — the API answered with a non-2xx status; carries the
//!   classified [`ApiErrorKind`], the error-type tag embedded in the body,
//!   and the raw response for inspection.
//! - [`TransportError`] — the HTTP transport itself failed (connection,
//!   TLS, timeout configured by the caller, …).

use crate::transport::RawResponse;

/// Usage errors detected while translating query options.
///
/// None of these ever reach the network: translation runs before the
/// request is issued.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// `fields` was supplied but contains no field names.
    #[error("fields must contain at least one field name")]
    EmptyFields,

    /// `show_only` was supplied but contains no sensor indices.
    #[error("show_only must contain at least one sensor index")]
    EmptyShowOnly,

    /// `location_type` was supplied but contains no location types.
    #[error("location_type must contain \"inside\", \"outside\", or both")]
    EmptyLocationType,

    /// A location type string was neither `inside` nor `outside`.
    #[error("unknown location type {0:?}, expected \"inside\" or \"outside\"")]
    UnknownLocationType(String),

    /// `read_keys` was supplied but contains no keys.
    #[error("read_keys must contain at least one read key")]
    EmptyReadKeys,

    /// The configured read token is empty.
    #[error("read token must not be empty")]
    EmptyReadToken,
}

/// The coarse kind of a classified non-2xx response.
///
/// The API folds a richer taxonomy into a handful of status codes (every
/// validation failure surfaces as 400); the finer-grained tag recovered
/// from the body lives in [`ApiError::error_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400 — the request itself was invalid (bad field value, bad URL, …).
    InvalidRequest,
    /// 403 — missing, invalid, restricted, or mismatched API key.
    Unauthorized,
    /// 404 — no sensor matched the provided parameters.
    NotFound,
    /// 415 — a JSON content type was announced but no payload was sent.
    MissingPayload,
    /// 500 — internal server error.
    ServerFault,
    /// Any other non-2xx status.
    UnknownHttp,
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::InvalidRequest => "invalid request",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not found",
            Self::MissingPayload => "missing JSON payload",
            Self::ServerFault => "internal server error",
            Self::UnknownHttp => "unexpected HTTP status",
        })
    }
}

/// A classified non-2xx API response.
#[derive(Debug, thiserror::Error)]
#[error("{kind} ({error_type}): {message}")]
pub struct ApiError {
    /// Coarse classification derived from the HTTP status code.
    pub kind: ApiErrorKind,
    /// Error-type tag, either read from the body's `error` field (400/403)
    /// or fixed per status code (e.g. `"NotFoundError"` for 404).
    pub error_type: String,
    /// Human-readable message from the body's `description` field, or a
    /// fixed fallback when the body could not be parsed.
    pub message: String,
    /// The raw response, attached for caller inspection.
    pub response: RawResponse,
}

/// Connection-level failures from the HTTP transport port.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The bundled `reqwest` transport failed to complete the request.
    #[error("HTTP request failed")]
    Request(#[from] reqwest::Error),

    /// Failure from a caller-provided transport implementation.
    #[error("transport failure")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Top-level error returned by the client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed query options; no request was issued.
    #[error("invalid request options")]
    Options(#[from] OptionsError),

    /// The API answered with a classified non-2xx response.
    #[error("API error response")]
    Api(#[from] ApiError),

    /// The transport failed before a response was received.
    #[error("transport error")]
    Transport(#[from] TransportError),

    /// A 2xx body could not be decoded into the expected wire shape.
    #[error("failed to decode response body")]
    Decode(#[from] crate::response::DecodeError),
}
