//! Error types for webhook operations.

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for webhook operations.
///
/// Input problems (`InvalidIdentifier`, `InvalidPayload`) are returned
/// synchronously, before anything is sent. Everything else surfaces through
/// the awaited [`PendingAction`](super::PendingAction).
#[derive(Debug, Error)]
pub enum WebhookError {
    /// A message reference is neither `@original` nor a snowflake.
    #[error("Invalid message identifier '{value}': expected a snowflake or @original")]
    InvalidIdentifier {
        /// The rejected reference
        value: String,
    },

    /// A message payload would be rejected by the API.
    #[error("Invalid message payload: {reason}")]
    InvalidPayload {
        /// Why the payload was rejected
        reason: String,
    },

    /// The request did not produce a successful response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A successful response could not be turned into an entity.
    #[error("Malformed response: {reason}")]
    MalformedResponse {
        /// What was missing or ill-typed
        reason: String,
    },

    /// A message's hook outlived the webhook client it points to.
    #[error("The webhook client that produced this message is no longer available")]
    HookReleased,
}

impl WebhookError {
    pub(crate) fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status if the server rejected the request.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Transport(TransportError::NonSuccessStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Failure while executing a request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP layer failed (connection, timeout, bad URL).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Server returned a non-2xx status code.
    #[error("HTTP {status}: {}", .body.as_deref().unwrap_or("<empty body>"))]
    NonSuccessStatus {
        /// HTTP status code
        status: http::StatusCode,
        /// Response body (if available and valid UTF-8)
        body: Option<String>,
    },

    /// The request task ended without a result.
    ///
    /// Raised when no async runtime is available, or the task panicked or
    /// was cancelled by a runtime shutdown.
    #[error("Request aborted: {0}")]
    Aborted(String),
}

/// Error returned when a webhook identity cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Webhook ids are snowflakes and never zero.
    #[error("Webhook id must not be zero")]
    ZeroId,

    /// The token is empty or contains characters that cannot appear in a path segment.
    #[error("Invalid webhook token: {reason}")]
    InvalidToken {
        /// Why the token was rejected
        reason: &'static str,
    },

    /// A URL did not have the `/webhooks/{id}/{token}` shape.
    #[error("Not a webhook URL '{url}': {reason}")]
    NotWebhookUrl {
        /// The rejected URL
        url: String,
        /// What was missing
        reason: &'static str,
    },
}
