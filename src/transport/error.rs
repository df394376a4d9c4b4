//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the connection level. HTTP status codes
/// are not errors here: a 404 is a successful round trip.
#[derive(Debug, Error)]
pub enum HttpError {
    /// No connection could be established, so the request was never sent.
    ///
    /// DNS resolution failures, refused connections and connect timeouts.
    #[error("Could not connect: {0}")]
    Connect(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The connection failed after the request may have been sent.
    ///
    /// This includes resets, TLS failures and truncated response bodies.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error (bad API base)
    /// rather than a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
