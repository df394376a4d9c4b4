//! HTTP transport used to reach the webhook API.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The transport abstraction ([`HttpClient`]) and its reqwest implementation ([`ReqwestClient`])
//! - Backoff configuration ([`RetryPolicy`]) and the retrying decorator ([`RetryingClient`])
//!
//! Nothing here knows about webhooks or messages; the webhook layer talks to
//! it through [`crate::webhook::Requester`].

mod client;
mod error;
mod governor;
mod http;
mod retry;

#[cfg(test)]
mod governor_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use governor::{IsRetryable, RetryingClient};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::RetryPolicy;
