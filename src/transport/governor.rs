//! Retrying decorator around an [`HttpClient`].
//!
//! Handles transient connection failures, server errors and rate limiting
//! so the webhook layer above can treat every request as a single call.

use std::time::Duration;

use crate::time::{Sleeper, TokioSleeper};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse, RetryPolicy};

/// HTTP client decorator that retries transient failures.
///
/// Retries connection errors, timeouts, `5xx`, `408 Request Timeout` and
/// `429 Too Many Requests`. For rate-limited responses the `Retry-After`
/// header decides the wait.
///
/// Requests whose method is not idempotent (`POST`, `PATCH`) are only
/// retried when the failed attempt cannot have taken effect: a refused
/// connection or a `429`. A timeout or `5xx` on a `POST` is returned as-is,
/// since the server may already have posted the message. When attempts run out the last outcome is
/// returned as-is, so a final `429` still reaches the caller as a response.
///
/// # Type Parameters
///
/// - `H`: The wrapped HTTP client
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```
/// use hookpost::transport::{ReqwestClient, RetryPolicy, RetryingClient};
///
/// let client = RetryingClient::new(ReqwestClient::new())
///     .with_retry_policy(RetryPolicy::new().with_max_attempts(5));
/// assert_eq!(client.retry_policy().max_attempts, 5);
/// ```
#[derive(Debug)]
pub struct RetryingClient<H, S = TokioSleeper> {
    inner: H,
    sleeper: S,
    policy: RetryPolicy,
}

impl<H> RetryingClient<H, TokioSleeper> {
    /// Wraps `inner` with the default retry policy and [`TokioSleeper`].
    #[must_use]
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            sleeper: TokioSleeper,
            policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> RetryingClient<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryingClient<H, S2> {
        RetryingClient {
            inner: self.inner,
            sleeper,
            policy: self.policy,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the wrapped client.
    #[must_use]
    pub const fn inner(&self) -> &H {
        &self.inner
    }

    /// Returns the sleeper.
    #[must_use]
    pub const fn sleeper(&self) -> &S {
        &self.sleeper
    }
}

impl<H: HttpClient, S: Sleeper> RetryingClient<H, S> {
    /// Decides whether `outcome` of attempt `attempt` warrants another try,
    /// and if so how long to wait first.
    fn next_wait(
        &self,
        method: &http::Method,
        attempt: u32,
        outcome: &Result<HttpResponse, HttpError>,
    ) -> Option<Duration> {
        let replayable = |failure: &dyn IsRetryable| {
            failure.is_retryable() && (method.is_idempotent() || failure.is_unsent())
        };

        let hint = match outcome {
            Ok(response) if replayable(&response.status) => response.retry_after(),
            Err(error) if replayable(error) => None,
            _ => return None,
        };

        if !self.policy.should_retry(attempt) {
            return None;
        }

        Some(self.policy.wait_before_retry(attempt - 1, hint))
    }
}

impl<H: HttpClient, S: Sleeper> HttpClient for RetryingClient<H, S> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut attempt = 1;

        loop {
            let outcome = self.inner.request(req.clone()).await;

            let Some(wait) = self.next_wait(&req.method, attempt, &outcome) else {
                return outcome;
            };

            match &outcome {
                Ok(response) => tracing::warn!(
                    attempt,
                    status = %response.status,
                    wait = ?wait,
                    "Request rejected, retrying"
                ),
                Err(error) => tracing::warn!(
                    attempt,
                    wait = ?wait,
                    "Request failed ({error}), retrying"
                ),
            }

            self.sleeper.sleep(wait).await;
            attempt += 1;
        }
    }
}

/// Extension trait for checking if a failure is transient.
///
/// Used by [`RetryingClient`] to decide whether another attempt can
/// succeed where the previous one did not.
pub trait IsRetryable {
    /// Returns true if the failure is potentially transient.
    fn is_retryable(&self) -> bool;

    /// Returns true if the failed attempt cannot have taken effect on the
    /// server, so even a non-idempotent request may be sent again.
    fn is_unsent(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connect(_) | Self::Connection(_) | Self::Timeout => true,
            // URL errors are configuration issues, not transient
            Self::InvalidUrl(_) => false,
        }
    }

    fn is_unsent(&self) -> bool {
        matches!(self, Self::Connect(_))
    }
}

impl IsRetryable for http::StatusCode {
    fn is_retryable(&self) -> bool {
        self.is_server_error()
            || *self == Self::TOO_MANY_REQUESTS
            || *self == Self::REQUEST_TIMEOUT
    }

    fn is_unsent(&self) -> bool {
        *self == Self::TOO_MANY_REQUESTS
    }
}
