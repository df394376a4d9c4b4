//! Tests for `RetryingClient`.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::governor::{IsRetryable, RetryingClient};
use super::{HttpClient, HttpError, HttpRequest, HttpResponse, RetryPolicy};
use crate::time::InstantSleeper;

/// Mock HTTP client that replays a scripted sequence of outcomes.
#[derive(Debug)]
struct ScriptedClient {
    outcomes: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    call_count: AtomicUsize,
}

impl ScriptedClient {
    fn new(outcomes: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            call_count: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl HttpClient for ScriptedClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.outcomes.lock().unwrap().remove(0)
    }
}

fn status(code: http::StatusCode) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::new(code, http::HeaderMap::new(), vec![]))
}

fn rate_limited(retry_after: &'static str) -> Result<HttpResponse, HttpError> {
    let mut headers = http::HeaderMap::new();
    headers.insert(
        http::header::RETRY_AFTER,
        http::HeaderValue::from_static(retry_after),
    );
    Ok(HttpResponse::new(
        http::StatusCode::TOO_MANY_REQUESTS,
        headers,
        br#"{"message":"You are being rate limited."}"#.to_vec(),
    ))
}

fn request() -> HttpRequest {
    HttpRequest::get(
        url::Url::parse("https://discord.com/api/v10/webhooks/1/token/messages/2").unwrap(),
    )
}

fn post() -> HttpRequest {
    HttpRequest::post(url::Url::parse("https://discord.com/api/v10/webhooks/1/token").unwrap())
}

fn refused() -> HttpError {
    HttpError::Connect(Box::new(std::io::Error::from(
        std::io::ErrorKind::ConnectionRefused,
    )))
}

fn retrying(
    outcomes: Vec<Result<HttpResponse, HttpError>>,
    max_attempts: u32,
) -> RetryingClient<ScriptedClient, InstantSleeper> {
    RetryingClient::new(ScriptedClient::new(outcomes))
        .with_sleeper(InstantSleeper::default())
        .with_retry_policy(
            RetryPolicy::new()
                .with_max_attempts(max_attempts)
                .with_initial_delay(Duration::from_secs(1)),
        )
}

mod retries {
    use super::*;

    #[tokio::test]
    async fn success_is_returned_without_retry() {
        let client = retrying(vec![status(http::StatusCode::OK)], 3);

        let response = client.request(request()).await.unwrap();

        assert_eq!(response.status, http::StatusCode::OK);
        assert_eq!(client.inner().calls(), 1);
        assert!(client.sleeper().recorded().is_empty());
    }

    #[tokio::test]
    async fn timeout_then_success_retries_once() {
        let client = retrying(vec![Err(HttpError::Timeout), status(http::StatusCode::OK)], 3);

        let response = client.request(request()).await.unwrap();

        assert!(response.is_success());
        assert_eq!(client.inner().calls(), 2);
        assert_eq!(client.sleeper().recorded(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn server_errors_back_off_exponentially() {
        let client = retrying(
            vec![
                status(http::StatusCode::BAD_GATEWAY),
                status(http::StatusCode::SERVICE_UNAVAILABLE),
                status(http::StatusCode::OK),
            ],
            3,
        );

        client.request(request()).await.unwrap();

        assert_eq!(
            client.sleeper().recorded(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn rate_limit_honours_retry_after() {
        let client = retrying(vec![rate_limited("0.5"), status(http::StatusCode::OK)], 3);

        client.request(request()).await.unwrap();

        assert_eq!(client.sleeper().recorded(), vec![Duration::from_millis(500)]);
    }

    #[tokio::test]
    async fn exhausted_attempts_return_last_response() {
        let client = retrying(
            vec![
                status(http::StatusCode::INTERNAL_SERVER_ERROR),
                status(http::StatusCode::INTERNAL_SERVER_ERROR),
            ],
            2,
        );

        let response = client.request(request()).await.unwrap();

        assert_eq!(response.status, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(client.inner().calls(), 2);
        assert_eq!(client.sleeper().recorded().len(), 1);
    }

    #[tokio::test]
    async fn exhausted_attempts_return_last_error() {
        let client = retrying(vec![Err(HttpError::Timeout), Err(HttpError::Timeout)], 2);

        let result = client.request(request()).await;

        assert!(matches!(result, Err(HttpError::Timeout)));
        assert_eq!(client.inner().calls(), 2);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let client = retrying(vec![status(http::StatusCode::NOT_FOUND)], 3);

        let response = client.request(request()).await.unwrap();

        assert_eq!(response.status, http::StatusCode::NOT_FOUND);
        assert_eq!(client.inner().calls(), 1);
    }

    #[tokio::test]
    async fn invalid_url_is_not_retried() {
        let client = retrying(vec![Err(HttpError::InvalidUrl("bad".to_string()))], 3);

        let result = client.request(request()).await;

        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
        assert_eq!(client.inner().calls(), 1);
    }
}

mod non_idempotent {
    use super::*;

    #[tokio::test]
    async fn timed_out_post_is_sent_once() {
        let client = retrying(vec![Err(HttpError::Timeout), status(http::StatusCode::OK)], 3);

        let result = client.request(post()).await;

        assert!(matches!(result, Err(HttpError::Timeout)));
        assert_eq!(client.inner().calls(), 1);
        assert!(client.sleeper().recorded().is_empty());
    }

    #[tokio::test]
    async fn server_error_on_post_is_returned() {
        let client = retrying(
            vec![status(http::StatusCode::BAD_GATEWAY), status(http::StatusCode::OK)],
            3,
        );

        let response = client.request(post()).await.unwrap();

        assert_eq!(response.status, http::StatusCode::BAD_GATEWAY);
        assert_eq!(client.inner().calls(), 1);
    }

    #[tokio::test]
    async fn dropped_connection_on_patch_is_not_replayed() {
        let mut req = post();
        req.method = http::Method::PATCH;
        let client = retrying(
            vec![
                Err(HttpError::Connection(Box::new(std::io::Error::other("reset")))),
                status(http::StatusCode::OK),
            ],
            3,
        );

        assert!(client.request(req).await.is_err());
        assert_eq!(client.inner().calls(), 1);
    }

    #[tokio::test]
    async fn rate_limited_post_is_retried() {
        let client = retrying(vec![rate_limited("0.5"), status(http::StatusCode::OK)], 3);

        let response = client.request(post()).await.unwrap();

        assert!(response.is_success());
        assert_eq!(client.inner().calls(), 2);
    }

    #[tokio::test]
    async fn refused_connection_on_post_is_retried() {
        let client = retrying(vec![Err(refused()), status(http::StatusCode::OK)], 3);

        let response = client.request(post()).await.unwrap();

        assert!(response.is_success());
        assert_eq!(client.inner().calls(), 2);
    }
}

mod is_retryable_trait {
    use super::*;

    #[test]
    fn transient_http_errors_are_retryable() {
        assert!(HttpError::Timeout.is_retryable());
        assert!(HttpError::Connection(Box::new(std::io::Error::other("reset"))).is_retryable());
        assert!(!HttpError::InvalidUrl("x".to_string()).is_retryable());
        assert!(refused().is_retryable());
    }

    #[test]
    fn only_unsent_failures_are_replay_safe() {
        assert!(refused().is_unsent());
        assert!(http::StatusCode::TOO_MANY_REQUESTS.is_unsent());
        assert!(!HttpError::Timeout.is_unsent());
        assert!(!http::StatusCode::BAD_GATEWAY.is_unsent());
        assert!(!http::StatusCode::REQUEST_TIMEOUT.is_unsent());
    }

    #[test]
    fn status_classification() {
        assert!(http::StatusCode::INTERNAL_SERVER_ERROR.is_retryable());
        assert!(http::StatusCode::TOO_MANY_REQUESTS.is_retryable());
        assert!(http::StatusCode::REQUEST_TIMEOUT.is_retryable());
        assert!(!http::StatusCode::BAD_REQUEST.is_retryable());
        assert!(!http::StatusCode::UNAUTHORIZED.is_retryable());
        assert!(!http::StatusCode::OK.is_retryable());
    }
}
