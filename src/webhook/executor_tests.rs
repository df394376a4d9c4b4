//! Tests for `Requester`.

use std::sync::Mutex;

use super::executor::{DEFAULT_API_BASE, DEFAULT_USER_AGENT};
use super::{Requester, RestExecutor, RestRequest, TransportError, WebhookError};
use crate::route::Route;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// HTTP client that captures requests and replies with a fixed outcome.
#[derive(Debug)]
struct CapturingClient {
    reply: Mutex<Option<Result<HttpResponse, HttpError>>>,
    captured: Mutex<Vec<HttpRequest>>,
}

impl CapturingClient {
    fn replying(status: http::StatusCode, body: &str) -> Self {
        Self {
            reply: Mutex::new(Some(Ok(HttpResponse::new(
                status,
                http::HeaderMap::new(),
                body.as_bytes().to_vec(),
            )))),
            captured: Mutex::new(Vec::new()),
        }
    }

    fn failing(error: HttpError) -> Self {
        Self {
            reply: Mutex::new(Some(Err(error))),
            captured: Mutex::new(Vec::new()),
        }
    }
}

impl HttpClient for CapturingClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.captured.lock().unwrap().push(req);
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(HttpError::Timeout))
    }
}

fn execute_request() -> RestRequest {
    RestRequest::new(
        Route::ExecuteWebhook
            .compile(&["123", "tok_abc"])
            .with_query_param("wait", "true"),
    )
    .with_body(br#"{"content":"hi"}"#.to_vec())
}

fn captured(requester: &Requester<CapturingClient>) -> Vec<HttpRequest> {
    requester.http().captured.lock().unwrap().clone()
}

#[test]
fn defaults_to_public_api_base() {
    let requester = Requester::new(CapturingClient::failing(HttpError::Timeout));

    assert_eq!(requester.base_url().as_str(), DEFAULT_API_BASE);
}

#[tokio::test]
async fn resolves_route_against_base_url() {
    let requester = Requester::new(CapturingClient::replying(http::StatusCode::OK, "{}"));

    requester.execute(execute_request()).await.unwrap();

    let sent = captured(&requester);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, http::Method::POST);
    assert_eq!(
        sent[0].url.as_str(),
        "https://discord.com/api/v10/webhooks/123/tok_abc?wait=true"
    );
}

#[tokio::test]
async fn custom_base_without_trailing_slash_keeps_its_path() {
    let requester = Requester::new(CapturingClient::replying(http::StatusCode::OK, "{}"))
        .with_base_url(url::Url::parse("http://127.0.0.1:9000/api").unwrap());

    requester.execute(execute_request()).await.unwrap();

    assert_eq!(
        captured(&requester)[0].url.as_str(),
        "http://127.0.0.1:9000/api/webhooks/123/tok_abc?wait=true"
    );
}

#[tokio::test]
async fn sets_json_body_and_headers() {
    let requester = Requester::new(CapturingClient::replying(http::StatusCode::OK, "{}"));

    requester.execute(execute_request()).await.unwrap();

    let sent = &captured(&requester)[0];
    assert_eq!(sent.body.as_deref(), Some(br#"{"content":"hi"}"#.as_slice()));
    assert_eq!(
        sent.headers.get(http::header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(
        sent.headers.get(http::header::USER_AGENT).unwrap(),
        DEFAULT_USER_AGENT
    );
}

#[tokio::test]
async fn bodyless_request_has_no_content_type() {
    let requester = Requester::new(CapturingClient::replying(http::StatusCode::NO_CONTENT, ""));
    let request = RestRequest::new(Route::DeleteWebhookMessage.compile(&["123", "tok_abc", "555"]));

    requester.execute(request).await.unwrap();

    let sent = &captured(&requester)[0];
    assert!(sent.body.is_none());
    assert!(sent.headers.get(http::header::CONTENT_TYPE).is_none());
}

#[tokio::test]
async fn custom_user_agent_is_sent() {
    let requester = Requester::new(CapturingClient::replying(http::StatusCode::OK, "{}"))
        .with_user_agent("my-bot/1.0")
        .unwrap();

    requester.execute(execute_request()).await.unwrap();

    assert_eq!(
        captured(&requester)[0]
            .headers
            .get(http::header::USER_AGENT)
            .unwrap(),
        "my-bot/1.0"
    );
}

#[test]
fn control_characters_in_user_agent_are_rejected() {
    let result = Requester::new(CapturingClient::failing(HttpError::Timeout)).with_user_agent("a\nb");

    assert!(result.is_err());
}

#[tokio::test]
async fn non_success_status_carries_body() {
    let requester = Requester::new(CapturingClient::replying(
        http::StatusCode::NOT_FOUND,
        r#"{"message":"Unknown Webhook"}"#,
    ));

    let err = requester.execute(execute_request()).await.unwrap_err();

    match err {
        TransportError::NonSuccessStatus { status, body } => {
            assert_eq!(status, http::StatusCode::NOT_FOUND);
            assert_eq!(body.as_deref(), Some(r#"{"message":"Unknown Webhook"}"#));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_error_body_is_none() {
    let requester = Requester::new(CapturingClient::replying(
        http::StatusCode::INTERNAL_SERVER_ERROR,
        "",
    ));

    let err = requester.execute(execute_request()).await.unwrap_err();

    assert!(matches!(
        err,
        TransportError::NonSuccessStatus { body: None, .. }
    ));
    assert_eq!(
        WebhookError::from(err).status(),
        Some(http::StatusCode::INTERNAL_SERVER_ERROR)
    );
}

#[tokio::test]
async fn http_errors_are_wrapped() {
    let requester = Requester::new(CapturingClient::failing(HttpError::Timeout));

    let err = requester.execute(execute_request()).await.unwrap_err();

    assert!(matches!(err, TransportError::Http(HttpError::Timeout)));
}

#[tokio::test]
async fn unusable_base_fails_without_request() {
    let requester = Requester::new(CapturingClient::replying(http::StatusCode::OK, "{}"))
        .with_base_url(url::Url::parse("mailto:someone@example.com").unwrap());

    let err = requester.execute(execute_request()).await.unwrap_err();

    assert!(matches!(err, TransportError::Http(HttpError::InvalidUrl(_))));
    assert!(captured(&requester).is_empty());
}
