//! Shared fixtures for webhook tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::entity::ChannelRegistry;
use crate::transport::HttpResponse;

use super::{RestExecutor, RestRequest, TransportError, WebhookClient, WebhookIdentity};

pub const WEBHOOK_ID: u64 = 123_456_789_012_345_678;
pub const TOKEN: &str = "tok_abc";

/// Executor that records requests and replays scripted outcomes in order.
#[derive(Debug, Default)]
pub struct MockExecutor {
    outcomes: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<RestRequest>>,
}

impl MockExecutor {
    pub fn new(outcomes: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(body: Vec<u8>) -> Self {
        Self::new(vec![Ok(ok(body))])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RestRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_target(&self) -> String {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|r| r.route.to_string())
            .unwrap_or_default()
    }
}

impl RestExecutor for MockExecutor {
    fn execute(&self, request: RestRequest) -> BoxFuture<'static, Result<HttpResponse, TransportError>> {
        self.requests.lock().unwrap().push(request);
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Aborted("no scripted outcome".to_string())));
        Box::pin(async move { outcome })
    }
}

pub fn ok(body: Vec<u8>) -> HttpResponse {
    HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), body)
}

pub fn no_content() -> HttpResponse {
    HttpResponse::new(http::StatusCode::NO_CONTENT, http::HeaderMap::new(), Vec::new())
}

pub fn identity() -> WebhookIdentity {
    WebhookIdentity::new(WEBHOOK_ID, TOKEN).unwrap()
}

/// A message object as the API returns it.
pub fn message_body(id: &str, channel_id: &str, content: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "id": id,
        "channel_id": channel_id,
        "author": {
            "id": WEBHOOK_ID.to_string(),
            "username": "deploy-bot",
            "avatar": null,
            "bot": true
        },
        "content": content,
        "timestamp": "2024-05-01T12:00:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "embeds": [],
        "webhook_id": WEBHOOK_ID.to_string(),
        "flags": 0
    }))
    .unwrap()
}

pub fn client_with(executor: &Arc<MockExecutor>) -> WebhookClient {
    WebhookClient::new(
        identity(),
        Arc::clone(executor) as Arc<dyn RestExecutor>,
        Arc::new(ChannelRegistry::new()),
    )
}
