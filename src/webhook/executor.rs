//! REST executor seam between the webhook client and the HTTP transport.

use std::sync::Arc;

use futures::future::BoxFuture;
use url::Url;

use crate::route::CompiledRoute;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

use super::TransportError;

/// Default API base all routes are resolved against.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10/";

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("hookpost/", env!("CARGO_PKG_VERSION"));

/// A compiled route plus an optional JSON body.
#[derive(Debug, Clone)]
pub struct RestRequest {
    /// Target of the request.
    pub route: CompiledRoute,
    /// Serialized JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl RestRequest {
    /// Creates a request without a body.
    #[must_use]
    pub const fn new(route: CompiledRoute) -> Self {
        Self { route, body: None }
    }

    /// Attaches a serialized JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// Executes compiled routes against the API.
///
/// Implementations return a `'static` future so the request can run on
/// its own task, detached from the caller. A successful result is always
/// a 2xx response; anything else is a [`TransportError`].
pub trait RestExecutor: Send + Sync + 'static {
    /// Sends the request and returns the successful response.
    fn execute(&self, request: RestRequest) -> BoxFuture<'static, Result<HttpResponse, TransportError>>;
}

/// [`RestExecutor`] backed by an [`HttpClient`].
///
/// # Example
///
/// ```
/// use hookpost::transport::ReqwestClient;
/// use hookpost::webhook::Requester;
///
/// let requester = Requester::new(ReqwestClient::new());
/// assert_eq!(requester.base_url().as_str(), "https://discord.com/api/v10/");
/// ```
#[derive(Debug)]
pub struct Requester<H> {
    http: Arc<H>,
    base_url: Url,
    user_agent: http::HeaderValue,
}

impl<H> Requester<H> {
    /// Creates a requester targeting [`DEFAULT_API_BASE`].
    ///
    /// # Panics
    ///
    /// Never: the default base is a valid URL.
    #[must_use]
    pub fn new(http: H) -> Self {
        Self {
            http: Arc::new(http),
            base_url: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            user_agent: http::HeaderValue::from_static(DEFAULT_USER_AGENT),
        }
    }

    /// Targets a different API base, e.g. a proxy or a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Overrides the `User-Agent` header.
    ///
    /// # Errors
    ///
    /// Returns [`http::header::InvalidHeaderValue`] if the value contains
    /// control characters.
    pub fn with_user_agent(
        mut self,
        user_agent: &str,
    ) -> Result<Self, http::header::InvalidHeaderValue> {
        self.user_agent = http::HeaderValue::from_str(user_agent)?;
        Ok(self)
    }

    /// Returns the API base.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub fn http(&self) -> &H {
        &self.http
    }

    fn build(&self, request: RestRequest) -> Result<HttpRequest, HttpError> {
        let url = request.route.to_url(&self.base_url)?;
        let http_request = HttpRequest::new(request.route.method().clone(), url)
            .with_header(http::header::USER_AGENT, self.user_agent.clone());

        Ok(match request.body {
            Some(body) => http_request.with_json_body(body),
            None => http_request,
        })
    }
}

impl<H: HttpClient + 'static> RestExecutor for Requester<H> {
    fn execute(&self, request: RestRequest) -> BoxFuture<'static, Result<HttpResponse, TransportError>> {
        let target = request.route.redacted();
        let built = self.build(request);
        let http = Arc::clone(&self.http);

        Box::pin(async move {
            let http_request = built?;
            tracing::debug!(target_route = %target, "Sending webhook request");

            let response = http.request(http_request).await?;

            if response.is_success() {
                tracing::debug!(target_route = %target, status = %response.status, "Webhook request succeeded");
                Ok(response)
            } else {
                tracing::warn!(target_route = %target, status = %response.status, "Webhook request rejected");
                Err(TransportError::NonSuccessStatus {
                    status: response.status,
                    body: response
                        .body_text()
                        .filter(|text| !text.is_empty())
                        .map(String::from),
                })
            }
        })
    }
}
