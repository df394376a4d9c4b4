//! Webhook API routes and their compiled form.
//!
//! A [`Route`] is a method plus a path template. Compiling it substitutes
//! the path parameters and yields a [`CompiledRoute`], an immutable value
//! that can be logged, compared and resolved to a URL without re-deriving
//! anything.

use std::fmt;

use http::Method;
use url::Url;

use crate::transport::HttpError;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Mask used in place of the webhook token by [`CompiledRoute::redacted`].
pub const REDACTED: &str = "[redacted]";

/// The webhook endpoints this crate talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Post a new message through the webhook.
    ExecuteWebhook,
    /// Edit a message previously posted by the webhook.
    EditWebhookMessage,
    /// Fetch a message previously posted by the webhook.
    GetWebhookMessage,
    /// Delete a message previously posted by the webhook.
    DeleteWebhookMessage,
}

impl Route {
    /// Returns the HTTP method of this route.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::ExecuteWebhook => Method::POST,
            Self::EditWebhookMessage => Method::PATCH,
            Self::GetWebhookMessage => Method::GET,
            Self::DeleteWebhookMessage => Method::DELETE,
        }
    }

    /// Returns the path template, relative to the API base.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::ExecuteWebhook => "webhooks/{webhook_id}/{webhook_token}",
            Self::EditWebhookMessage | Self::GetWebhookMessage | Self::DeleteWebhookMessage => {
                "webhooks/{webhook_id}/{webhook_token}/messages/{message_id}"
            }
        }
    }

    /// Returns true if this route addresses an existing message.
    #[must_use]
    pub const fn targets_message(self) -> bool {
        !matches!(self, Self::ExecuteWebhook)
    }

    /// Returns true if requests on this route ask the server to answer
    /// with the resulting message (`wait=true`).
    #[must_use]
    pub const fn waits_for_message(self) -> bool {
        matches!(self, Self::ExecuteWebhook | Self::EditWebhookMessage)
    }

    /// Number of `{...}` placeholders in the template.
    #[must_use]
    pub const fn param_count(self) -> usize {
        if self.targets_message() { 3 } else { 2 }
    }

    /// Compiles the route with the given path parameters, in template order.
    ///
    /// # Panics
    ///
    /// Panics if `params.len()` does not match [`Route::param_count`].
    /// Outside this crate routes are only obtained from a
    /// [`WebhookClient`](crate::webhook::WebhookClient), which always passes
    /// the right count.
    #[must_use]
    pub(crate) fn compile(self, params: &[&str]) -> CompiledRoute {
        assert_eq!(
            params.len(),
            self.param_count(),
            "{self:?} expects {} path parameters",
            self.param_count()
        );

        CompiledRoute {
            route: self,
            method: self.method(),
            params: params.iter().map(|p| (*p).to_string()).collect(),
            query: Vec::new(),
        }
    }
}

/// A fully resolved request target: method, substituted path and query.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use hookpost::entity::ChannelRegistry;
/// use hookpost::transport::ReqwestClient;
/// use hookpost::webhook::{Requester, WebhookClient, WebhookIdentity};
///
/// let client = WebhookClient::new(
///     WebhookIdentity::new(123, "secret").unwrap(),
///     Arc::new(Requester::new(ReqwestClient::new())),
///     Arc::new(ChannelRegistry::new()),
/// );
/// let route = client.send_route();
///
/// assert_eq!(route.to_string(), "POST /webhooks/123/secret?wait=true");
/// assert_eq!(route.redacted(), "POST /webhooks/123/[redacted]?wait=true");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CompiledRoute {
    route: Route,
    method: Method,
    params: Vec<String>,
    query: Vec<(String, String)>,
}

impl CompiledRoute {
    /// Index of the webhook token among the path parameters.
    const TOKEN_PARAM: usize = 1;

    /// Returns a copy with `key=value` appended to the query.
    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends `key=value` only when a value is present.
    ///
    /// `None` leaves the route untouched: the key is omitted, never sent empty.
    #[must_use]
    pub fn with_optional_query_param(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with_query_param(key, value),
            None => self,
        }
    }

    /// Returns the route this was compiled from.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the substituted path parameters, in template order.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Returns the query parameters in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the first value for `key`, if present.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the substituted path, without a leading slash.
    #[must_use]
    pub fn path(&self) -> String {
        self.render_path(false)
    }

    /// Returns the `METHOD /path?query` form with the token masked.
    #[must_use]
    pub fn redacted(&self) -> String {
        format!("{} /{}{}", self.method, self.render_path(true), self.render_query())
    }

    /// Resolves this route against an API base URL.
    ///
    /// The base path is kept (`https://discord.com/api/v10` and
    /// `https://discord.com/api/v10/` resolve identically) and any query on
    /// the base is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if `base` cannot carry a path
    /// (for example a `mailto:` URL).
    pub fn to_url(&self, base: &Url) -> Result<Url, HttpError> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);

        let path = self.path();
        url.path_segments_mut()
            .map_err(|()| HttpError::InvalidUrl(format!("'{base}' cannot be used as an API base")))?
            .pop_if_empty()
            .extend(path.split('/'));

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }

    fn render_path(&self, redact: bool) -> String {
        let mut params = self.params.iter().enumerate();
        self.route
            .template()
            .split('/')
            .map(|segment| {
                if !segment.starts_with('{') {
                    return segment;
                }
                match params.next() {
                    Some((index, _)) if redact && index == Self::TOKEN_PARAM => REDACTED,
                    Some((_, value)) => value.as_str(),
                    None => segment,
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn render_query(&self) -> String {
        if self.query.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("?{}", pairs.join("&"))
    }
}

impl fmt::Debug for CompiledRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRoute")
            .field("route", &self.route)
            .field("target", &self.redacted())
            .finish()
    }
}

impl fmt::Display for CompiledRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}{}", self.method, self.path(), self.render_query())
    }
}
