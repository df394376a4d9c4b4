//! The webhook client and the hook messages keep back to it.

use std::fmt;
use std::sync::{Arc, Weak};

use url::Url;

use crate::entity::{ChannelRegistry, Message};
use crate::route::{CompiledRoute, Route};
use crate::transport::HttpResponse;

use super::{
    IdentityError, MessageCreate, MessageEdit, MessageRef, PendingAction, RestExecutor,
    RestRequest, WebhookError, WebhookIdentity, materialize,
};

/// Query key asking the server to answer with the resulting message.
const WAIT: &str = "wait";
/// Query key scoping a request to a thread.
const THREAD_ID: &str = "thread_id";

struct ClientState {
    identity: WebhookIdentity,
    thread_id: Option<String>,
    executor: Arc<dyn RestExecutor>,
    channels: Arc<ChannelRegistry>,
}

/// Sends, edits, retrieves and deletes messages through one webhook.
///
/// A client is immutable. Cloning it is cheap and yields the *same*
/// instance (hooks on materialized messages compare equal to every clone).
/// [`with_thread_id`](Self::with_thread_id) is the one way to derive a
/// differently scoped client, and it never touches the original.
///
/// Every operation validates its input synchronously, then dispatches the
/// request immediately and returns a [`PendingAction`] to await the
/// outcome. Operations must be called from within a tokio runtime.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use hookpost::entity::ChannelRegistry;
/// use hookpost::transport::ReqwestClient;
/// use hookpost::webhook::{MessageCreate, Requester, WebhookClient, WebhookIdentity};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let identity = WebhookIdentity::new(123_456_789_012_345_678, "tok_abc")?;
/// let client = WebhookClient::new(
///     identity,
///     Arc::new(Requester::new(ReqwestClient::new())),
///     Arc::new(ChannelRegistry::new()),
/// );
///
/// let message = client.send(&MessageCreate::text("hello"))?.await?;
/// assert!(message.hook().is_some_and(|hook| hook.is(&client)));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WebhookClient {
    state: Arc<ClientState>,
}

impl WebhookClient {
    /// Creates an unscoped client.
    #[must_use]
    pub fn new(
        identity: WebhookIdentity,
        executor: Arc<dyn RestExecutor>,
        channels: Arc<ChannelRegistry>,
    ) -> Self {
        Self {
            state: Arc::new(ClientState {
                identity,
                thread_id: None,
                executor,
                channels,
            }),
        }
    }

    /// Creates an unscoped client from a webhook URL.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if the URL does not address a webhook.
    pub fn from_url(
        url: &Url,
        executor: Arc<dyn RestExecutor>,
        channels: Arc<ChannelRegistry>,
    ) -> Result<Self, IdentityError> {
        Ok(Self::new(WebhookIdentity::from_url(url)?, executor, channels))
    }

    /// Returns a new client scoped to `thread_id`.
    ///
    /// The new client shares this client's identity, executor and channel
    /// registry. This client keeps its own scope. An empty id yields an
    /// unscoped client.
    #[must_use]
    pub fn with_thread_id(&self, thread_id: impl Into<String>) -> Self {
        let thread_id = thread_id.into();
        Self {
            state: Arc::new(ClientState {
                identity: self.state.identity.clone(),
                thread_id: (!thread_id.is_empty()).then_some(thread_id),
                executor: Arc::clone(&self.state.executor),
                channels: Arc::clone(&self.state.channels),
            }),
        }
    }

    /// Returns the webhook id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.state.identity.id()
    }

    /// Returns the webhook identity.
    #[must_use]
    pub fn identity(&self) -> &WebhookIdentity {
        &self.state.identity
    }

    /// Returns the thread this client is scoped to, if any.
    #[must_use]
    pub fn thread_id(&self) -> Option<&str> {
        self.state.thread_id.as_deref()
    }

    /// Returns the channel registry shared with messages this client materializes.
    #[must_use]
    pub fn channels(&self) -> &Arc<ChannelRegistry> {
        &self.state.channels
    }

    /// Returns true if both handles refer to the same client instance.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Returns a non-owning reference to this client.
    #[must_use]
    pub fn hook(&self) -> Hook {
        Hook {
            state: Arc::downgrade(&self.state),
        }
    }

    /// Compiles the route [`send`](Self::send) dispatches to.
    #[must_use]
    pub fn send_route(&self) -> CompiledRoute {
        self.compile(Route::ExecuteWebhook, None)
    }

    /// Compiles the route [`edit`](Self::edit) dispatches to.
    #[must_use]
    pub fn edit_route(&self, target: &MessageRef) -> CompiledRoute {
        self.compile(Route::EditWebhookMessage, Some(target))
    }

    /// Compiles the route [`retrieve`](Self::retrieve) dispatches to.
    #[must_use]
    pub fn retrieve_route(&self, target: &MessageRef) -> CompiledRoute {
        self.compile(Route::GetWebhookMessage, Some(target))
    }

    /// Compiles the route [`delete`](Self::delete) dispatches to.
    #[must_use]
    pub fn delete_route(&self, target: &MessageRef) -> CompiledRoute {
        self.compile(Route::DeleteWebhookMessage, Some(target))
    }

    /// Posts a new message.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidPayload`] if `payload` fails
    /// [`MessageCreate::validate`]; nothing is sent in that case.
    pub fn send(&self, payload: &MessageCreate) -> Result<PendingAction<Message>, WebhookError> {
        payload.validate()?;
        let request = RestRequest::new(self.send_route()).with_body(encode(payload)?);
        Ok(self.dispatch(request, self.materializer()))
    }

    /// Edits a message posted by this webhook.
    ///
    /// `message_id` is `@original` or a snowflake.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidIdentifier`] or
    /// [`WebhookError::InvalidPayload`]; nothing is sent in either case.
    pub fn edit(
        &self,
        message_id: &str,
        payload: &MessageEdit,
    ) -> Result<PendingAction<Message>, WebhookError> {
        let target = MessageRef::parse(message_id)?;
        payload.validate()?;
        let request = RestRequest::new(self.edit_route(&target)).with_body(encode(payload)?);
        Ok(self.dispatch(request, self.materializer()))
    }

    /// Fetches a message posted by this webhook.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidIdentifier`] if `message_id` is
    /// neither `@original` nor a snowflake; nothing is sent in that case.
    pub fn retrieve(&self, message_id: &str) -> Result<PendingAction<Message>, WebhookError> {
        let target = MessageRef::parse(message_id)?;
        let request = RestRequest::new(self.retrieve_route(&target));
        Ok(self.dispatch(request, self.materializer()))
    }

    /// Deletes a message posted by this webhook.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidIdentifier`] if `message_id` is
    /// neither `@original` nor a snowflake; nothing is sent in that case.
    pub fn delete(&self, message_id: &str) -> Result<PendingAction<()>, WebhookError> {
        let target = MessageRef::parse(message_id)?;
        let request = RestRequest::new(self.delete_route(&target));
        Ok(self.dispatch(request, |_| Ok(())))
    }

    fn compile(&self, route: Route, target: Option<&MessageRef>) -> CompiledRoute {
        let id = self.state.identity.id().to_string();
        let token = self.state.identity.token();

        let compiled = match target {
            Some(target) => route.compile(&[&id, token, target.as_str()]),
            None => route.compile(&[&id, token]),
        };

        let compiled = if route.waits_for_message() {
            compiled.with_query_param(WAIT, "true")
        } else {
            compiled
        };

        compiled.with_optional_query_param(THREAD_ID, self.thread_id())
    }

    fn dispatch<T, F>(&self, request: RestRequest, transform: F) -> PendingAction<T>
    where
        T: Send + 'static,
        F: FnOnce(HttpResponse) -> Result<T, WebhookError> + Send + 'static,
    {
        PendingAction::launch(self.state.executor.as_ref(), request, transform)
    }

    fn materializer(
        &self,
    ) -> impl FnOnce(HttpResponse) -> Result<Message, WebhookError> + Send + 'static {
        let channels = Arc::clone(&self.state.channels);
        let hook = self.hook();
        move |response| materialize::message(&response.body, &channels, &hook)
    }
}

impl fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookClient")
            .field("identity", &self.state.identity)
            .field("thread_id", &self.state.thread_id)
            .finish_non_exhaustive()
    }
}

fn encode<P: serde::Serialize>(payload: &P) -> Result<Vec<u8>, WebhookError> {
    serde_json::to_vec(payload).map_err(|e| WebhookError::invalid_payload(e.to_string()))
}

/// Non-owning back-reference from an entity to the client that produced it.
///
/// Hooks never keep a client alive, so a client and the registry it shares
/// with its placeholders cannot leak each other.
#[derive(Clone)]
pub struct Hook {
    state: Weak<ClientState>,
}

impl Hook {
    /// Returns the client, if it is still alive.
    #[must_use]
    pub fn client(&self) -> Option<WebhookClient> {
        self.state.upgrade().map(|state| WebhookClient { state })
    }

    /// Returns true if this hook refers to `client`'s instance.
    #[must_use]
    pub fn is(&self, client: &WebhookClient) -> bool {
        std::ptr::eq(self.state.as_ptr(), Arc::as_ptr(&client.state))
    }

    /// Returns true once the client has been dropped.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.state.strong_count() == 0
    }
}

impl PartialEq for Hook {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for Hook {}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.upgrade() {
            Some(state) => f
                .debug_struct("Hook")
                .field("webhook_id", &state.identity.id())
                .field("thread_id", &state.thread_id)
                .finish(),
            None => f.write_str("Hook(released)"),
        }
    }
}
