//! Single-shot handles for requests already in flight.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::route::CompiledRoute;
use crate::transport::HttpResponse;

use super::{RestExecutor, RestRequest, TransportError, WebhookError};

/// A request that was dispatched when this handle was created.
///
/// The work starts immediately on the current tokio runtime; awaiting the
/// handle only observes the outcome. Awaiting consumes the handle, so each
/// action completes at most once. Dropping the handle does not cancel the
/// request: it still runs to completion and its outcome is discarded.
///
/// If no runtime is available, the handle is created already failed with
/// [`TransportError::Aborted`] and nothing is sent.
#[must_use = "the request is already running; await the action to observe its outcome"]
pub struct PendingAction<T> {
    route: CompiledRoute,
    state: State<T>,
}

enum State<T> {
    Running(JoinHandle<Result<T, WebhookError>>),
    Failed(Option<WebhookError>),
}

impl<T: Send + 'static> PendingAction<T> {
    /// Dispatches `request` through `executor` and returns the handle
    /// observing it.
    ///
    /// `executor` is called exactly once, before this returns; `transform`
    /// runs on the spawned task once a successful response arrives.
    pub(crate) fn launch<F>(
        executor: &dyn RestExecutor,
        request: RestRequest,
        transform: F,
    ) -> Self
    where
        F: FnOnce(HttpResponse) -> Result<T, WebhookError> + Send + 'static,
    {
        let route = request.route.clone();

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                return Self {
                    route,
                    state: State::Failed(Some(TransportError::Aborted(e.to_string()).into())),
                };
            }
        };

        let response = executor.execute(request);
        let handle = runtime.spawn(async move { transform(response.await?) });

        Self {
            route,
            state: State::Running(handle),
        }
    }
}

impl<T> PendingAction<T> {
    /// Returns the route this action was dispatched to.
    #[must_use]
    pub const fn route(&self) -> &CompiledRoute {
        &self.route
    }

    /// Returns true once the outcome is available without waiting.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Running(handle) => handle.is_finished(),
            State::Failed(_) => true,
        }
    }
}

impl<T> Future for PendingAction<T> {
    type Output = Result<T, WebhookError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            State::Running(handle) => Pin::new(handle).poll(cx).map(|joined| {
                joined.unwrap_or_else(|e| Err(TransportError::Aborted(e.to_string()).into()))
            }),
            State::Failed(error) => Poll::Ready(Err(error.take().unwrap_or_else(|| {
                TransportError::Aborted("action polled after completion".to_string()).into()
            }))),
        }
    }
}

impl<T> fmt::Debug for PendingAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAction")
            .field("route", &self.route)
            .field("finished", &self.is_finished())
            .finish()
    }
}
