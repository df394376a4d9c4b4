//! Webhook client: validated intents in, materialized messages out.
//!
//! This module provides:
//! - Credentials and message references ([`WebhookIdentity`], [`MessageRef`])
//! - Request bodies ([`MessageCreate`], [`MessageEdit`])
//! - The executor seam to the transport ([`RestExecutor`], [`Requester`])
//! - Eagerly dispatched, single-shot results ([`PendingAction`])
//! - The orchestrating client ([`WebhookClient`]) and its back-reference ([`Hook`])

mod action;
mod client;
mod error;
mod executor;
mod identity;
mod materialize;
mod message_ref;
mod payload;

#[cfg(test)]
mod executor_tests;
#[cfg(test)]
mod message_ref_tests;
#[cfg(test)]
pub(crate) mod test_support;

pub use action::PendingAction;
pub use client::{Hook, WebhookClient};
pub use error::{IdentityError, TransportError, WebhookError};
pub use executor::{DEFAULT_API_BASE, DEFAULT_USER_AGENT, Requester, RestExecutor, RestRequest};
pub use identity::WebhookIdentity;
pub use message_ref::{MessageRef, ORIGINAL};
pub use payload::{MAX_CONTENT_CHARS, MAX_EMBEDS, MessageCreate, MessageEdit};
