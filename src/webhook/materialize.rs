//! Turns message responses into entities bound to their webhook.

use std::sync::Arc;

use crate::entity::{Channel, ChannelRegistry, EntityBuilder, Message};

use super::{Hook, WebhookError};

/// Builds a [`Message`] from a response body.
///
/// The channel is resolved through `registry`: an existing entry is reused
/// as-is, otherwise a placeholder carrying `hook` is registered. The body
/// is decoded in full first, so a malformed response leaves the registry
/// untouched. The returned message carries `hook`.
pub(crate) fn message(
    body: &[u8],
    registry: &ChannelRegistry,
    hook: &Hook,
) -> Result<Message, WebhookError> {
    let data = EntityBuilder::message_data(body).map_err(|e| WebhookError::MalformedResponse {
        reason: e.to_string(),
    })?;

    let channel_id = data.channel_id;
    let channel: Arc<Channel> =
        registry.get_or_insert_with(channel_id, || Channel::placeholder(channel_id, hook.clone()));

    Ok(EntityBuilder::message_with_channel(data, channel).with_hook(hook.clone()))
}
