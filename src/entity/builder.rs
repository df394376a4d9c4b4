//! Builds entities from API payloads.
//!
//! All field parsing lives here. Payloads are decoded in full before any
//! entity is assembled, so a missing mandatory field never yields a
//! half-built value.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use super::{Author, Channel, ChannelKind, Embed, Message, Snowflake};

/// Error returned when a payload lacks or mistypes a mandatory field.
#[derive(Debug, Error)]
#[error("malformed {entity} payload: {source}")]
pub struct PayloadError {
    /// The entity being decoded.
    pub entity: &'static str,
    /// The decoding failure.
    #[source]
    pub source: serde_json::Error,
}

/// Wire form of a message object.
#[derive(Debug, Deserialize)]
pub struct MessageData {
    /// Message id.
    pub id: Snowflake,
    /// Channel the message lives in.
    pub channel_id: Snowflake,
    #[serde(default)]
    author: Option<Author>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    tts: bool,
    #[serde(default)]
    embeds: Vec<Embed>,
    #[serde(default)]
    webhook_id: Option<Snowflake>,
    #[serde(default)]
    flags: u64,
}

#[derive(Debug, Deserialize)]
struct ChannelData {
    id: Snowflake,
    #[serde(rename = "type")]
    kind: ChannelKind,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    parent_id: Option<Snowflake>,
}

/// Decodes payloads and assembles entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityBuilder;

impl EntityBuilder {
    /// Decodes a message payload.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] if the body is not a JSON message object
    /// with `id` and `channel_id`, or if an optional field is ill-typed.
    pub fn message_data(body: &[u8]) -> Result<MessageData, PayloadError> {
        serde_json::from_slice(body).map_err(|source| PayloadError {
            entity: "message",
            source,
        })
    }

    /// Assembles a message around an already resolved channel.
    ///
    /// The returned message has no hook; the caller attaches one.
    #[must_use]
    pub fn message_with_channel(data: MessageData, channel: Arc<Channel>) -> Message {
        Message {
            id: data.id,
            channel,
            author: data.author,
            content: data.content,
            timestamp: data.timestamp,
            edited_timestamp: data.edited_timestamp,
            tts: data.tts,
            embeds: data.embeds,
            webhook_id: data.webhook_id,
            flags: data.flags,
            hook: None,
        }
    }

    /// Decodes a channel payload into a synchronized channel.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] if `id` or `type` is missing or ill-typed.
    pub fn channel(body: &[u8]) -> Result<Channel, PayloadError> {
        let data: ChannelData = serde_json::from_slice(body).map_err(|source| PayloadError {
            entity: "channel",
            source,
        })?;

        let mut channel = Channel::new(data.id, data.kind);
        if let Some(name) = data.name {
            channel = channel.with_name(name);
        }
        if let Some(parent_id) = data.parent_id {
            channel = channel.with_parent(parent_id);
        }
        Ok(channel)
    }
}
