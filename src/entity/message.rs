//! Message entities.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::webhook::{Hook, MessageEdit, PendingAction, WebhookError};

use super::{Channel, Snowflake};

/// The author shown on a message.
///
/// For webhook messages this is the webhook's display identity, which can
/// be overridden per message (`username`, `avatar_url`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// User (or webhook) id.
    pub id: Snowflake,
    /// Display name.
    pub username: String,
    /// Avatar hash, if any.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Whether the author is a bot account.
    #[serde(default)]
    pub bot: bool,
}

/// A rich embed attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    /// Embed title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Embed body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link opened when the title is clicked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Sidebar color as `0xRRGGBB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Name/value fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// Creates an embed with only a description.
    #[must_use]
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// A single name/value pair inside an [`Embed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    #[serde(default)]
    pub inline: bool,
}

/// A message posted into a channel.
///
/// Messages materialized by a [`WebhookClient`] carry a [`Hook`] back to
/// that client, so [`Message::edit`] and [`Message::delete`] work without
/// supplying the webhook id or token again.
///
/// [`WebhookClient`]: crate::webhook::WebhookClient
#[derive(Debug, Clone)]
pub struct Message {
    pub(crate) id: Snowflake,
    pub(crate) channel: Arc<Channel>,
    pub(crate) author: Option<Author>,
    pub(crate) content: String,
    pub(crate) timestamp: Option<DateTime<Utc>>,
    pub(crate) edited_timestamp: Option<DateTime<Utc>>,
    pub(crate) tts: bool,
    pub(crate) embeds: Vec<Embed>,
    pub(crate) webhook_id: Option<Snowflake>,
    pub(crate) flags: u64,
    pub(crate) hook: Option<Hook>,
}

impl Message {
    /// Returns the message id.
    #[must_use]
    pub const fn id(&self) -> Snowflake {
        self.id
    }

    /// Returns the channel the message was posted in.
    ///
    /// This is the exact registry entry, shared with every other message
    /// materialized for the same channel id.
    #[must_use]
    pub const fn channel(&self) -> &Arc<Channel> {
        &self.channel
    }

    /// Returns the author, if the response included one.
    #[must_use]
    pub const fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    /// Returns the text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was posted, if the response said so.
    #[must_use]
    pub const fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Returns when the message was last edited, if ever.
    #[must_use]
    pub const fn edited_timestamp(&self) -> Option<DateTime<Utc>> {
        self.edited_timestamp
    }

    /// Returns true if the message was sent as text-to-speech.
    #[must_use]
    pub const fn is_tts(&self) -> bool {
        self.tts
    }

    /// Returns the embeds.
    #[must_use]
    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    /// Returns the id of the webhook that posted the message, if any.
    #[must_use]
    pub const fn webhook_id(&self) -> Option<Snowflake> {
        self.webhook_id
    }

    /// Returns the raw message flags.
    #[must_use]
    pub const fn flags(&self) -> u64 {
        self.flags
    }

    /// Returns the webhook client this message was materialized by.
    #[must_use]
    pub const fn hook(&self) -> Option<&Hook> {
        self.hook.as_ref()
    }

    pub(crate) fn with_hook(mut self, hook: Hook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Edits this message through its hook.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::HookReleased`] if the message has no hook or
    /// its client has been dropped, or [`WebhookError::InvalidPayload`] if
    /// `payload` is rejected.
    pub fn edit(&self, payload: &MessageEdit) -> Result<PendingAction<Self>, WebhookError> {
        let client = self.hooked_client()?;
        client.edit(&self.id.to_string(), payload)
    }

    /// Deletes this message through its hook.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::HookReleased`] if the message has no hook or
    /// its client has been dropped.
    pub fn delete(&self) -> Result<PendingAction<()>, WebhookError> {
        let client = self.hooked_client()?;
        client.delete(&self.id.to_string())
    }

    fn hooked_client(&self) -> Result<crate::webhook::WebhookClient, WebhookError> {
        self.hook
            .as_ref()
            .and_then(Hook::client)
            .ok_or(WebhookError::HookReleased)
    }
}
