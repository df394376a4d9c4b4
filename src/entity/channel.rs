//! Channel entities.

use serde::Deserialize;

use crate::webhook::Hook;

use super::Snowflake;

/// The kind of a channel, as far as message routing cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// A regular guild text channel.
    Text,
    /// An announcement (news) channel.
    Announcement,
    /// A thread inside a text, announcement or forum channel.
    Thread,
    /// A forum channel; webhooks post into it by creating threads.
    Forum,
    /// A channel known only by id, e.g. a webhook placeholder.
    Unknown,
}

impl ChannelKind {
    /// Maps the numeric type used on the wire.
    #[must_use]
    pub const fn from_wire(value: u8) -> Self {
        match value {
            0 => Self::Text,
            5 => Self::Announcement,
            10..=12 => Self::Thread,
            15 => Self::Forum,
            _ => Self::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for ChannelKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from_wire)
    }
}

/// A channel messages are posted into.
///
/// A channel is either *synchronized* (registered from an authoritative
/// source with its kind and name) or a *placeholder* created by a webhook
/// that saw the id in a response before anything else described the
/// channel. Placeholders hold a [`Hook`] to that webhook client.
#[derive(Debug, Clone)]
pub struct Channel {
    id: Snowflake,
    kind: ChannelKind,
    name: Option<String>,
    parent_id: Option<Snowflake>,
    webhook: Option<Hook>,
}

impl Channel {
    /// Creates a synchronized channel.
    #[must_use]
    pub const fn new(id: Snowflake, kind: ChannelKind) -> Self {
        Self {
            id,
            kind,
            name: None,
            parent_id: None,
            webhook: None,
        }
    }

    /// Creates a placeholder for a channel only known through `hook`.
    #[must_use]
    pub const fn placeholder(id: Snowflake, hook: Hook) -> Self {
        Self {
            id,
            kind: ChannelKind::Unknown,
            name: None,
            parent_id: None,
            webhook: Some(hook),
        }
    }

    /// Sets the channel name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the parent channel (for threads).
    #[must_use]
    pub fn with_parent(mut self, parent_id: Snowflake) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Returns the channel id.
    #[must_use]
    pub const fn id(&self) -> Snowflake {
        self.id
    }

    /// Returns the channel kind.
    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Returns the channel name, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the parent channel id, if this is a thread.
    #[must_use]
    pub const fn parent_id(&self) -> Option<Snowflake> {
        self.parent_id
    }

    /// Returns the webhook that created this placeholder.
    #[must_use]
    pub const fn webhook(&self) -> Option<&Hook> {
        self.webhook.as_ref()
    }

    /// Returns true if this channel was created from a webhook response
    /// rather than registered from an authoritative source.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.webhook.is_some()
    }
}
