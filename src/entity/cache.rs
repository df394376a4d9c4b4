//! Channel registry shared by webhook clients.

use std::sync::Arc;

use dashmap::DashMap;

use super::{Channel, Snowflake};

/// Session-wide registry of channels, keyed by id.
///
/// Every channel is stored once as an `Arc`, so all messages referring to
/// the same remote channel share one object. Placeholders created from
/// webhook responses are inserted with [`get_or_insert_with`]; an
/// authoritative [`register`] replaces them, never the other way round.
///
/// [`get_or_insert_with`]: ChannelRegistry::get_or_insert_with
/// [`register`]: ChannelRegistry::register
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: DashMap<Snowflake, Arc<Channel>>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the channel with the given id.
    #[must_use]
    pub fn get(&self, id: Snowflake) -> Option<Arc<Channel>> {
        self.channels.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the channel with the given id, inserting `make()` if absent.
    ///
    /// Lookup and insert happen under one shard lock: concurrent callers
    /// racing on the same id all receive the same `Arc`. `make` must not
    /// call back into the registry.
    pub fn get_or_insert_with(&self, id: Snowflake, make: impl FnOnce() -> Channel) -> Arc<Channel> {
        Arc::clone(
            self.channels
                .entry(id)
                .or_insert_with(|| Arc::new(make()))
                .value(),
        )
    }

    /// Stores an authoritative channel, replacing any previous entry
    /// (including a placeholder) for its id.
    pub fn register(&self, channel: Channel) -> Arc<Channel> {
        let channel = Arc::new(channel);
        self.channels.insert(channel.id(), Arc::clone(&channel));
        channel
    }

    /// Removes a channel, returning it if present.
    pub fn remove(&self, id: Snowflake) -> Option<Arc<Channel>> {
        self.channels.remove(&id).map(|(_, channel)| channel)
    }

    /// Returns the number of channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns true if no channels are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
