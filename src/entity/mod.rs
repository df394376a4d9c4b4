//! Domain entities produced from webhook responses.
//!
//! This module provides:
//! - Identifiers ([`Snowflake`])
//! - Channels ([`Channel`], [`ChannelKind`]) and the shared [`ChannelRegistry`]
//! - Messages ([`Message`], [`Author`], [`Embed`])
//! - Payload decoding ([`EntityBuilder`])

mod builder;
mod cache;
mod channel;
mod id;
mod message;


pub use builder::{EntityBuilder, MessageData, PayloadError};
pub use cache::ChannelRegistry;
pub use channel::{Channel, ChannelKind};
pub use id::{InvalidSnowflake, Snowflake};
pub use message::{Author, Embed, EmbedField, Message};
