//! hookpost: a client for incoming webhooks
//!
//! A library for sending, editing, fetching and deleting messages through
//! a pre-authorized webhook, turning responses into message and channel
//! entities that stay wired to the client that produced them.

pub mod config;
pub mod entity;
pub mod route;
pub mod time;
pub mod transport;
pub mod webhook;
