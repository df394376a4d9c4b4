//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// hookpost: send, edit, fetch and delete messages through an incoming webhook
///
/// Credentials come from the webhook URL, given with --url or in the
/// configuration file.
#[derive(Debug, Parser)]
#[command(name = "hookpost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Webhook URL (`https://discord.com/api/webhooks/{id}/{token}`)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Post into, or act on a message inside, this thread
    #[arg(long = "thread-id", global = true)]
    pub thread_id: Option<String>,

    /// API base URL requests are resolved against
    #[arg(long = "api-base", global = true)]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum number of attempts per request
    #[arg(long = "retry-max", global = true)]
    pub retry_max: Option<u32>,

    /// Initial retry delay in seconds
    #[arg(long = "retry-delay", global = true)]
    pub retry_delay: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for hookpost
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Post a new message
    Send {
        /// Message text
        content: Option<String>,

        /// Add an embed with this description (can be specified multiple times)
        #[arg(long = "embed", value_name = "DESCRIPTION")]
        embeds: Vec<String>,

        /// Override the webhook's display name
        #[arg(long)]
        username: Option<String>,

        /// Override the webhook's avatar
        #[arg(long = "avatar-url")]
        avatar_url: Option<String>,

        /// Send as text-to-speech
        #[arg(long)]
        tts: bool,

        /// Create a forum thread with this name
        #[arg(long = "thread-name")]
        thread_name: Option<String>,
    },

    /// Replace the content of a message
    Edit {
        /// Message id, or @original
        message_id: String,

        /// New message text
        content: String,
    },

    /// Fetch a message
    Get {
        /// Message id, or @original
        message_id: String,
    },

    /// Delete a message
    Delete {
        /// Message id, or @original
        message_id: String,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "hookpost.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning clap's error
    /// instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns [`clap::Error`] for unknown flags or missing arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
