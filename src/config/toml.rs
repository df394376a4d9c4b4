//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Webhook configuration section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// HTTP transport section
    #[serde(default)]
    pub http: HttpSection,

    /// Per-message defaults
    #[serde(default)]
    pub message: MessageSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook URL
    pub url: Option<String>,

    /// Thread to scope every request to
    pub thread_id: Option<String>,
}

/// HTTP transport section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// API base URL
    pub api_base: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// `User-Agent` header value
    pub user_agent: Option<String>,
}

/// Defaults applied to every sent message unless overridden on the command line.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageSection {
    /// Display name override
    pub username: Option<String>,

    /// Avatar URL override
    pub avatar_url: Option<String>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of attempts per request
    pub max_attempts: Option<u32>,

    /// Initial retry delay in seconds
    pub initial_delay: Option<u64>,

    /// Maximum retry delay in seconds
    pub max_delay: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# hookpost configuration file

[webhook]
# Webhook URL (required, can be overridden by --url)
# url = "https://discord.com/api/webhooks/123456789012345678/your-token"

# Scope every request to this thread (can be overridden by --thread-id)
# thread_id = "123456789012345678"

[http]
# API base URL (default: https://discord.com/api/v10/)
# api_base = "https://discord.com/api/v10/"

# Request timeout in seconds (default: 30)
# timeout = 30

# User-Agent header
# user_agent = "hookpost"

[message]
# Display name and avatar used for sent messages
# (--username and --avatar-url on `send` take precedence)
# username = "Deploy Bot"
# avatar_url = "https://example.com/avatar.png"

[retry]
# Maximum number of attempts per request (default: 3)
# max_attempts = 3

# Initial retry delay in seconds (default: 1)
# initial_delay = 1

# Maximum retry delay in seconds, also caps Retry-After (default: 30)
# max_delay = 30

# Backoff multiplier (default: 2.0)
# multiplier = 2.0
"#
    .to_string()
}
