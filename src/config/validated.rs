//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::entity::Snowflake;
use crate::transport::RetryPolicy;
use crate::webhook::WebhookIdentity;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Webhook credentials (required)
    pub identity: WebhookIdentity,

    /// Thread every request is scoped to
    pub thread_id: Option<String>,

    /// API base URL
    pub api_base: Url,

    /// Request timeout
    pub timeout: Duration,

    /// `User-Agent` header value
    pub user_agent: String,

    /// Display name used when `send` gives none
    pub username: Option<String>,

    /// Avatar URL used when `send` gives none
    pub avatar_url: Option<String>,

    /// Retry policy for failed requests
    pub retry_policy: RetryPolicy,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ webhook: {}, thread_id: {}, api_base: {}, timeout: {}s, retry: {}x/{}s }}",
            self.identity.id(),
            self.thread_id.as_deref().unwrap_or("none"),
            self.api_base,
            self.timeout.as_secs(),
            self.retry_policy.max_attempts,
            self.retry_policy.initial_delay.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The webhook URL is missing, unparsable or not a webhook URL
    /// - The thread id is not a snowflake
    /// - The API base cannot carry a path
    /// - Duration values are zero
    /// - The retry settings are inconsistent
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let identity = Self::resolve_identity(cli, toml)?;
        let thread_id = Self::resolve_thread_id(cli, toml)?;
        let api_base = Self::resolve_api_base(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let user_agent = Self::resolve_user_agent(toml)?;
        let retry_policy = Self::build_retry_policy(cli, toml)?;

        let message = toml.map(|t| &t.message);

        Ok(Self {
            identity,
            thread_id,
            api_base,
            timeout,
            user_agent,
            username: message.and_then(|m| m.username.clone()),
            avatar_url: message.and_then(|m| m.avatar_url.clone()),
            retry_policy,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_identity(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<WebhookIdentity, ConfigError> {
        // CLI takes precedence
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Use --url or set webhook.url in config file")
            })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        Ok(WebhookIdentity::from_url(&url)?)
    }

    fn resolve_thread_id(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<String>, ConfigError> {
        let thread_id = cli
            .thread_id
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.thread_id.as_deref()))
            .filter(|id| !id.is_empty());

        match thread_id {
            Some(id) => id
                .parse::<Snowflake>()
                .map(|_| Some(id.to_string()))
                .map_err(|_| ConfigError::InvalidThreadId {
                    value: id.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn resolve_api_base(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let base_str = cli
            .api_base
            .as_deref()
            .or_else(|| toml.and_then(|t| t.http.api_base.as_deref()))
            .unwrap_or(defaults::API_BASE);

        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: base_str.to_string(),
            reason,
        };

        let url = Url::parse(base_str).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("API base must be an http(s) URL".to_string()));
        }

        Ok(url)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.http.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_user_agent(toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let user_agent = toml
            .and_then(|t| t.http.user_agent.as_deref())
            .unwrap_or(defaults::USER_AGENT);

        http::HeaderValue::from_str(user_agent).map_err(|e| ConfigError::InvalidUserAgent {
            value: user_agent.to_string(),
            reason: e.to_string(),
        })?;

        Ok(user_agent.to_string())
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_attempts = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_delay_secs = cli
            .retry_delay
            .or_else(|| retry.and_then(|r| r.initial_delay))
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_SECS);

        let max_delay_secs = retry
            .and_then(|r| r.max_delay)
            .unwrap_or(defaults::RETRY_MAX_DELAY_SECS);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if initial_delay_secs == 0 {
            return Err(ConfigError::InvalidRetry(
                "initial_delay must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if max_delay_secs < initial_delay_secs {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay ({max_delay_secs}s) must be >= initial_delay ({initial_delay_secs}s)"
            )));
        }

        Ok(RetryPolicy::new()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_secs(initial_delay_secs))
            .with_max_delay(Duration::from_secs(max_delay_secs))
            .with_multiplier(multiplier))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
