//! Webhook credentials.

use std::fmt;

use url::Url;

use crate::entity::Snowflake;

use super::IdentityError;

/// The id and secret token that address one webhook.
///
/// Validated once at construction; every route compiled from it is
/// well-formed. `Debug` never prints the token.
///
/// # Example
///
/// ```
/// use hookpost::webhook::WebhookIdentity;
/// use url::Url;
///
/// let url = Url::parse("https://discord.com/api/webhooks/123456789012345678/tok_abc").unwrap();
/// let identity = WebhookIdentity::from_url(&url).unwrap();
///
/// assert_eq!(identity.id(), 123_456_789_012_345_678);
/// assert_eq!(identity.token(), "tok_abc");
/// assert!(!format!("{identity:?}").contains("tok_abc"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookIdentity {
    id: u64,
    token: String,
}

impl WebhookIdentity {
    /// Creates an identity from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::ZeroId`] for a zero id and
    /// [`IdentityError::InvalidToken`] for an empty token or one containing
    /// whitespace, `/`, `?` or `#`.
    pub fn new(id: u64, token: impl Into<String>) -> Result<Self, IdentityError> {
        if id == 0 {
            return Err(IdentityError::ZeroId);
        }

        let token = token.into();
        if token.is_empty() {
            return Err(IdentityError::InvalidToken {
                reason: "token is empty",
            });
        }
        if token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
        {
            return Err(IdentityError::InvalidToken {
                reason: "token contains whitespace or URL delimiters",
            });
        }

        Ok(Self { id, token })
    }

    /// Extracts the identity from a webhook URL such as
    /// `https://discord.com/api/webhooks/{id}/{token}`.
    ///
    /// Anything after the token (for example `/github` or a query) is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::NotWebhookUrl`] if the path has no
    /// `webhooks/{id}/{token}` sequence or the id is not a snowflake, and the
    /// [`WebhookIdentity::new`] errors for an unusable token.
    pub fn from_url(url: &Url) -> Result<Self, IdentityError> {
        let not_webhook = |reason| IdentityError::NotWebhookUrl {
            url: url.to_string(),
            reason,
        };

        let mut segments = url
            .path_segments()
            .ok_or_else(|| not_webhook("URL has no path"))?
            .skip_while(|segment| *segment != "webhooks");

        segments
            .next()
            .ok_or_else(|| not_webhook("missing 'webhooks' path segment"))?;

        let id = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| not_webhook("missing webhook id"))?
            .parse::<Snowflake>()
            .map_err(|_| not_webhook("webhook id is not a snowflake"))?;

        let token = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| not_webhook("missing webhook token"))?;

        Self::new(id.get(), token)
    }

    /// Returns the webhook id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the secret token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for WebhookIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookIdentity")
            .field("id", &self.id)
            .field("token", &crate::route::REDACTED)
            .finish()
    }
}
