//! References to messages posted by a webhook.

use std::fmt;
use std::str::FromStr;

use crate::entity::Snowflake;

use super::WebhookError;

/// Sentinel addressing the message the webhook originally posted
/// (for interaction webhooks, the initial response).
pub const ORIGINAL: &str = "@original";

/// A validated message reference: either [`ORIGINAL`] or a snowflake.
///
/// # Example
///
/// ```
/// use hookpost::webhook::MessageRef;
///
/// assert_eq!(MessageRef::parse("@original").unwrap(), MessageRef::Original);
/// assert_eq!(MessageRef::parse("00555").unwrap().to_string(), "00555");
/// assert!(MessageRef::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageRef {
    /// The `@original` sentinel.
    Original,
    /// A concrete message id and the text it was given as.
    ///
    /// The text goes into the request path unchanged, so `00555` is sent
    /// as `00555` rather than re-rendered from the number.
    Id {
        /// The parsed id.
        id: Snowflake,
        /// The validated input.
        text: String,
    },
}

impl MessageRef {
    /// Validates a message reference.
    ///
    /// `@original` is accepted as-is; anything else must be a snowflake.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidIdentifier`] for any other input.
    pub fn parse(value: &str) -> Result<Self, WebhookError> {
        if value == ORIGINAL {
            return Ok(Self::Original);
        }

        value
            .parse::<Snowflake>()
            .map(|id| Self::Id {
                id,
                text: value.to_string(),
            })
            .map_err(|e| WebhookError::InvalidIdentifier { value: e.value })
    }

    /// Returns the message id, or `None` for [`ORIGINAL`].
    #[must_use]
    pub const fn id(&self) -> Option<Snowflake> {
        match self {
            Self::Original => None,
            Self::Id { id, .. } => Some(*id),
        }
    }

    /// Returns the reference as it appears in a request path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Original => ORIGINAL,
            Self::Id { text, .. } => text,
        }
    }
}

impl FromStr for MessageRef {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Snowflake> for MessageRef {
    fn from(id: Snowflake) -> Self {
        Self::Id {
            id,
            text: id.to_string(),
        }
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
