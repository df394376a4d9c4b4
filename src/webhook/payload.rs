//! Request bodies for sending and editing messages.

use serde::Serialize;

use crate::entity::Embed;

use super::WebhookError;

/// Maximum message content length, in characters.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Maximum number of embeds per message.
pub const MAX_EMBEDS: usize = 10;

/// Body of a new webhook message.
///
/// # Example
///
/// ```
/// use hookpost::webhook::MessageCreate;
///
/// let payload = MessageCreate::text("deploy finished")
///     .with_username("ci")
///     .with_tts(false);
/// assert!(payload.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    tts: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_name: Option<String>,
}

impl MessageCreate {
    /// Creates an empty payload; add content or embeds before sending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a payload with text content.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::new().with_content(content)
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Overrides the webhook's display name for this message.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Overrides the webhook's avatar for this message.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Sends the message as text-to-speech.
    #[must_use]
    pub const fn with_tts(mut self, tts: bool) -> Self {
        self.tts = tts;
        self
    }

    /// Appends an embed.
    #[must_use]
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Creates a new thread with this name (forum channels only).
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = Some(name.into());
        self
    }

    /// Returns the text content.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the username override.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Checks the payload against the API's message limits.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidPayload`] if the message has neither
    /// content nor embeds, the content exceeds [`MAX_CONTENT_CHARS`], or
    /// there are more than [`MAX_EMBEDS`] embeds.
    pub fn validate(&self) -> Result<(), WebhookError> {
        let has_content = self.content.as_deref().is_some_and(|c| !c.trim().is_empty());
        if !has_content && self.embeds.is_empty() {
            return Err(WebhookError::invalid_payload(
                "message needs content or at least one embed",
            ));
        }
        check_limits(self.content.as_deref(), &self.embeds)
    }
}

/// Body of a message edit. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embeds: Option<Vec<Embed>>,
}

impl MessageEdit {
    /// Creates an edit that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an edit replacing the text content.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::new().with_content(content)
    }

    /// Replaces the text content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Replaces all embeds; an empty list removes them.
    #[must_use]
    pub fn with_embeds(mut self, embeds: Vec<Embed>) -> Self {
        self.embeds = Some(embeds);
        self
    }

    /// Returns the replacement content.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Checks the edit against the API's message limits.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidPayload`] if the edit changes nothing
    /// or exceeds a limit.
    pub fn validate(&self) -> Result<(), WebhookError> {
        if self.content.is_none() && self.embeds.is_none() {
            return Err(WebhookError::invalid_payload("edit changes nothing"));
        }
        check_limits(
            self.content.as_deref(),
            self.embeds.as_deref().unwrap_or_default(),
        )
    }
}

fn check_limits(content: Option<&str>, embeds: &[Embed]) -> Result<(), WebhookError> {
    if let Some(content) = content {
        let chars = content.chars().count();
        if chars > MAX_CONTENT_CHARS {
            return Err(WebhookError::invalid_payload(format!(
                "content is {chars} characters, limit is {MAX_CONTENT_CHARS}"
            )));
        }
    }

    if embeds.len() > MAX_EMBEDS {
        return Err(WebhookError::invalid_payload(format!(
            "{} embeds, limit is {MAX_EMBEDS}",
            embeds.len()
        )));
    }

    Ok(())
}
