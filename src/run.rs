//! Application execution logic.
//!
//! Builds the webhook client from validated configuration, performs the
//! requested command and renders the outcome for the terminal.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use hookpost::config::{Command, ValidatedConfig};
use hookpost::entity::{ChannelRegistry, Embed, Message};
use hookpost::transport::{HttpError, ReqwestClient, RetryingClient};
use hookpost::webhook::{MessageCreate, MessageEdit, Requester, WebhookClient, WebhookError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// The configured user agent is not a valid header value.
    #[error("Invalid user agent: {0}")]
    UserAgent(#[source] http::header::InvalidHeaderValue),

    /// The webhook operation failed.
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// The command does not perform a request.
    #[error("'{0}' does not talk to the webhook")]
    NotARequest(&'static str),

    /// Failed to render the result.
    #[error("Failed to render message: {0}")]
    Render(#[source] serde_json::Error),
}

/// What a command produced.
#[derive(Debug)]
pub enum Outcome {
    /// A message was sent, edited or fetched.
    Message(Box<Message>),
    /// A message was deleted.
    Deleted(String),
}

impl Outcome {
    /// Renders the outcome for standard output.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Render`] if the message cannot be serialized.
    pub fn render(&self) -> Result<String, RunError> {
        match self {
            Self::Message(message) => {
                serde_json::to_string_pretty(&MessageView::from(message.as_ref()))
                    .map_err(RunError::Render)
            }
            Self::Deleted(id) => Ok(format!("deleted {id}")),
        }
    }
}

/// Output shape of a message.
#[derive(Debug, Serialize)]
struct MessageView<'a> {
    id: String,
    channel_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edited_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "no_embeds")]
    embeds: &'a [Embed],
}

fn no_embeds(embeds: &&[Embed]) -> bool {
    embeds.is_empty()
}

impl<'a> From<&'a Message> for MessageView<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            id: message.id().to_string(),
            channel_id: message.channel().id().to_string(),
            author: message.author().map(|a| a.username.as_str()),
            content: message.content(),
            timestamp: message.timestamp(),
            edited_timestamp: message.edited_timestamp(),
            embeds: message.embeds(),
        }
    }
}

/// Executes one command against the configured webhook.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the operation fails.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it talks to the real API.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<Outcome, RunError> {
    let client = create_client(&config)?;
    perform(&client, &config, command).await
}

/// Builds a [`WebhookClient`] backed by reqwest with retries.
///
/// # Errors
///
/// Returns an error if the HTTP client or user agent is rejected.
pub fn create_client(config: &ValidatedConfig) -> Result<WebhookClient, RunError> {
    let http = ReqwestClient::with_options(config.timeout, &config.user_agent)
        .map_err(RunError::HttpClient)?;
    let http = RetryingClient::new(http).with_retry_policy(config.retry_policy.clone());

    let requester = Requester::new(http)
        .with_base_url(config.api_base.clone())
        .with_user_agent(&config.user_agent)
        .map_err(RunError::UserAgent)?;

    let client = WebhookClient::new(
        config.identity.clone(),
        Arc::new(requester),
        Arc::new(ChannelRegistry::new()),
    );

    Ok(match &config.thread_id {
        Some(thread_id) => client.with_thread_id(thread_id.as_str()),
        None => client,
    })
}

/// Performs `command` through `client`.
///
/// # Errors
///
/// Returns [`RunError::Webhook`] for any failed operation and
/// [`RunError::NotARequest`] for `init`.
pub async fn perform(
    client: &WebhookClient,
    config: &ValidatedConfig,
    command: Command,
) -> Result<Outcome, RunError> {
    match command {
        Command::Send {
            content,
            embeds,
            username,
            avatar_url,
            tts,
            thread_name,
        } => {
            let mut payload = MessageCreate::new().with_tts(tts);
            if let Some(content) = content {
                payload = payload.with_content(content);
            }
            for description in embeds {
                payload = payload.with_embed(Embed::with_description(description));
            }
            if let Some(username) = username.or_else(|| config.username.clone()) {
                payload = payload.with_username(username);
            }
            if let Some(avatar_url) = avatar_url.or_else(|| config.avatar_url.clone()) {
                payload = payload.with_avatar_url(avatar_url);
            }
            if let Some(thread_name) = thread_name {
                payload = payload.with_thread_name(thread_name);
            }

            let message = client.send(&payload)?.await?;
            tracing::info!(message_id = %message.id(), "Message sent");
            Ok(Outcome::Message(Box::new(message)))
        }
        Command::Edit {
            message_id,
            content,
        } => {
            let message = client
                .edit(&message_id, &MessageEdit::text(content))?
                .await?;
            tracing::info!(message_id = %message.id(), "Message edited");
            Ok(Outcome::Message(Box::new(message)))
        }
        Command::Get { message_id } => {
            let message = client.retrieve(&message_id)?.await?;
            Ok(Outcome::Message(Box::new(message)))
        }
        Command::Delete { message_id } => {
            client.delete(&message_id)?.await?;
            tracing::info!(message_id = %message_id, "Message deleted");
            Ok(Outcome::Deleted(message_id))
        }
        Command::Init { .. } => Err(RunError::NotARequest("init")),
    }
}
