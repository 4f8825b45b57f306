//! Chat-completion client for the travel assistant.
//!
//! [`ChatClient`] sends a whole conversation and returns the first choice of
//! the reply. Like the places client it never surfaces errors: failures are
//! logged and become `None`.

use std::{future::Future, time::Duration};

use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    config::{ChatConfig, DEFAULT_CHAT_MODEL},
    error::RemoteError,
    models::{AssistantReply, Message},
};

pub mod session;

pub use session::ChatSession;

/// Something that can answer a conversation.
pub trait ChatCompletion {
    /// Produces the next assistant reply for `history`, or `None` on failure.
    fn complete(&self, history: &[Message]) -> impl Future<Output = Option<AssistantReply>> + Send;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    id: String,
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// HTTP client for the chat-completion API.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Creates a client for the default model.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    /// Creates a client from the `chat` configuration section.
    pub fn from_config(config: &ChatConfig, timeout: Duration) -> Result<Self, RemoteError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends the conversation and returns the first choice.
    pub async fn try_complete(&self, history: &[Message]) -> Result<AssistantReply, RemoteError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            "POST {url} with {} messages for model {}",
            history.len(),
            self.model
        );

        let body = ChatRequest {
            model: &self.model,
            messages: history,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        let bytes = response.bytes().await?;
        let decoded: ChatResponse = serde_json::from_slice(&bytes)?;
        let choice = decoded
            .choices
            .into_iter()
            .next()
            .ok_or(RemoteError::EmptyResponse)?;

        Ok(AssistantReply {
            id: decoded.id,
            content: clean_reply(&choice.message.content),
        })
    }
}

impl ChatCompletion for ChatClient {
    async fn complete(&self, history: &[Message]) -> Option<AssistantReply> {
        match self.try_complete(history).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!("Chat completion failed: {e}");
                None
            }
        }
    }
}

/// Strips surrounding whitespace and double quotes from a reply.
pub fn clean_reply(content: &str) -> String {
    content
        .trim_matches(|c: char| c.is_whitespace() || c == '"')
        .to_string()
}
