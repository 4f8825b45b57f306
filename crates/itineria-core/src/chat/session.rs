//! In-memory conversation with the travel assistant.

use log::debug;

use super::ChatCompletion;
use crate::models::{AssistantReply, Message};

/// A conversation held in memory for the lifetime of the session.
#[derive(Debug)]
pub struct ChatSession<C> {
    client: C,
    history: Vec<Message>,
}

impl<C: ChatCompletion> ChatSession<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            history: Vec::new(),
        }
    }

    /// Sends `text` with the whole conversation so far.
    ///
    /// Blank input is ignored and returns `None` without calling the client.
    /// The user message stays in the history even when the call fails; a
    /// reply is appended as an assistant message.
    pub async fn send(&mut self, text: &str) -> Option<AssistantReply> {
        if text.trim().is_empty() {
            return None;
        }

        self.history.push(Message::user(text));
        let reply = self.client.complete(&self.history).await?;

        debug!("Assistant replied with completion {}", reply.id);
        self.history.push(Message::assistant(reply.content.clone()));
        Some(reply)
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
