//! Chat message composition and delivery

use std::io::Read;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::join_words;
use crate::infrastructure::traits::ChatSender;

/// Sends composed messages through a [`ChatSender`].
#[derive(Clone)]
pub struct ChatService {
    sender: Arc<dyn ChatSender>,
}

impl ChatService {
    pub fn new(sender: Arc<dyn ChatSender>) -> Self {
        Self { sender }
    }

    /// Send a message as-is.
    pub fn send(&self, message: &str) -> ApplicationResult<()> {
        debug!("send: {:?}", message);
        self.sender.send(message).with_context("send chat message")
    }

    /// Compose a message from `words`, falling back to `input`, and send it.
    pub fn send_words(&self, words: &[String], input: impl Read) -> ApplicationResult<()> {
        let message = Self::compose(words, input)?;
        self.send(&message)
    }

    /// Words joined with single spaces, or all of `input` when no words
    /// are given. Trailing newlines from `input` are dropped.
    pub fn compose(words: &[String], mut input: impl Read) -> ApplicationResult<String> {
        if !words.is_empty() {
            return Ok(join_words(words));
        }
        let mut buf = String::new();
        input
            .read_to_string(&mut buf)
            .with_context("read message from stdin")?;
        Ok(buf.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string())
    }
}
