//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the chat command model.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("usage: {command} {usage}")]
    Usage {
        command: &'static str,
        usage: &'static str,
    },

    #[error("Twitch commands must be 380 bytes or less")]
    BodyTooLong { len: usize },
}
