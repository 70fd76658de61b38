//! Domain layer: chat command model
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod command;
pub mod error;

pub use command::{
    check_body_len, format_listing, join_words, normalize_name, BotAction, Usage,
    MAX_BODY_BYTES,
};
pub use error::DomainError;
