//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (ChatSender, CommandStore, Editor)
//! but are themselves concrete structs, not traits.

mod bot_commands;
mod chat;

pub use bot_commands::BotCommandService;
pub use chat::ChatService;
