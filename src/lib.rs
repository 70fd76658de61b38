//! Twitch helper commands: chat and Streamlabs Cloudbot command management.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
