//! Streamlabs Cloudbot command model
//!
//! Cloudbot commands are managed by posting chat messages such as
//! `!addcommand !name body`. This module turns positional arguments into
//! those messages.

use std::fmt;

use itertools::Itertools;

use crate::domain::DomainError;

/// Upper bound (exclusive) on the byte length of a synced command body.
pub const MAX_BODY_BYTES: usize = 380;

/// Argument arity declared by a leaf operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    /// Operation name as shown in the error message
    pub command: &'static str,
    /// Expected argument form
    pub form: &'static str,
    pub min_args: usize,
    /// `None` means extra arguments are accepted
    pub max_args: Option<usize>,
}

impl Usage {
    pub const ADD: Usage = Usage {
        command: "add",
        form: "<command> <body>",
        min_args: 2,
        max_args: None,
    };

    pub const EDIT: Usage = Usage {
        command: "edit",
        form: "<command> <msg>",
        min_args: 1,
        max_args: None,
    };

    pub const REMOVE: Usage = Usage {
        command: "remove",
        form: "<command>",
        min_args: 1,
        max_args: None,
    };

    pub const SYNC: Usage = Usage {
        command: "sync",
        form: "<command>",
        min_args: 1,
        max_args: Some(1),
    };

    pub const FILE: Usage = Usage {
        command: "file",
        form: "[edit]",
        min_args: 0,
        max_args: Some(1),
    };

    /// Fail with a usage error if `args` does not fit this arity.
    pub fn check(&self, args: &[String]) -> Result<(), DomainError> {
        let too_few = args.len() < self.min_args;
        let too_many = self.max_args.is_some_and(|max| args.len() > max);
        if too_few || too_many {
            return Err(self.error());
        }
        Ok(())
    }

    pub fn error(&self) -> DomainError {
        DomainError::Usage {
            command: self.command,
            usage: self.form,
        }
    }
}

/// A change to the live bot, expressed as a single chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotAction {
    Add { name: String, body: String },
    Edit { name: String, body: String },
    Remove { name: String },
}

impl BotAction {
    /// `<command> <body…>`; the name is sent as given.
    pub fn add(args: &[String]) -> Result<Self, DomainError> {
        Usage::ADD.check(args)?;
        Ok(Self::Add {
            name: args[0].clone(),
            body: join_words(&args[1..]),
        })
    }

    /// `<command> [body…]`; the name gets a leading `!` if missing.
    pub fn edit(args: &[String]) -> Result<Self, DomainError> {
        Usage::EDIT.check(args)?;
        Ok(Self::Edit {
            name: normalize_name(&args[0]),
            body: join_words(&args[1..]),
        })
    }

    /// `<command>`; the name gets a leading `!` if missing.
    pub fn remove(args: &[String]) -> Result<Self, DomainError> {
        Usage::REMOVE.check(args)?;
        Ok(Self::Remove {
            name: normalize_name(&args[0]),
        })
    }

    /// The Cloudbot chat command that carries this action.
    pub fn chat_command(&self) -> &'static str {
        match self {
            BotAction::Add { .. } => "!addcommand",
            BotAction::Edit { .. } => "!editcommand",
            BotAction::Remove { .. } => "!rmcommand",
        }
    }
}

impl fmt::Display for BotAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotAction::Add { name, body } | BotAction::Edit { name, body } => {
                write!(f, "{} {} {}", self.chat_command(), name, body)
            }
            BotAction::Remove { name } => write!(f, "{} {}", self.chat_command(), name),
        }
    }
}

/// Prefix `!` unless the name already starts with it.
pub fn normalize_name(name: &str) -> String {
    if name.starts_with('!') {
        name.to_string()
    } else {
        format!("!{name}")
    }
}

/// Join words with single spaces. Empty words are kept, so trailing
/// separators survive.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}

/// Validate a command body against [`MAX_BODY_BYTES`]; returns the byte length.
pub fn check_body_len(body: &str) -> Result<usize, DomainError> {
    let len = body.len();
    if len >= MAX_BODY_BYTES {
        return Err(DomainError::BodyTooLong { len });
    }
    Ok(len)
}

/// Format the YAML key listing (`- a\n- b`) as a chat-friendly `!a !b`.
///
/// Lines are sorted bytewise before the `- ` markers are stripped.
pub fn format_listing(keys: &str) -> String {
    let joined = keys.lines().sorted().join(" !");
    format!("!{}", joined.replace("- ", ""))
}
