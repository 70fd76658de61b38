//! CLI argument definitions using clap
//!
//! Leaf operations take their positional arguments raw; arity is checked by
//! the services so each operation reports its own usage form.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Collection of Twitch helper commands
#[derive(Parser, Debug)]
#[command(name = "twitch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file (default: $XDG_CONFIG_HOME/twitch/twitch.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send all arguments as a single string to Twitch chat (stdin if none)
    Chat {
        /// Message words
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Bot-related commands
    Bot {
        #[command(subcommand)]
        command: BotCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum BotCommands {
    /// Update and list Twitch Streamlabs Cloudbot commands
    #[command(visible_aliases = ["c", "cmd"])]
    Commands {
        #[command(subcommand)]
        command: CloudbotCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CloudbotCommands {
    /// Add (or update) a command with !addcommand
    #[command(visible_alias = "a")]
    Add {
        /// <command> <body>
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Edit a command with !editcommand
    #[command(visible_alias = "e")]
    Edit {
        /// <command> <msg>
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Remove a command with !rmcommand
    #[command(visible_alias = "rm")]
    Remove {
        /// <command>
        args: Vec<String>,
    },

    /// List existing commands from the commands file
    #[command(visible_alias = "l")]
    List,

    /// Print the full path to the commands file from configuration
    File {
        /// [edit]
        args: Vec<String>,
    },

    /// Sync a command from the YAML file to Twitch
    ///
    /// The message body length is logged at info level; pass -v to see it.
    Sync {
        /// <command>
        args: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config path
    Path,

    /// Edit config file
    Edit,
}
