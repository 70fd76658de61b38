//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <path>`, else `$XDG_CONFIG_HOME/twitch/twitch.toml`
//! 3. Environment variables: `TWITCH_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Chat delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChatSettings {
    /// Program invoked as `<program> <message>` to post to chat
    pub program: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            program: "chat".into(),
        }
    }
}

/// Cloudbot command settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandsSettings {
    /// YAML file mapping command names to bodies
    pub file: Option<String>,
}

/// Unified configuration for twitch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Editor command (default: $VISUAL, $EDITOR or "vim")
    pub editor: String,
    pub chat: ChatSettings,
    pub commands: CommandsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let editor = std::env::var("VISUAL")
            .or_else(|_| std::env::var("EDITOR"))
            .unwrap_or_else(|_| "vim".into());

        Self {
            editor,
            chat: ChatSettings::default(),
            commands: CommandsSettings::default(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub editor: Option<String>,
    pub chat: RawChatSettings,
    pub commands: RawCommandsSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawChatSettings {
    pub program: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCommandsSettings {
    pub file: Option<String>,
}

/// Get the XDG config directory for twitch.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "twitch").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("twitch.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn expand_env_vars(value: &str) -> String {
    shellexpand::full(value)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// An explicit `config_path` must exist; the global config file is
    /// optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        let file = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => global_config_path().filter(|path| path.exists()),
        };
        if let Some(path) = file {
            debug!("load: config file {}", path.display());
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            editor: overlay
                .editor
                .clone()
                .unwrap_or_else(|| self.editor.clone()),
            chat: ChatSettings {
                program: overlay
                    .chat
                    .program
                    .clone()
                    .unwrap_or_else(|| self.chat.program.clone()),
            },
            commands: CommandsSettings {
                file: overlay
                    .commands
                    .file
                    .clone()
                    .or_else(|| self.commands.file.clone()),
            },
        }
    }

    /// Apply TWITCH_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`: `TWITCH_COMMANDS__FILE`, `TWITCH_CHAT__PROGRAM`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TWITCH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("editor") {
            settings.editor = val;
        }
        if let Ok(val) = config.get_string("chat.program") {
            settings.chat.program = val;
        }
        if let Ok(val) = config.get_string("commands.file") {
            settings.commands.file = Some(val);
        }

        Ok(settings)
    }

    /// Expand `~`, `$VAR` and `${VAR}` in path-like fields.
    fn expand_paths(&mut self) {
        self.editor = expand_env_vars(&self.editor);
        self.commands.file = self.commands.file.as_deref().map(expand_env_vars);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# twitch configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/twitch/twitch.toml (or --config <path>)
#   Env:  TWITCH_* environment variables, e.g. TWITCH_COMMANDS__FILE

# Editor for the commands file
# editor = "vim"

[chat]
# Program that posts its single argument to Twitch chat
# program = "chat"

[commands]
# YAML file mapping Cloudbot command names to bodies
# file = "~/.config/twitch/commands.yaml"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overlay_when_merging_then_keeps_defaults() {
        let base = Settings {
            editor: "vim".into(),
            chat: ChatSettings::default(),
            commands: CommandsSettings::default(),
        };

        let merged = base.merge_with(&RawSettings::default());

        assert_eq!(merged, base);
        assert_eq!(merged.chat.program, "chat");
        assert_eq!(merged.commands.file, None);
    }

    #[test]
    fn given_overlay_values_when_merging_then_overlay_wins() {
        let base = Settings {
            editor: "vim".into(),
            chat: ChatSettings::default(),
            commands: CommandsSettings {
                file: Some("/old.yaml".into()),
            },
        };
        let overlay = RawSettings {
            editor: Some("nano".into()),
            chat: RawChatSettings {
                program: Some("twitch-chat".into()),
            },
            commands: RawCommandsSettings {
                file: Some("/new.yaml".into()),
            },
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.editor, "nano");
        assert_eq!(merged.chat.program, "twitch-chat");
        assert_eq!(merged.commands.file.as_deref(), Some("/new.yaml"));
    }

    #[test]
    fn given_tilde_in_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            editor: "vim".into(),
            chat: ChatSettings::default(),
            commands: CommandsSettings {
                file: Some("~/commands.yaml".into()),
            },
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let file = settings.commands.file.unwrap();
        assert!(file.starts_with(&home), "file should start with home: {file}");
        assert!(!file.contains('~'));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("parse template");
        assert!(raw.editor.is_none());
        assert!(raw.commands.file.is_none());
    }
}
