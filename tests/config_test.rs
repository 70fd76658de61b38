//! Integration tests for Settings loading from an explicit config file.
//!
//! These tests pass `--config`-style paths, so no global config is read.

use std::fs;

use tempfile::TempDir;

use twitch::application::ApplicationError;
use twitch::config::Settings;

#[test]
fn given_config_file_when_load_then_reads_nested_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twitch.toml");
    fs::write(
        &path,
        r#"
editor = "nano"

[chat]
program = "/usr/local/bin/chat"

[commands]
file = "/srv/twitch/commands.yaml"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.editor, "nano");
    assert_eq!(settings.chat.program, "/usr/local/bin/chat");
    assert_eq!(
        settings.commands.file.as_deref(),
        Some("/srv/twitch/commands.yaml")
    );
}

#[test]
fn given_partial_config_when_load_then_defaults_fill_gaps() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twitch.toml");
    fs::write(&path, "[commands]\nfile = \"/tmp/c.yaml\"\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.chat.program, "chat");
    assert!(!settings.editor.is_empty());
    assert_eq!(settings.commands.file.as_deref(), Some("/tmp/c.yaml"));
}

#[test]
fn given_file_with_env_var_when_load_then_expands() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twitch.toml");
    fs::write(&path, "[commands]\nfile = \"$HOME/commands.yaml\"\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert_eq!(
        settings.commands.file,
        Some(format!("{home}/commands.yaml"))
    );
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twitch.toml");
    fs::write(&path, "editor = [unclosed").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().starts_with("config error: parse"));
}

#[test]
fn given_settings_when_to_toml_then_round_trips_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twitch.toml");
    fs::write(&path, "[commands]\nfile = \"/tmp/c.yaml\"\n").unwrap();
    let settings = Settings::load(Some(&path)).unwrap();

    let toml = settings.to_toml().unwrap();

    assert!(toml.contains("[commands]"));
    assert!(toml.contains("file = \"/tmp/c.yaml\""));
    assert!(toml.contains("[chat]"));
}
