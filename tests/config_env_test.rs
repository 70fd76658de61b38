//! Environment overrides for Settings.
//!
//! Kept in its own test binary with a single test: the process environment
//! is shared, so these variables must not leak into other Settings tests.

use std::fs;

use tempfile::TempDir;

use twitch::config::Settings;

#[test]
fn given_twitch_env_vars_when_load_then_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twitch.toml");
    fs::write(
        &path,
        "editor = \"vim\"\n\n[chat]\nprogram = \"chat\"\n\n[commands]\nfile = \"/file/c.yaml\"\n",
    )
    .unwrap();

    std::env::set_var("TWITCH_COMMANDS__FILE", "/env/c.yaml");
    std::env::set_var("TWITCH_CHAT__PROGRAM", "mychat");
    std::env::set_var("TWITCH_EDITOR", "nano");

    let result = Settings::load(Some(&path));

    std::env::remove_var("TWITCH_COMMANDS__FILE");
    std::env::remove_var("TWITCH_CHAT__PROGRAM");
    std::env::remove_var("TWITCH_EDITOR");

    let settings = result.expect("load settings");
    assert_eq!(settings.commands.file.as_deref(), Some("/env/c.yaml"));
    assert_eq!(settings.chat.program, "mychat");
    assert_eq!(settings.editor, "nano");
}
