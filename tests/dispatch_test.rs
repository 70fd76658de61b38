//! End-to-end dispatch of `bot commands` leaves with a real commands file
//! and a recording chat sender.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use twitch::cli::args::CloudbotCommands;
use twitch::cli::commands::execute_cloudbot_command;
use twitch::config::{ChatSettings, CommandsSettings, Settings};
use twitch::exitcode;
use twitch::infrastructure::di::ServiceContainer;
use twitch::infrastructure::traits::{Editor, RecordingChatSender, YamlCommandStore};

struct NoEditor;

impl Editor for NoEditor {
    fn open(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

fn container(file: Option<String>) -> (ServiceContainer, Arc<RecordingChatSender>) {
    let chat = Arc::new(RecordingChatSender::new());
    let settings = Settings {
        editor: "vim".into(),
        chat: ChatSettings::default(),
        commands: CommandsSettings { file },
    };
    let container = ServiceContainer::with_deps(
        settings,
        chat.clone(),
        Arc::new(NoEditor),
        Arc::new(YamlCommandStore),
    );
    (container, chat)
}

fn commands_file(dir: &TempDir) -> String {
    let path = dir.path().join("commands.yaml");
    std::fs::write(
        &path,
        "discord: Join us on Discord\nlurk: Enjoy the lurk!\n",
    )
    .unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn given_yaml_key_when_sync_then_sends_editcommand_with_body() {
    let dir = TempDir::new().unwrap();
    let (container, chat) = container(Some(commands_file(&dir)));

    execute_cloudbot_command(
        &container,
        &CloudbotCommands::Sync {
            args: vec!["discord".into()],
        },
    )
    .unwrap();

    assert_eq!(chat.sent(), vec!["!editcommand !discord Join us on Discord"]);
}

#[test]
fn given_yaml_file_when_list_then_succeeds_without_chat() {
    let dir = TempDir::new().unwrap();
    let (container, chat) = container(Some(commands_file(&dir)));

    execute_cloudbot_command(&container, &CloudbotCommands::List).unwrap();

    assert!(chat.sent().is_empty());
}

#[test]
fn given_empty_yaml_file_when_list_then_returns_bare_bang() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("commands.yaml");
    std::fs::write(&path, "").unwrap();
    let (container, chat) = container(Some(path.to_string_lossy().into_owned()));

    let listing = container.bot_commands().list().unwrap();

    assert_eq!(listing, "!");
    assert!(chat.sent().is_empty());
}

#[test]
fn given_no_file_config_when_list_then_exits_with_config_code() {
    let (container, _chat) = container(None);

    let err = execute_cloudbot_command(&container, &CloudbotCommands::List).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
    assert_eq!(err.to_string(), "missing configuration: file");
}

#[test]
fn given_unreadable_file_when_sync_then_exits_with_noinput_code() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml").to_string_lossy().into_owned();
    let (container, chat) = container(Some(missing));

    let err = execute_cloudbot_command(
        &container,
        &CloudbotCommands::Sync {
            args: vec!["discord".into()],
        },
    )
    .unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
    assert!(chat.sent().is_empty());
}

#[test]
fn given_remove_without_args_when_dispatching_then_usage_exit_code() {
    let (container, chat) = container(None);

    let err = execute_cloudbot_command(&container, &CloudbotCommands::Remove { args: vec![] })
        .unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert_eq!(err.to_string(), "usage: remove <command>");
    assert!(chat.sent().is_empty());
}
