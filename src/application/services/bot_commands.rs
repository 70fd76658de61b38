//! Streamlabs Cloudbot command management
//!
//! `add`, `edit` and `remove` post Cloudbot chat commands. `sync`, `list` and
//! `file` work against the YAML commands file named by `commands.file`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::services::ChatService;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{check_body_len, format_listing, BotAction, Usage};
use crate::infrastructure::traits::{CommandStore, Editor};

/// Configuration key reported when the commands file is not set.
const FILE_KEY: &str = "file";

/// Service for adding, editing, removing and syncing bot commands.
pub struct BotCommandService {
    chat: ChatService,
    store: Arc<dyn CommandStore>,
    editor: Arc<dyn Editor>,
    settings: Arc<Settings>,
}

impl BotCommandService {
    pub fn new(
        chat: ChatService,
        store: Arc<dyn CommandStore>,
        editor: Arc<dyn Editor>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            chat,
            store,
            editor,
            settings,
        }
    }

    /// `add <command> <body…>` → `!addcommand <command> <body>`
    #[instrument(skip(self))]
    pub fn add(&self, args: &[String]) -> ApplicationResult<()> {
        self.apply(BotAction::add(args)?)
    }

    /// `edit <command> [body…]` → `!editcommand !<command> <body>`
    #[instrument(skip(self))]
    pub fn edit(&self, args: &[String]) -> ApplicationResult<()> {
        self.apply(BotAction::edit(args)?)
    }

    /// `remove <command>` → `!rmcommand !<command>`
    #[instrument(skip(self))]
    pub fn remove(&self, args: &[String]) -> ApplicationResult<()> {
        self.apply(BotAction::remove(args)?)
    }

    /// Push the body stored under `<key>` in the commands file to the live bot.
    ///
    /// The body must be under [`crate::domain::MAX_BODY_BYTES`] bytes; it is
    /// sent through `edit` with the key as the command name.
    #[instrument(skip(self))]
    pub fn sync(&self, args: &[String]) -> ApplicationResult<()> {
        Usage::SYNC.check(args)?;
        let path = self.commands_file()?;
        let key = &args[0];

        let body = self.store.evaluate(&path, &format!(".{key}"))?;
        let len = check_body_len(&body)?;
        info!("Message body length: {}", len);

        self.edit(&[key.clone(), body])
    }

    /// Sorted command names from the commands file, formatted as `!a !b`.
    #[instrument(skip(self))]
    pub fn list(&self) -> ApplicationResult<String> {
        let path = self.commands_file()?;
        let keys = self.store.evaluate(&path, "keys")?;
        Ok(format_listing(&keys))
    }

    /// The configured commands file path, opened in the editor first when
    /// called with `edit`.
    ///
    /// An unset path is returned as an empty string rather than an error.
    #[instrument(skip(self))]
    pub fn file(&self, args: &[String]) -> ApplicationResult<String> {
        Usage::FILE.check(args)?;
        let edit = match args.first().map(String::as_str) {
            None => false,
            Some("edit") => true,
            Some(_) => return Err(Usage::FILE.error().into()),
        };

        let path = self.settings.commands.file.clone().unwrap_or_default();
        if edit {
            let target = Path::new(&path);
            self.editor
                .open(target)
                .with_path_context("open editor", target)?;
        }
        Ok(path)
    }

    fn apply(&self, action: BotAction) -> ApplicationResult<()> {
        debug!("apply: {:?}", action);
        self.chat.send(&action.to_string())
    }

    fn commands_file(&self) -> ApplicationResult<PathBuf> {
        match self.settings.commands.file.as_deref() {
            Some(file) if !file.is_empty() => Ok(PathBuf::from(file)),
            _ => Err(ApplicationError::MissingConfig { key: FILE_KEY }),
        }
    }
}
