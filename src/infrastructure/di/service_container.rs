//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{BotCommandService, ChatService};
use crate::config::Settings;
use crate::infrastructure::traits::{
    ChatSender, CommandEditor, CommandStore, Editor, ProcessChatSender, YamlCommandStore,
};

/// Container holding all application services.
///
/// Built once per invocation at the dispatch boundary.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Chat delivery
    pub chat: Arc<dyn ChatSender>,

    /// Editor for the commands and config files
    pub editor: Arc<dyn Editor>,

    /// YAML commands file access
    pub store: Arc<dyn CommandStore>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let chat = Arc::new(ProcessChatSender::new(settings.chat.program.clone()));
        let editor = Arc::new(CommandEditor::new(settings.editor.clone()));
        Self::with_deps(settings, chat, editor, Arc::new(YamlCommandStore))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        chat: Arc<dyn ChatSender>,
        editor: Arc<dyn Editor>,
        store: Arc<dyn CommandStore>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            chat,
            editor,
            store,
        }
    }

    pub fn chat_service(&self) -> ChatService {
        ChatService::new(Arc::clone(&self.chat))
    }

    pub fn bot_commands(&self) -> BotCommandService {
        BotCommandService::new(
            self.chat_service(),
            Arc::clone(&self.store),
            Arc::clone(&self.editor),
            Arc::clone(&self.settings),
        )
    }
}
