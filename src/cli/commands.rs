//! Command dispatch
//!
//! Settings are resolved once here and handed to the services through the
//! [`ServiceContainer`].

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::IoResultExt;
use crate::cli::args::{BotCommands, Cli, CloudbotCommands, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Chat { text }) => {
            let container = build_container(cli)?;
            container
                .chat_service()
                .send_words(text, io::stdin().lock())?;
            Ok(())
        }
        Some(Commands::Bot {
            command: BotCommands::Commands { command },
        }) => {
            let container = build_container(cli)?;
            execute_cloudbot_command(&container, command)
        }
        Some(Commands::Config { command }) => execute_config_command(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".into(),
        )),
    }
}

/// Run one `bot commands` leaf against the given services.
#[instrument(skip(container))]
pub fn execute_cloudbot_command(
    container: &ServiceContainer,
    command: &CloudbotCommands,
) -> CliResult<()> {
    let service = container.bot_commands();
    match command {
        CloudbotCommands::Add { args } => service.add(args)?,
        CloudbotCommands::Edit { args } => service.edit(args)?,
        CloudbotCommands::Remove { args } => service.remove(args)?,
        CloudbotCommands::Sync { args } => service.sync(args)?,
        CloudbotCommands::List => output::info(&service.list()?),
        CloudbotCommands::File { args } => output::info(&service.file(args)?),
    }
    Ok(())
}

fn execute_config_command(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match config_file(cli) {
            Some(path) => output::info(&path.display()),
            None => output::info("(no config directory available)"),
        },
        ConfigCommands::Init { force } => {
            let path = config_file(cli).ok_or_else(|| {
                CliError::InvalidArgs("no config directory available, use --config".into())
            })?;
            if path.exists() && !force {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    InfraError::io(format!("create {}", parent.display()), e)
                })?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
        ConfigCommands::Edit => {
            let path = config_file(cli).ok_or_else(|| {
                CliError::InvalidArgs("no config directory available, use --config".into())
            })?;
            let container = build_container(cli)?;
            container
                .editor
                .open(&path)
                .with_path_context("open editor", &path)?;
        }
    }
    Ok(())
}

fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

fn config_file(cli: &Cli) -> Option<PathBuf> {
    cli.config.clone().or_else(global_config_path)
}
