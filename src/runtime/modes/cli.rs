//! CLI mode

use crate::cli::{CliError, Commands, ConfigCommands, commands, run_link_command};
use crate::config::AppConfig;
use crate::runtime::lifetime;

/// Run a non-server command
///
/// `config generate` needs no database; every other command connects,
/// runs once against the engine and closes the connection.
pub async fn run_cli(config: &AppConfig, cmd: Commands) -> Result<(), CliError> {
    if !cmd.needs_storage() {
        return match cmd {
            Commands::Config {
                action: ConfigCommands::Generate { output_path },
            } => commands::generate_config(output_path),
            _ => Err(CliError::CommandError(
                "Command must be run by the server runtime".to_string(),
            )),
        };
    }

    let startup = lifetime::startup::prepare_startup(config)
        .await
        .map_err(|e| CliError::StorageError(format!("{:#}", e)))?;

    let result = run_link_command(&startup.link_service, cmd).await;
    lifetime::shutdown::close_store(startup.store).await;
    result
}
