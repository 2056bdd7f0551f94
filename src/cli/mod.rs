//! Command-line interface
//!
//! clap definitions plus the direct-database commands. Every command goes
//! through the same [`LinkService`] the HTTP server uses.

pub mod commands;

use clap::{Parser, Subcommand};
use std::fmt;

use crate::errors::SnaplinkError;
use crate::services::LinkService;
use crate::system::logging::ConsoleTarget;

/// Snaplink - a small URL shortener
#[derive(Parser)]
#[command(name = "snaplink")]
#[command(version)]
#[command(about = "A small URL shortener with click tracking", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Add a short link
    Add {
        /// Target URL (http or https)
        url: String,

        /// Custom short code (6-8 letters or digits)
        #[arg(long, short = 'c')]
        code: Option<String>,
    },

    /// List all short links, newest first
    List,

    /// Show a single short link
    Get {
        /// Short code
        code: String,
    },

    /// Remove a short link
    Remove {
        /// Short code to remove
        code: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.toml)
        output_path: Option<String>,
    },
}

impl Commands {
    /// 是否需要数据库连接
    pub fn needs_storage(&self) -> bool {
        !matches!(self, Commands::Serve | Commands::Config { .. })
    }

    /// 日志输出目标：服务器用 stdout，其余命令用 stderr
    pub fn console_target(&self) -> ConsoleTarget {
        match self {
            Commands::Serve => ConsoleTarget::Stdout,
            _ => ConsoleTarget::Stderr,
        }
    }
}

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<SnaplinkError> for CliError {
    fn from(err: SnaplinkError) -> Self {
        if err.is_internal() {
            CliError::StorageError(err.message().to_string())
        } else {
            CliError::CommandError(err.format_simple())
        }
    }
}

/// Run a link command against an already-built service
///
/// `Serve` and `Config` are dispatched by the runtime and never reach here.
pub async fn run_link_command(service: &LinkService, cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Add { url, code } => commands::add_link(service, url, code).await,
        Commands::List => commands::list_links(service).await,
        Commands::Get { code } => commands::show_link(service, code).await,
        Commands::Remove { code } => commands::remove_link(service, code).await,
        Commands::Serve | Commands::Config { .. } => Err(CliError::CommandError(
            "Command does not operate on links".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_code() {
        let cli = Cli::try_parse_from(["snaplink", "add", "https://example.com", "--code", "abc123"])
            .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                url: "https://example.com".to_string(),
                code: Some("abc123".to_string()),
            })
        );
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["snaplink"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_only_serve_logs_to_stdout() {
        assert_eq!(Commands::Serve.console_target(), ConsoleTarget::Stdout);
        for args in [
            vec!["snaplink", "list"],
            vec!["snaplink", "get", "abc123"],
            vec!["snaplink", "add", "https://example.com"],
            vec!["snaplink", "remove", "abc123"],
            vec!["snaplink", "config", "generate"],
        ] {
            let cmd = Cli::try_parse_from(args).unwrap().command.unwrap();
            assert_eq!(cmd.console_target(), ConsoleTarget::Stderr, "{:?}", cmd);
        }
    }

    #[test]
    fn test_config_generate_path() {
        let cli = Cli::try_parse_from(["snaplink", "config", "generate", "out.toml"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Generate {
                    output_path: Some("out.toml".to_string()),
                },
            })
        );
        assert!(!cli.command.unwrap().needs_storage());
    }

    #[test]
    fn test_engine_errors_become_cli_errors() {
        let err: CliError = SnaplinkError::code_conflict("taken").into();
        assert!(matches!(err, CliError::CommandError(_)));

        let err: CliError = SnaplinkError::store_unavailable("down").into();
        assert!(matches!(err, CliError::StorageError(_)));
    }
}
