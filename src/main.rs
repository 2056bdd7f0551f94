use anyhow::Result;
use clap::Parser;

use snaplink::cli::{Cli, Commands};
use snaplink::config::init_config;
use snaplink::runtime::modes;
use snaplink::system::logging::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = init_config();

    let command = cli.command.unwrap_or(Commands::Serve);

    // 日志 guard 需存活到进程结束
    let _guard = match init_logging(&config.logging, command.console_target()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{}", e.format_colored());
            None
        }
    };

    if command == Commands::Serve {
        return modes::run_server(&config).await;
    }

    if let Err(e) = modes::run_cli(&config, command).await {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }

    Ok(())
}
