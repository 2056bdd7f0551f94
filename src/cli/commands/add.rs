//! Add link command

use colored::Colorize;

use crate::cli::CliError;
use crate::services::LinkService;

pub async fn add_link(
    service: &LinkService,
    target_url: String,
    short_code: Option<String>,
) -> Result<(), CliError> {
    let generated = short_code.as_deref().is_none_or(str::is_empty);
    let link = service.allocate(&target_url, short_code.as_deref()).await?;

    if generated {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            link.code.magenta()
        );
    }

    println!(
        "{} Added short link: {} -> {}",
        "✓".bold().green(),
        link.code.cyan(),
        link.target_url.blue().underline()
    );

    Ok(())
}
