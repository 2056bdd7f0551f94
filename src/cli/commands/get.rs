//! Show link command

use colored::Colorize;

use crate::cli::CliError;
use crate::services::LinkService;

pub async fn show_link(service: &LinkService, short_code: String) -> Result<(), CliError> {
    let link = service.get(&short_code).await?;

    println!("{} {}", "Code:".bold(), link.code.cyan());
    println!("{} {}", "Target:".bold(), link.target_url.blue().underline());
    println!("{} {}", "Clicks:".bold(), link.click_count.to_string().green());
    println!(
        "{} {}",
        "Created:".bold(),
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    match link.last_accessed {
        Some(at) => println!(
            "{} {}",
            "Last accessed:".bold(),
            at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => println!("{} {}", "Last accessed:".bold(), "never".dimmed()),
    }

    Ok(())
}
