//! List links command

use colored::Colorize;

use crate::cli::CliError;
use crate::services::LinkService;
use crate::storage::ShortLink;

pub async fn list_links(service: &LinkService) -> Result<(), CliError> {
    let mut pages = service.list();
    let mut total = 0usize;

    while let Some(page) = pages.next_page().await? {
        if total == 0 && !page.is_empty() {
            println!("{}", "Short link list:".bold().green());
            println!();
        }
        for link in &page {
            println!("  {}", format_link_line(link));
        }
        total += page.len();
    }

    if total == 0 {
        println!("{} No short links found", "ℹ".bold().blue());
    } else {
        println!();
        println!(
            "{} Total {} short links",
            "ℹ".bold().blue(),
            total.to_string().green()
        );
    }
    Ok(())
}

fn format_link_line(link: &ShortLink) -> String {
    let mut info_parts = vec![format!(
        "{} -> {}",
        link.code.cyan(),
        link.target_url.blue().underline()
    )];

    if link.click_count > 0 {
        info_parts.push(
            format!("(clicks: {})", link.click_count)
                .dimmed()
                .cyan()
                .to_string(),
        );
    }

    info_parts.join(" ")
}
