//! Theme management commands

use colored::Colorize;

use crate::cli::ThemesAction;
use crate::context::Location;
use crate::error::Result;

/// Run a themes action (defaults to `list`)
pub fn run_themes(location: &Location, action: Option<ThemesAction>) -> Result<()> {
    let mut repo = location.open()?;

    match action.unwrap_or(ThemesAction::List) {
        ThemesAction::List => {
            let Some(themes) = repo.themes()? else {
                println!("{}", "No themes directory.".dimmed());
                return Ok(());
            };
            let active = repo.active_theme();
            for theme in themes {
                if active.as_deref() == Some(theme.as_str()) {
                    println!("* {}", theme.green().bold());
                } else {
                    println!("  {theme}");
                }
            }
        }

        ThemesAction::Use { name } => {
            if repo.use_theme(&name)? {
                println!("{} Now using theme {}.", "OK".green().bold(), name.cyan());
            } else {
                println!(
                    "{} Theme {} is already active.",
                    "OK".green().bold(),
                    name.cyan()
                );
            }
        }

        ThemesAction::Install { name } => repo.install_theme(&name)?,

        ThemesAction::Uninstall { name } => repo.uninstall_theme(&name)?,
    }

    Ok(())
}
