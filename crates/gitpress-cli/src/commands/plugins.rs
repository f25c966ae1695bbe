//! Plugin management commands

use colored::Colorize;

use crate::cli::PluginsAction;
use crate::context::Location;
use crate::error::Result;

/// Run a plugins action (defaults to `list`)
pub fn run_plugins(location: &Location, action: Option<PluginsAction>) -> Result<()> {
    let mut repo = location.open()?;

    match action.unwrap_or(PluginsAction::List) {
        PluginsAction::List => {
            let plugins = repo.plugins();
            if plugins.is_empty() {
                println!("{}", "No plugins declared.".dimmed());
            }
            for plugin in plugins {
                println!("  {}", plugin.to_string().cyan());
            }
        }

        PluginsAction::Add { name } => {
            if repo.add_plugin(&name)? {
                println!("{} Plugin {} added.", "OK".green().bold(), name.cyan());
            } else {
                println!(
                    "{} Plugin {} is already declared.",
                    "OK".green().bold(),
                    name.cyan()
                );
            }
        }

        PluginsAction::Remove { name } => {
            if repo.remove_plugin(&name)? {
                println!("{} Plugin {} removed.", "OK".green().bold(), name.cyan());
            } else {
                println!(
                    "{} Plugin {} is not declared.",
                    "warning:".yellow().bold(),
                    name.cyan()
                );
            }
        }
    }

    Ok(())
}
