//! Init command implementation

use std::path::Path;

use colored::Colorize;
use gitpress_core::{InitOptions, Repository};

use crate::error::Result;

/// Run the init command
///
/// Creates the metadata directory from `template` and records it in git.
pub fn run_init(
    content_dir: Option<&Path>,
    repo_dir: Option<&Path>,
    template: Option<&str>,
    require_commit: bool,
) -> Result<()> {
    println!(
        "{} Initializing repository from the {} template...",
        "=>".blue().bold(),
        template.unwrap_or("default").cyan()
    );

    let options = InitOptions {
        template: template.map(str::to_string),
        require_commit,
        ..InitOptions::default()
    };
    let repo = Repository::init_with(content_dir, repo_dir, &options)?;

    println!(
        "{} Repository initialized in {}",
        "OK".green().bold(),
        repo.directory().as_str().cyan()
    );
    if let Some(theme) = repo.active_theme() {
        println!("   Theme: {}", theme.yellow());
    }
    Ok(())
}
