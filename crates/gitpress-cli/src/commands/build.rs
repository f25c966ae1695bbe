//! Build command implementation

use std::path::Path;

use colored::Colorize;

use crate::context::Location;
use crate::error::Result;

/// Run the build command
///
/// A relative `out` is taken relative to the current directory.
pub fn run_build(location: &Location, out: Option<&Path>, isolate: bool) -> Result<()> {
    let repo = location.open()?;
    let presenter = repo.presenter().map(|p| p.name().to_string()).unwrap_or_default();
    println!(
        "{} Building with the {} presenter...",
        "=>".blue().bold(),
        presenter.cyan()
    );

    let out = match out {
        Some(out) if out.is_relative() => Some(std::env::current_dir()?.join(out)),
        other => other.map(Path::to_path_buf),
    };
    let built = repo.build(out.as_deref(), isolate)?;

    println!(
        "{} Site built in {}",
        "OK".green().bold(),
        built.display().to_string().cyan()
    );
    Ok(())
}
