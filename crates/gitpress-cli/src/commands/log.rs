//! Log command implementation

use colored::Colorize;

use crate::context::Location;
use crate::error::Result;

/// Run the log command
pub fn run_log(location: &Location, count: usize) -> Result<()> {
    let repo = location.open()?;
    let commits = repo.history(count)?;

    if commits.is_empty() {
        println!("{}", "No commits yet.".dimmed());
        return Ok(());
    }
    for commit in commits {
        println!(
            "{} {} {}",
            commit.hash.yellow(),
            commit.timestamp.format("%Y-%m-%d %H:%M"),
            commit.message
        );
    }
    Ok(())
}
