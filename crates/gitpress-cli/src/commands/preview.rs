//! Preview command implementation

use colored::Colorize;

use crate::context::Location;
use crate::error::Result;

/// Run the preview command
///
/// Blocks until interrupted.
pub fn run_preview(location: &Location, host: Option<&str>, port: Option<u16>) -> Result<()> {
    let repo = location.open()?;
    println!("{} Building site for preview...", "=>".blue().bold());
    repo.preview(host, port)?;
    Ok(())
}
