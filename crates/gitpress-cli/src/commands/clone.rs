//! Clone command implementation

use std::path::{Path, PathBuf};

use gitpress_core::Repository;

use crate::error::{CliError, Result};

/// Run the clone command
pub fn run_clone(url: &str, directory: Option<&Path>) -> Result<()> {
    if url.trim().is_empty() {
        return Err(CliError::user("clone URL must not be empty"));
    }
    let target = match directory {
        Some(dir) => dir.to_path_buf(),
        None => PathBuf::from(default_directory(url)),
    };
    Repository::clone(&target, url)?;
    Ok(())
}

/// Last path segment of `url` without a `.git` suffix.
fn default_directory(url: &str) -> &str {
    let name = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(url);
    name.strip_suffix(".git").unwrap_or(name)
}
