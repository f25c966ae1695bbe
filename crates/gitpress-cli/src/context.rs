//! Repository location shared by every command.

use std::path::{Path, PathBuf};

use gitpress_core::{PresenterHint, Repository};

use crate::cli::Cli;
use crate::error::Result;

/// Where the repository lives, as given by the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub content_dir: Option<PathBuf>,
    pub repo_dir: Option<PathBuf>,
    pub presenter: Option<String>,
}

impl Location {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            content_dir: cli.content_dir.clone(),
            repo_dir: cli.repo_dir.clone(),
            presenter: cli.presenter.clone(),
        }
    }

    /// Open the repository, applying the `--presenter` override.
    pub fn open(&self) -> Result<Repository> {
        let hint = self.presenter.as_deref().map(PresenterHint::from);
        let repo = Repository::open(self.repo_dir.as_deref(), self.content_dir.as_deref(), hint)?;
        Ok(repo)
    }

    pub fn content_dir(&self) -> Option<&Path> {
        self.content_dir.as_deref()
    }

    pub fn repo_dir(&self) -> Option<&Path> {
        self.repo_dir.as_deref()
    }
}
