//! Error types for gitpress-git

use std::path::PathBuf;

/// Result type for gitpress-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gitpress-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] gitpress_fs::Error),

    #[error("Not a git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("Repository at {path} has no working directory")]
    Bare { path: PathBuf },
}
