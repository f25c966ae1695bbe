//! Error types for gitpress-core

use std::path::PathBuf;

/// Result type for gitpress-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gitpress-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The metadata directory does not exist
    #[error("Repository not found: {path}")]
    RepositoryNotFound { path: PathBuf },

    /// The metadata directory exists but is not a usable repository
    #[error("Invalid repository at {path}: {reason}")]
    InvalidRepository { path: PathBuf, reason: String },

    /// No presenter is registered under the requested name
    #[error("Presenter not found: {name}")]
    PresenterNotFound { name: String },

    /// The requested theme is not installed
    #[error("Theme not found: {name}")]
    ThemeNotFound { name: String },

    /// `init` found a valid repository at the target location
    #[error("Repository already exists at {directory} (content directory {content_directory})")]
    RepositoryAlreadyExists {
        content_directory: PathBuf,
        directory: PathBuf,
    },

    /// No template matches the requested name or path
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// A config key holds a value of the wrong type
    #[error("Config key '{key}' must be a {expected}")]
    ConfigType { key: String, expected: &'static str },

    /// A presenter failed to produce the site
    #[error("Build with presenter '{presenter}' failed: {message}")]
    BuildFailed { presenter: String, message: String },

    /// The preview server could not bind or stopped with an error
    #[error("Preview server failed on {address}: {source}")]
    Serve {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The operation is declared but has no implementation yet
    #[error("{operation} is not implemented")]
    NotImplemented { operation: &'static str },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from gitpress-fs
    #[error(transparent)]
    Fs(#[from] gitpress_fs::Error),

    /// Git error from gitpress-git
    #[error(transparent)]
    Git(#[from] gitpress_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON conversion error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error means "no usable repository lives here".
    ///
    /// `init` checks the target location by opening it; these three kinds
    /// mark the location as free, every other error is a real failure.
    pub fn is_free_location(&self) -> bool {
        matches!(
            self,
            Self::RepositoryNotFound { .. }
                | Self::InvalidRepository { .. }
                | Self::PresenterNotFound { .. }
        )
    }

    /// The underlying I/O error kind, for filesystem and I/O failures.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Fs(e) => e.io_kind(),
            Self::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}
