//! Constants and enums for gitpress filesystem paths.

use std::path::Path;

/// Standard metadata directory markers and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitpressPath {
    /// The `.gitpress` directory (metadata root, relative to the content directory)
    MetadataDir,
    /// The `config.toml` file inside the metadata directory
    ConfigFile,
    /// The `themes` directory inside the metadata directory
    ThemesDir,
    /// The `_site` directory (default build output inside the metadata directory)
    OutputDir,
    /// The `.git` directory (Git database)
    GitDir,
}

impl GitpressPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MetadataDir => ".gitpress",
            Self::ConfigFile => "config.toml",
            Self::ThemesDir => "themes",
            Self::OutputDir => "_site",
            Self::GitDir => ".git",
        }
    }
}

impl AsRef<Path> for GitpressPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for GitpressPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for GitpressPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
