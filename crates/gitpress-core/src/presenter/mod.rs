//! Presenters turn a content directory into a built site.
//!
//! A presenter is selected by name through a [`PresenterRegistry`]. The name
//! comes from an explicit hint or the `presenter` config key, falling back
//! to [`DEFAULT_PRESENTER`]. Two presenters are built in:
//!
//! - `static`: copies content and the active theme's `static/` files
//! - `command`: runs the argv in `build_command`

mod command;
mod registry;
mod static_site;

use std::path::PathBuf;

use gitpress_fs::{GitpressPath, NormalizedPath};

use crate::config::{Config, keys};

pub use command::{CommandPresenter, ENV_CONTENT_DIR, ENV_OUT_DIR, ENV_REPO_DIR};
pub use registry::{PresenterFactory, PresenterRegistry};
pub use static_site::StaticPresenter;

/// Presenter used when neither a hint nor the config names one.
pub const DEFAULT_PRESENTER: &str = "static";

/// A site build engine.
pub trait Presenter: Send + Sync {
    /// Registry name of this presenter.
    fn name(&self) -> &str;

    /// Build the site described by `request` and return the output directory.
    fn build(&self, request: &BuildRequest<'_>) -> crate::Result<PathBuf>;
}

impl<'a> std::fmt::Debug for dyn Presenter + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenter").field("name", &self.name()).finish()
    }
}

/// How the caller wants the presenter chosen.
pub enum PresenterHint {
    /// Look the presenter up in the registry by name
    Name(String),
    /// Use this instance as-is
    Instance(Box<dyn Presenter>),
}

impl From<&str> for PresenterHint {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PresenterHint {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Box<dyn Presenter>> for PresenterHint {
    fn from(presenter: Box<dyn Presenter>) -> Self {
        Self::Instance(presenter)
    }
}

/// Everything a presenter needs to know about one build.
#[derive(Debug, Clone, Copy)]
pub struct BuildRequest<'a> {
    /// Absolute content directory
    pub content_directory: &'a NormalizedPath,
    /// Absolute metadata directory
    pub repo_directory: &'a NormalizedPath,
    /// Repository config at the time of the build
    pub config: &'a Config,
    /// Caller override for the output directory (absolute)
    pub out_directory: Option<&'a NormalizedPath>,
    /// Run the build away from the host's default environment
    pub isolate: bool,
}

impl BuildRequest<'_> {
    /// The directory the site should be written to.
    ///
    /// The caller override wins, then the `out_directory` config key
    /// (relative to the metadata directory), then `<repo>/_site`.
    pub fn output_directory(&self) -> NormalizedPath {
        if let Some(out) = self.out_directory {
            return out.clone();
        }
        let configured = self
            .config
            .get_str(keys::OUT_DIRECTORY)
            .unwrap_or(GitpressPath::OutputDir.as_str());
        NormalizedPath::new(configured).absolutize(self.repo_directory)
    }

    /// The active theme, if one is configured.
    pub fn theme(&self) -> Option<&str> {
        self.config.get_str(keys::THEME)
    }

    /// Directory of the active theme, if one is configured.
    pub fn theme_directory(&self) -> Option<NormalizedPath> {
        self.theme().map(|theme| {
            self.repo_directory
                .join(GitpressPath::ThemesDir.as_str())
                .join(theme)
        })
    }
}
