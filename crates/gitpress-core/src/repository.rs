//! The repository aggregate.
//!
//! A [`Repository`] ties a content directory to its metadata directory,
//! the config loaded from it and the presenter that builds the site.

use std::fs;
use std::path::{Path, PathBuf};

use gitpress_fs::io::list_subdirectories;
use gitpress_fs::{GitpressPath, NormalizedPath};
use gitpress_git::{CommitInfo, GitRepo};
use serde_json::{Map, Value};

use crate::build::BuildOrchestrator;
use crate::config::{Config, keys};
use crate::plugin::PluginRequirement;
use crate::presenter::{BuildRequest, Presenter, PresenterHint, PresenterRegistry};
use crate::preview::PreviewServer;
use crate::template::{Template, TemplateResolver};
use crate::{Error, Result, paths};

/// Options for [`Repository::init_with`].
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Template name or path; `None` selects the bundled default
    pub template: Option<String>,
    /// Treat a failed initial commit as an error instead of a warning
    pub require_commit: bool,
    /// Where named templates are looked up
    pub templates: TemplateResolver,
}

/// A gitpress repository and the site it manages.
#[derive(Debug)]
pub struct Repository {
    directory: NormalizedPath,
    content_directory: NormalizedPath,
    config: Config,
    presenter: Option<Box<dyn Presenter>>,
}

impl Repository {
    /// Open the repository at `directory` (the metadata directory).
    ///
    /// Paths are resolved as in [`paths::resolve`]. Fails with
    /// [`Error::RepositoryNotFound`] when the directory is missing,
    /// [`Error::InvalidRepository`] when it has no config file and
    /// [`Error::PresenterNotFound`] when the presenter cannot be resolved.
    pub fn open(
        directory: Option<&Path>,
        content_directory: Option<&Path>,
        presenter: Option<PresenterHint>,
    ) -> Result<Self> {
        Self::open_with_registry(
            directory,
            content_directory,
            presenter,
            &PresenterRegistry::with_builtins(),
        )
    }

    /// Open the repository of `content_directory` (defaults to `.`).
    pub fn from_content(
        content_directory: Option<&Path>,
        repo_directory: Option<&Path>,
        presenter: Option<PresenterHint>,
    ) -> Result<Self> {
        let content_directory = content_directory.unwrap_or(Path::new("."));
        Self::open(repo_directory, Some(content_directory), presenter)
    }

    /// [`Repository::open`] with a caller-supplied presenter registry.
    pub fn open_with_registry(
        directory: Option<&Path>,
        content_directory: Option<&Path>,
        presenter: Option<PresenterHint>,
        registry: &PresenterRegistry,
    ) -> Result<Self> {
        let (content_directory, directory) = paths::resolve(content_directory, directory)?;
        ensure_separate(&content_directory, &directory)?;
        let config_path = directory.join(GitpressPath::ConfigFile.as_str());

        if !directory.is_dir() {
            return Err(Error::RepositoryNotFound {
                path: directory.to_native(),
            });
        }
        if !config_path.is_file() {
            return Err(Error::InvalidRepository {
                path: directory.to_native(),
                reason: format!("config file not found: {config_path}"),
            });
        }

        let config = Config::load(&config_path)?;
        let mut repository = Self {
            directory,
            content_directory,
            config,
            presenter: None,
        };
        repository.presenter = Some(registry.resolve(&repository, presenter)?);

        tracing::debug!(
            directory = %repository.directory,
            content = %repository.content_directory,
            "Opened repository"
        );
        Ok(repository)
    }

    /// Create a repository from the bundled or named template.
    pub fn init(
        content_directory: Option<&Path>,
        repo_directory: Option<&Path>,
        template: Option<&str>,
    ) -> Result<Self> {
        let options = InitOptions {
            template: template.map(str::to_string),
            ..InitOptions::default()
        };
        Self::init_with(content_directory, repo_directory, &options)
    }

    /// Create a repository.
    ///
    /// Fails with [`Error::RepositoryAlreadyExists`] when a valid
    /// repository is already at the location. If any step after the
    /// template copy fails, the new metadata directory is removed again.
    /// A directory that existed before the call is never removed.
    ///
    /// Version control is best effort unless
    /// [`InitOptions::require_commit`] is set.
    pub fn init_with(
        content_directory: Option<&Path>,
        repo_directory: Option<&Path>,
        options: &InitOptions,
    ) -> Result<Self> {
        let (content, repo) = paths::resolve(content_directory, repo_directory)?;
        ensure_separate(&content, &repo)?;
        let content_native = content.to_native();
        let repo_native = repo.to_native();

        match Self::open(Some(&repo_native), Some(&content_native), None) {
            Ok(_) => {
                return Err(Error::RepositoryAlreadyExists {
                    content_directory: content_native,
                    directory: repo_native,
                });
            }
            Err(e) if e.is_free_location() => {
                tracing::debug!(reason = %e, "Location is free");
            }
            Err(e) => return Err(e),
        }

        let template = options.templates.resolve(options.template.as_deref())?;

        let mut guard = CreatedDir::new(repo_native.clone());
        if let Err(e) = template.copy_to(&repo) {
            if e.io_kind() == Some(std::io::ErrorKind::AlreadyExists) {
                guard.disarm();
            }
            return Err(e);
        }

        if let Err(e) = record_template(&repo, &template) {
            if options.require_commit {
                return Err(e.into());
            }
            tracing::warn!(directory = %repo, error = %e, "Could not record initial commit");
        }

        let repository = Self::open(Some(&repo_native), Some(&content_native), None)?;
        guard.disarm();
        tracing::info!(
            directory = %repository.directory,
            template = template.name(),
            "Initialized repository"
        );
        Ok(repository)
    }

    /// Clone a remote repository into `content_directory`.
    pub fn clone(_content_directory: &Path, _url: &str) -> Result<Self> {
        Err(Error::NotImplemented { operation: "clone" })
    }

    /// Absolute metadata directory.
    pub fn directory(&self) -> &NormalizedPath {
        &self.directory
    }

    /// Absolute content directory.
    pub fn content_directory(&self) -> &NormalizedPath {
        &self.content_directory
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn config_path(&self) -> &NormalizedPath {
        self.config.path()
    }

    pub fn themes_directory(&self) -> NormalizedPath {
        self.directory.join(GitpressPath::ThemesDir.as_str())
    }

    /// The resolved presenter.
    pub fn presenter(&self) -> Option<&dyn Presenter> {
        self.presenter.as_deref()
    }

    /// Build the site and return the output directory.
    ///
    /// A relative `out_directory` is taken relative to the content
    /// directory. The presenter's result is returned unchanged.
    pub fn build(&self, out_directory: Option<&Path>, isolate: bool) -> Result<PathBuf> {
        let presenter = self.presenter().ok_or_else(|| Error::PresenterNotFound {
            name: "<unresolved>".to_string(),
        })?;
        let out = out_directory.map(|out| NormalizedPath::new(out).absolutize(&self.content_directory));
        let request = BuildRequest {
            content_directory: &self.content_directory,
            repo_directory: &self.directory,
            config: &self.config,
            out_directory: out.as_ref(),
            isolate,
        };
        BuildOrchestrator::new(presenter).run(&request)
    }

    /// Build with defaults and serve the result until interrupted.
    pub fn preview(&self, host: Option<&str>, port: Option<u16>) -> Result<()> {
        let out = self.build(None, true)?;
        PreviewServer::new(out, host, port).serve()
    }

    /// Declared plugins, sorted by name.
    ///
    /// A missing or malformed `plugins` entry reads as no plugins.
    pub fn plugins(&self) -> Vec<PluginRequirement> {
        let mut plugins: Vec<PluginRequirement> = self
            .config
            .get_table_lenient(keys::PLUGINS)
            .iter()
            .map(|(name, value)| PluginRequirement::from_config(name, value))
            .collect();
        plugins.sort_by(|a, b| a.name.cmp(&b.name));
        plugins
    }

    /// Declare `name` as a plugin. Returns `false` if it already was.
    pub fn add_plugin(&mut self, name: &str) -> Result<bool> {
        let mut plugins = self.config.get_table(keys::PLUGINS)?;
        if plugins.contains_key(name) {
            return Ok(false);
        }
        plugins.insert(
            name.to_string(),
            PluginRequirement::new(name).to_value(),
        );
        self.config.set(keys::PLUGINS, Value::Object(plugins))?;
        tracing::info!(plugin = name, "Added plugin");
        Ok(true)
    }

    /// Remove the plugin `name`. Returns `false` if it was not declared.
    pub fn remove_plugin(&mut self, name: &str) -> Result<bool> {
        let mut plugins: Map<String, Value> = self.config.get_table(keys::PLUGINS)?;
        if plugins.remove(name).is_none() {
            return Ok(false);
        }
        self.config.set(keys::PLUGINS, Value::Object(plugins))?;
        tracing::info!(plugin = name, "Removed plugin");
        Ok(true)
    }

    /// Installed theme names, sorted; `None` without a themes directory.
    pub fn themes(&self) -> Result<Option<Vec<String>>> {
        Ok(list_subdirectories(&self.themes_directory())?)
    }

    /// The active theme, if set.
    pub fn active_theme(&self) -> Option<String> {
        self.config.get_str(keys::THEME).map(str::to_string)
    }

    /// Switch to the installed theme `name`.
    ///
    /// Returns `false` without writing when `name` is already active.
    pub fn use_theme(&mut self, name: &str) -> Result<bool> {
        let installed = self.themes()?.unwrap_or_default();
        if !installed.iter().any(|theme| theme == name) {
            return Err(Error::ThemeNotFound {
                name: name.to_string(),
            });
        }
        if self.config.get_str(keys::THEME) == Some(name) {
            return Ok(false);
        }
        self.config.set(keys::THEME, name)?;
        tracing::info!(theme = name, "Switched theme");
        Ok(true)
    }

    pub fn install_theme(&mut self, _name: &str) -> Result<()> {
        Err(Error::NotImplemented {
            operation: "install_theme",
        })
    }

    pub fn uninstall_theme(&mut self, _name: &str) -> Result<()> {
        Err(Error::NotImplemented {
            operation: "uninstall_theme",
        })
    }

    /// The most recent commits of the metadata directory, newest first.
    pub fn history(&self, max_count: usize) -> Result<Vec<CommitInfo>> {
        let git = GitRepo::open(&self.directory)?;
        Ok(git.recent_commits(max_count)?)
    }
}

/// The metadata directory may not be the content directory itself.
fn ensure_separate(content: &NormalizedPath, directory: &NormalizedPath) -> Result<()> {
    if content == directory {
        return Err(Error::InvalidRepository {
            path: directory.to_native(),
            reason: "metadata directory must differ from the content directory".to_string(),
        });
    }
    Ok(())
}

/// Initialize version control in `repo` and commit the template files.
fn record_template(repo: &NormalizedPath, template: &Template) -> gitpress_git::Result<()> {
    let git = GitRepo::init(repo)?;
    git.stage_all()?;
    git.commit(&template.commit_message())?;
    Ok(())
}

/// Removes a directory created by `init` unless disarmed.
struct CreatedDir {
    path: PathBuf,
    armed: bool,
}

impl CreatedDir {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for CreatedDir {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match fs::remove_dir_all(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed partial repository"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove partial repository")
            }
        }
    }
}
