//! Skeletons used to initialize a new metadata directory.
//!
//! The `default` template ships inside the binary. Other templates are
//! directories, found either by explicit path or by name under the user's
//! template search directory (`<config_dir>/gitpress/templates/<name>`).

use std::fs;
use std::path::{Path, PathBuf};

use gitpress_fs::NormalizedPath;
use gitpress_fs::io::{copy_dir_recursive, write_text};

use crate::{Error, Result};

/// Name of the bundled template.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Files of the bundled template, relative to the metadata directory.
const BUNDLED_FILES: &[(&str, &str)] = &[
    (
        "config.toml",
        include_str!("../templates/default/config.toml"),
    ),
    (".gitignore", include_str!("../templates/default/.gitignore")),
    (
        "themes/default/theme.toml",
        include_str!("../templates/default/themes/default/theme.toml"),
    ),
    (
        "themes/default/static/style.css",
        include_str!("../templates/default/themes/default/static/style.css"),
    ),
    (
        "themes/minimal/theme.toml",
        include_str!("../templates/default/themes/minimal/theme.toml"),
    ),
    (
        "themes/minimal/static/style.css",
        include_str!("../templates/default/themes/minimal/static/style.css"),
    ),
];

/// Where a template's files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compiled into the binary
    Bundled,
    /// A directory on disk
    Directory(NormalizedPath),
}

/// A resolved template, ready to be copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    source: TemplateSource,
}

impl Template {
    /// The bundled default template.
    pub fn bundled() -> Self {
        Self {
            name: DEFAULT_TEMPLATE.to_string(),
            source: TemplateSource::Bundled,
        }
    }

    /// The name or path the template was requested by.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Whether this is the bundled default template.
    pub fn is_default(&self) -> bool {
        self.source == TemplateSource::Bundled
    }

    /// Commit message recorded after the template is copied.
    pub fn commit_message(&self) -> String {
        if self.is_default() {
            "Add default presentation content.".to_string()
        } else {
            format!("Add '{}' presentation content.", self.name)
        }
    }

    /// Copy the template into `destination`, which must not exist yet.
    ///
    /// An existing destination fails with an `AlreadyExists` I/O error and
    /// is left untouched.
    pub fn copy_to(&self, destination: &NormalizedPath) -> Result<()> {
        match &self.source {
            TemplateSource::Directory(path) => copy_dir_recursive(path, destination)?,
            TemplateSource::Bundled => write_bundled(destination)?,
        }
        tracing::debug!(template = %self.name, destination = %destination, "Copied template");
        Ok(())
    }
}

fn write_bundled(destination: &NormalizedPath) -> gitpress_fs::Result<()> {
    let native = destination.to_native();
    if let Some(parent) = native.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| gitpress_fs::Error::io(parent, e))?;
    }
    fs::create_dir(&native).map_err(|e| gitpress_fs::Error::io(&native, e))?;

    for (relative, content) in BUNDLED_FILES {
        let target = destination.join(relative);
        if let Some(parent) = target.parent() {
            let parent = parent.to_native();
            fs::create_dir_all(&parent).map_err(|e| gitpress_fs::Error::io(&parent, e))?;
        }
        write_text(&target, content)?;
    }
    Ok(())
}

/// Maps a template name or path to a [`Template`].
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    search_dir: Option<PathBuf>,
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateResolver {
    /// A resolver searching the user's config directory.
    pub fn new() -> Self {
        Self {
            search_dir: dirs::config_dir().map(|dir| dir.join("gitpress").join("templates")),
        }
    }

    /// A resolver searching `dir` for named templates.
    pub fn with_search_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dir: Some(dir.into()),
        }
    }

    /// Resolve `template`.
    ///
    /// `None` and `"default"` select the bundled template. A value that
    /// looks like a path must name an existing directory; a bare name is
    /// looked up in the search directory.
    pub fn resolve(&self, template: Option<&str>) -> Result<Template> {
        let name = match template {
            None | Some(DEFAULT_TEMPLATE) => return Ok(Template::bundled()),
            Some(name) => name,
        };

        let not_found = || Error::TemplateNotFound {
            name: name.to_string(),
        };

        let directory = if looks_like_path(name) {
            let path = Path::new(name);
            if !path.is_dir() {
                return Err(not_found());
            }
            let cwd = std::env::current_dir()?;
            NormalizedPath::new(path)
                .absolutize(&NormalizedPath::new(cwd))
                .clean()
        } else {
            let candidate = self
                .search_dir
                .as_ref()
                .map(|dir| dir.join(name))
                .filter(|dir| dir.is_dir())
                .ok_or_else(not_found)?;
            NormalizedPath::new(candidate)
        };

        tracing::debug!(template = name, source = %directory, "Resolved template");
        Ok(Template {
            name: name.to_string(),
            source: TemplateSource::Directory(directory),
        })
    }
}

fn looks_like_path(name: &str) -> bool {
    name.contains('/') || name.contains('\\') || name.starts_with('.') || Path::new(name).is_absolute()
}
