//! Name → presenter factory lookup.

use std::collections::HashMap;

use super::{CommandPresenter, DEFAULT_PRESENTER, Presenter, PresenterHint, StaticPresenter};
use crate::config::keys;
use crate::{Error, Repository, Result};

/// Creates a presenter for a repository.
pub type PresenterFactory = Box<dyn Fn(&Repository) -> Result<Box<dyn Presenter>> + Send + Sync>;

/// Registry of presenters selectable by name.
#[derive(Default)]
pub struct PresenterRegistry {
    factories: HashMap<String, PresenterFactory>,
}

impl std::fmt::Debug for PresenterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenterRegistry")
            .field("presenters", &self.names())
            .finish()
    }
}

impl PresenterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the `static` and `command` presenters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(StaticPresenter::NAME, |_| Ok(Box::new(StaticPresenter)));
        registry.register(CommandPresenter::NAME, |_| Ok(Box::new(CommandPresenter)));
        registry
    }

    /// Register a factory under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Repository) -> Result<Box<dyn Presenter>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Whether a presenter is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered presenter names (sorted).
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Pick the presenter for `repository`.
    ///
    /// An instance hint is returned unchanged. Otherwise the name comes from
    /// the hint, the `presenter` config key, or [`DEFAULT_PRESENTER`].
    pub fn resolve(
        &self,
        repository: &Repository,
        hint: Option<PresenterHint>,
    ) -> Result<Box<dyn Presenter>> {
        let name = match hint {
            Some(PresenterHint::Instance(presenter)) => {
                tracing::debug!(presenter = presenter.name(), "Using supplied presenter");
                return Ok(presenter);
            }
            Some(PresenterHint::Name(name)) => name,
            None => match repository.config().get(keys::PRESENTER) {
                None => DEFAULT_PRESENTER.to_string(),
                Some(value) => value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::ConfigType {
                        key: keys::PRESENTER.to_string(),
                        expected: "string",
                    })?,
            },
        };

        let factory = self
            .factories
            .get(&name)
            .ok_or_else(|| Error::PresenterNotFound { name: name.clone() })?;
        tracing::debug!(presenter = %name, "Resolved presenter");
        factory(repository)
    }
}
