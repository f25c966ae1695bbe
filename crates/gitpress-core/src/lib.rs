//! Repository orchestration for gitpress
//!
//! This crate ties the lower layers together:
//!
//! - **Path resolution**: pairing a content directory with its metadata directory
//! - **Repository lifecycle**: init from a template, open and validate
//! - **Presenters**: pluggable site builders selected by name
//! - **Plugins and themes**: write-through config management
//! - **Preview**: serving a built site over local HTTP
//!
//! # Architecture
//!
//! ```text
//!                 gitpress-cli
//!                      |
//!                gitpress-core
//!                      |
//!          +-----------+-----------+
//!          |                       |
//!     gitpress-fs            gitpress-git
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gitpress_core::{Repository, Result};
//!
//! fn publish() -> Result<()> {
//!     let mut repo = Repository::init(Some("site".as_ref()), None, None)?;
//!     repo.add_plugin("feed")?;
//!     let out = repo.build(None, true)?;
//!     println!("built into {}", out.display());
//!     Ok(())
//! }
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod paths;
pub mod plugin;
pub mod presenter;
pub mod preview;
pub mod repository;
pub mod template;

pub use build::BuildOrchestrator;
pub use config::Config;
pub use error::{Error, Result};
pub use gitpress_git::CommitInfo;
pub use plugin::PluginRequirement;
pub use presenter::{
    BuildRequest, CommandPresenter, DEFAULT_PRESENTER, Presenter, PresenterHint,
    PresenterRegistry, StaticPresenter,
};
pub use preview::{DEFAULT_HOST, DEFAULT_PORT, PreviewServer};
pub use repository::{InitOptions, Repository};
pub use template::{DEFAULT_TEMPLATE, Template, TemplateResolver, TemplateSource};
