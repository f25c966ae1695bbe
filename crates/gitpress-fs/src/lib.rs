//! Filesystem abstraction for gitpress
//!
//! Provides normalized path handling, lexical path cleaning, atomic I/O and
//! config persistence for the metadata directory. TOML files are edited in
//! place through [`TomlDocument`].

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod toml_doc;

pub use config::{ConfigFormat, ConfigStore};
pub use constants::GitpressPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use toml_doc::TomlDocument;
