//! Repository configuration
//!
//! Each repository owns one [`Config`] handle over `<repo>/config.toml`.
//! The handle reads the file into a JSON-style map and writes every mutation
//! straight back to disk, so there is no unsaved state. TOML files are
//! rewritten one key at a time; everything else in them stays byte for byte.
//!
//! # Known keys
//!
//! | key | type | meaning |
//! |---|---|---|
//! | `plugins` | table | plugin name → options |
//! | `theme` | string | active theme |
//! | `presenter` | string | presenter used when no hint is given |
//! | `out_directory` | string | default build output, relative to the metadata directory |
//! | `build_command` | array of strings | argv for the `command` presenter |
//!
//! Any other key is preserved untouched.

mod handle;
pub mod keys;

pub use handle::Config;
