//! Git abstraction for gitpress
//!
//! The metadata directory of a site is its own git repository. This crate
//! wraps the three operations repository initialization needs (init, stage
//! everything, commit) plus history inspection.

pub mod commits;
pub mod error;
pub mod repository;

pub use commits::CommitInfo;
pub use error::{Error, Result};
pub use repository::GitRepo;
