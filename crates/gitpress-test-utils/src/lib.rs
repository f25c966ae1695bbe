//! Shared test utilities for the gitpress workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`site`]: [`site::TestSite`] builder for a content directory with a metadata directory
//! - [`git`]: inspecting the history a test produced

pub mod git;
pub mod site;
