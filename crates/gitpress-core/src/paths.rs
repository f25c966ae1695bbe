//! Content/metadata directory resolution.
//!
//! A site is a pair of directories: the content directory the user edits and
//! the metadata directory (`.gitpress` by default) that holds the config and
//! installed themes. These functions fill in whichever half is missing.

use std::path::Path;

use gitpress_fs::{GitpressPath, NormalizedPath};

use crate::Result;

/// Resolve `(content_directory, repo_directory)` against the process working
/// directory. See [`resolve_from`].
pub fn resolve(
    content_directory: Option<&Path>,
    repo_directory: Option<&Path>,
) -> Result<(NormalizedPath, NormalizedPath)> {
    let cwd = NormalizedPath::new(std::env::current_dir()?);
    Ok(resolve_from(&cwd, content_directory, repo_directory))
}

/// Resolve `(content_directory, repo_directory)` relative to `cwd`.
///
/// - Only `repo_directory` given: the content directory is its parent.
/// - Otherwise the content directory defaults to `cwd` and the metadata
///   directory to `.gitpress` inside it; a relative `repo_directory` is taken
///   relative to the content directory.
///
/// Both results are absolute and lexically cleaned. Pure: the filesystem is
/// never consulted.
pub fn resolve_from(
    cwd: &NormalizedPath,
    content_directory: Option<&Path>,
    repo_directory: Option<&Path>,
) -> (NormalizedPath, NormalizedPath) {
    if let (None, Some(repo)) = (content_directory, repo_directory) {
        let repo = NormalizedPath::new(repo).absolutize(cwd);
        let content = repo.join("..").clean();
        return (content, repo);
    }

    let content = content_directory
        .map(NormalizedPath::new)
        .unwrap_or_else(|| cwd.clone())
        .absolutize(cwd);
    let repo = repo_directory
        .map(NormalizedPath::new)
        .unwrap_or_else(|| NormalizedPath::new(GitpressPath::MetadataDir.as_str()))
        .absolutize(&content);
    (content, repo)
}
