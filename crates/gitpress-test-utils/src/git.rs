//! Inspecting the git history a test produced.

use std::path::Path;

/// Message of the commit at HEAD of the repository at `path`.
///
/// Returns `None` when `path` is not a repository or HEAD is unborn.
pub fn head_message(path: &Path) -> Option<String> {
    let repo = git2::Repository::open(path).ok()?;
    let commit = repo.head().ok()?.peel_to_commit().ok()?;
    commit.message().map(str::to_string)
}

/// Number of commits reachable from HEAD (zero for an unborn branch).
///
/// # Panics
/// Panics if `path` is not a git repository.
pub fn commit_count(path: &Path) -> usize {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("commit_count: no repository at {}: {e}", path.display()));
    let Ok(head) = repo.head() else {
        return 0;
    };
    let mut walk = repo.revwalk().unwrap();
    walk.push(head.target().unwrap()).unwrap();
    walk.count()
}

/// Initialises a real git repository using `git2` (no initial commit).
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}
