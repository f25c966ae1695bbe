//! A git repository rooted at a gitpress metadata directory.

use git2::{IndexAddOption, Oid, Repository, Signature};
use gitpress_fs::NormalizedPath;

use crate::{Error, Result};

/// Identity used for commits when the user has no git identity configured.
const FALLBACK_NAME: &str = "gitpress";
const FALLBACK_EMAIL: &str = "gitpress@localhost";

/// A non-bare git repository whose working directory is `root`.
pub struct GitRepo {
    repo: Repository,
    root: NormalizedPath,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo").field("root", &self.root).finish()
    }
}

impl GitRepo {
    /// Initialize a new repository at `path` (`git init`).
    ///
    /// Re-initializing an existing repository is harmless, as with the CLI.
    pub fn init(path: &NormalizedPath) -> Result<Self> {
        let repo = Repository::init(path.to_native())?;
        tracing::debug!(path = %path, "Initialized git repository");
        Ok(Self {
            repo,
            root: path.clone(),
        })
    }

    /// Open the repository whose working directory is exactly `path`.
    pub fn open(path: &NormalizedPath) -> Result<Self> {
        let repo = Repository::open(path.to_native()).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::NotARepository {
                    path: path.to_native(),
                }
            } else {
                Error::Git(e)
            }
        })?;
        if repo.is_bare() {
            return Err(Error::Bare {
                path: path.to_native(),
            });
        }
        Ok(Self {
            repo,
            root: path.clone(),
        })
    }

    /// The working directory of this repository.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Access the underlying `git2` repository.
    pub fn inner(&self) -> &Repository {
        &self.repo
    }

    /// Stage every file in the working directory (`git add .`).
    pub fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.write()?;
        Ok(())
    }

    /// Commit the current index onto HEAD (`git commit -m`).
    ///
    /// Works for the very first commit of an unborn branch.
    pub fn commit(&self, message: &str) -> Result<Oid> {
        let signature = self.signature()?;
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                None
            }
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        tracing::debug!(root = %self.root, commit = %oid, "Created commit");
        Ok(oid)
    }

    fn signature(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(sig) => Ok(sig.to_owned()),
            Err(e) => {
                tracing::debug!(error = %e, "No git identity configured, using fallback");
                Ok(Signature::now(FALLBACK_NAME, FALLBACK_EMAIL)?)
            }
        }
    }
}
