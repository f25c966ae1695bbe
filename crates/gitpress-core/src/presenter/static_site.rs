//! Built-in presenter that publishes content files as-is.

use std::fs;
use std::path::{Path, PathBuf};

use gitpress_fs::NormalizedPath;
use gitpress_fs::io::copy_tree_into;

use super::{BuildRequest, Presenter};
use crate::{Error, Result};

const THEME_STATIC_DIR: &str = "static";
const STAGING_PREFIX: &str = ".gitpress-build-";

/// Copies the content directory, layered over the active theme's
/// `static/` directory, into the output directory.
///
/// Dot entries, the metadata directory and the output directory itself are
/// never copied. Any existing output is replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPresenter;

impl StaticPresenter {
    pub const NAME: &'static str = "static";
}

impl Presenter for StaticPresenter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn build(&self, request: &BuildRequest<'_>) -> Result<PathBuf> {
        let out = request.output_directory();
        check_output_location(&out, request)?;

        let out_native = out.to_native();
        if request.isolate {
            let parent = out
                .parent()
                .map(|p| p.to_native())
                .ok_or_else(|| failure(format!("output directory {out} has no parent")))?;
            fs::create_dir_all(&parent)?;
            let staging = tempfile::Builder::new()
                .prefix(STAGING_PREFIX)
                .tempdir_in(&parent)?;
            let site = staging.path().join("site");
            let files = render(request, &site, &out_native)?;
            replace_dir(&site, &out_native)?;
            tracing::debug!(out = %out, files, "Published isolated build");
        } else {
            remove_dir_if_present(&out_native)?;
            let files = render(request, &out_native, &out_native)?;
            tracing::debug!(out = %out, files, "Published build");
        }

        Ok(out_native)
    }
}

/// Write the site into `target`, returning the number of files copied.
///
/// `final_out` is where the site ends up and is excluded from the copy.
fn render(request: &BuildRequest<'_>, target: &Path, final_out: &Path) -> Result<usize> {
    fs::create_dir_all(target)?;
    let mut files = 0;

    if let Some(theme_dir) = request.theme_directory() {
        let theme_static = theme_dir.join(THEME_STATIC_DIR).to_native();
        if theme_static.is_dir() {
            files += copy_tree_into(&theme_static, target, &|_| false)?;
        } else {
            tracing::debug!(theme = ?request.theme(), "Theme has no static directory");
        }
    }

    let repo_native = request.repo_directory.to_native();
    let skip = |path: &Path| {
        is_dot_entry(path) || path == repo_native || path == final_out || path == target
    };
    files += copy_tree_into(&request.content_directory.to_native(), target, &skip)?;
    Ok(files)
}

/// Refuse output directories that would swallow the sources on cleanup.
fn check_output_location(out: &NormalizedPath, request: &BuildRequest<'_>) -> Result<()> {
    let out_path = Path::new(out.as_str());
    for protected in [request.content_directory, request.repo_directory] {
        if Path::new(protected.as_str()).starts_with(out_path) {
            return Err(failure(format!(
                "output directory {out} would overwrite {protected}"
            )));
        }
    }
    Ok(())
}

fn replace_dir(from: &Path, to: &Path) -> Result<()> {
    remove_dir_if_present(to)?;
    fs::rename(from, to)?;
    Ok(())
}

fn remove_dir_if_present(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn is_dot_entry(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn failure(message: String) -> Error {
    Error::BuildFailed {
        presenter: StaticPresenter::NAME.to_string(),
        message,
    }
}
