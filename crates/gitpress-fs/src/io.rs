//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock to prevent concurrent access.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    // Ensure parent directory exists
    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all())
        .map_err(|e| Error::io(&temp_path, e));

    // Lock is released on drop as well; unlock explicitly before rename
    let _ = FileExt::unlock(&temp_file);
    drop(temp_file);

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, &native_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&native_path, e)
    })
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Recursively copy the directory `src` to `dst`.
///
/// `dst` must not exist yet; an existing destination fails with an
/// [`std::io::ErrorKind::AlreadyExists`] I/O error and is left untouched.
/// Symlinks are copied as the files they point to.
pub fn copy_dir_recursive(src: &NormalizedPath, dst: &NormalizedPath) -> Result<()> {
    let src_native = src.to_native();
    let dst_native = dst.to_native();

    if !src_native.is_dir() {
        return Err(Error::io(
            &src_native,
            std::io::Error::new(std::io::ErrorKind::NotFound, "source is not a directory"),
        ));
    }

    if let Some(parent) = dst_native.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    // create_dir (not create_dir_all) so a concurrent creator is detected
    fs::create_dir(&dst_native).map_err(|e| Error::io(&dst_native, e))?;

    copy_contents(&src_native, &dst_native)
}

fn copy_contents(src: &Path, dst: &Path) -> Result<()> {
    let entries = fs::read_dir(src).map_err(|e| Error::io(src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if from.is_dir() {
            fs::create_dir(&to).map_err(|e| Error::io(&to, e))?;
            copy_contents(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| Error::io(&from, e))?;
        }
    }
    Ok(())
}

/// Merge the tree at `src` into `dst`, overwriting files that already exist.
///
/// `skip` is consulted for every entry below `src`; a skipped directory is
/// not descended into. Returns the number of files copied.
pub fn copy_tree_into(src: &Path, dst: &Path, skip: &dyn Fn(&Path) -> bool) -> Result<usize> {
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;

    let mut copied = 0;
    let entries = fs::read_dir(src).map_err(|e| Error::io(src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(src, e))?;
        let from = entry.path();
        if skip(&from) {
            continue;
        }
        let to = dst.join(entry.file_name());

        if from.is_dir() {
            copied += copy_tree_into(&from, &to, skip)?;
        } else {
            fs::copy(&from, &to).map_err(|e| Error::io(&from, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// List the names of the subdirectories of `path`, sorted.
///
/// Returns `Ok(None)` when `path` is not a directory. Entries whose names
/// are not valid UTF-8 are skipped.
pub fn list_subdirectories(path: &NormalizedPath) -> Result<Option<Vec<String>>> {
    let native = path.to_native();
    if !native.is_dir() {
        return Ok(None);
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(&native).map_err(|e| Error::io(&native, e))? {
        let entry = entry.map_err(|e| Error::io(&native, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(Some(names))
}
