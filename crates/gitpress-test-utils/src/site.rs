//! [`TestSite`] builder for gitpress test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Config written by [`TestSite::with_repository`].
pub const MINIMAL_CONFIG: &str = "presenter = \"static\"\n\n[plugins]\n";

/// A temporary content directory with helper methods for test setup and
/// assertion.
///
/// # Example
///
/// ```rust,no_run
/// use gitpress_test_utils::site::TestSite;
///
/// let site = TestSite::with_repository();
/// site.add_theme("default");
/// site.write_content("index.html", "<h1>Hello</h1>");
/// site.assert_file_exists(".gitpress/themes/default/static/style.css");
/// ```
pub struct TestSite {
    temp_dir: TempDir,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    /// Create an empty content directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a content directory whose `.gitpress` holds [`MINIMAL_CONFIG`].
    pub fn with_repository() -> Self {
        Self::with_config(MINIMAL_CONFIG)
    }

    /// Create a content directory whose `.gitpress/config.toml` is `config`.
    pub fn with_config(config: &str) -> Self {
        let site = Self::new();
        site.write_repo_file("config.toml", config);
        site
    }

    /// The content directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The default metadata directory, `<root>/.gitpress`.
    pub fn repo_dir(&self) -> PathBuf {
        self.root().join(".gitpress")
    }

    /// Install a theme with a `static/style.css` naming it.
    pub fn add_theme(&self, name: &str) -> &Self {
        self.write_repo_file(
            &format!("themes/{name}/static/style.css"),
            &format!("/* {name} */\n"),
        );
        self
    }

    /// Write a file relative to the content directory.
    pub fn write_content(&self, path: &str, content: &str) -> &Self {
        write_file(&self.root().join(path), content);
        self
    }

    /// Write a file relative to the metadata directory.
    pub fn write_repo_file(&self, path: &str, content: &str) -> &Self {
        write_file(&self.repo_dir().join(path), content);
        self
    }

    /// Read a file relative to the metadata directory.
    pub fn read_repo_file(&self, path: &str) -> String {
        let full_path = self.repo_dir().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Could not read {}: {e}", full_path.display()))
    }

    /// Assert that `path` (relative to the content directory) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the content directory) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to the content directory)
    /// contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Could not create {}: {e}", parent.display()));
    }
    fs::write(path, content).unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
}
