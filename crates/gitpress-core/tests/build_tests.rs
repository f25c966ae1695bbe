//! Tests for the built-in presenters.

use std::fs;
use std::path::Path;

use gitpress_core::{Error, Repository};
use gitpress_test_utils::site::TestSite;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn open(site: &TestSite) -> Repository {
    Repository::open(Some(&site.repo_dir()), None, None).unwrap()
}

fn themed_site() -> TestSite {
    let site = TestSite::with_config("theme = \"default\"\n");
    site.add_theme("default");
    site.write_content("index.html", "<h1>Home</h1>\n");
    site.write_content("posts/first.html", "<p>First</p>\n");
    site
}

// ==========================================================================
// Static presenter
// ==========================================================================

#[rstest]
#[case::isolated(true)]
#[case::in_place(false)]
fn test_static_build_default_output(#[case] isolate: bool) {
    let site = themed_site();

    let out = open(&site).build(None, isolate).unwrap();

    assert_eq!(out, site.repo_dir().join("_site"));
    site.assert_file_contains(".gitpress/_site/index.html", "Home");
    site.assert_file_exists(".gitpress/_site/posts/first.html");
    site.assert_file_contains(".gitpress/_site/style.css", "default");
    site.assert_file_not_exists(".gitpress/_site/.gitpress");
}

#[test]
fn test_static_build_skips_dot_entries() {
    let site = themed_site();
    site.write_content(".git/HEAD", "ref: refs/heads/main\n");
    site.write_content(".env", "SECRET=1\n");

    let out = open(&site).build(None, false).unwrap();

    assert!(!out.join(".git").exists());
    assert!(!out.join(".env").exists());
}

#[test]
fn test_content_overrides_theme_files() {
    let site = themed_site();
    site.write_content("style.css", "/* site */\n");

    let out = open(&site).build(None, true).unwrap();

    assert_eq!(fs::read_to_string(out.join("style.css")).unwrap(), "/* site */\n");
}

#[rstest]
#[case::isolated(true)]
#[case::in_place(false)]
fn test_stale_output_is_replaced(#[case] isolate: bool) {
    let site = themed_site();
    site.write_repo_file("_site/stale.html", "old");

    let out = open(&site).build(None, isolate).unwrap();

    assert!(!out.join("stale.html").exists());
    assert!(out.join("index.html").exists());
}

#[test]
fn test_isolated_build_leaves_no_staging() {
    let site = themed_site();

    open(&site).build(None, true).unwrap();

    let leftovers: Vec<_> = fs::read_dir(site.repo_dir())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".gitpress-build"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_output_inside_content_is_not_copied_into_itself() {
    let site = themed_site();

    let repo = open(&site);
    repo.build(Some(Path::new("public")), false).unwrap();
    let out = repo.build(Some(Path::new("public")), false).unwrap();

    assert_eq!(out, site.root().join("public"));
    assert!(!out.join("public").exists());
    assert!(out.join("index.html").exists());
}

#[test]
fn test_missing_theme_still_builds_content() {
    let site = TestSite::with_config("theme = \"gone\"\n");
    site.write_content("index.html", "hi");

    let out = open(&site).build(None, false).unwrap();

    assert!(out.join("index.html").exists());
    assert!(!out.join("style.css").exists());
}

#[rstest]
#[case::content(".")]
#[case::parent("..")]
#[case::metadata(".gitpress")]
fn test_refuses_to_overwrite_sources(#[case] out: &str) {
    let site = themed_site();

    let err = open(&site).build(Some(Path::new(out)), false).unwrap_err();

    assert!(matches!(err, Error::BuildFailed { ref presenter, .. } if presenter == "static"));
    site.assert_file_exists("index.html");
    site.assert_file_exists(".gitpress/config.toml");
}

// ==========================================================================
// Command presenter
// ==========================================================================

#[test]
fn test_command_requires_build_command() {
    let site = TestSite::with_config("presenter = \"command\"\n");

    let err = open(&site).build(None, false).unwrap_err();

    match err {
        Error::BuildFailed { presenter, message } => {
            assert_eq!(presenter, "command");
            assert!(message.contains("build_command"));
        }
        other => panic!("expected BuildFailed, got {other:?}"),
    }
}

#[test]
fn test_command_rejects_non_list_build_command() {
    let site = TestSite::with_config("presenter = \"command\"\nbuild_command = \"make\"\n");

    let err = open(&site).build(None, false).unwrap_err();
    assert!(matches!(err, Error::ConfigType { ref key, .. } if key == "build_command"));
}

#[cfg(unix)]
#[test]
fn test_command_writes_into_out_dir() {
    let site = TestSite::with_config(
        "presenter = \"command\"\n\
         build_command = [\"sh\", \"-c\", \"cp index.md \\\"$GITPRESS_OUT_DIR/index.html\\\"\"]\n",
    );
    site.write_content("index.md", "# Hello\n");

    let out = open(&site).build(Some(Path::new("dist")), false).unwrap();

    assert_eq!(out, site.root().join("dist"));
    site.assert_file_contains("dist/index.html", "# Hello");
}

#[cfg(unix)]
#[test]
fn test_command_failure_reports_status() {
    let site = TestSite::with_config(
        "presenter = \"command\"\n\
         build_command = [\"sh\", \"-c\", \"echo broken >&2; exit 3\"]\n",
    );

    let err = open(&site).build(None, false).unwrap_err();

    match err {
        Error::BuildFailed { message, .. } => {
            assert!(message.contains("status 3"), "{message}");
            assert!(message.contains("broken"), "{message}");
        }
        other => panic!("expected BuildFailed, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_command_isolation_clears_environment() {
    let site = TestSite::with_config(
        "presenter = \"command\"\n\
         build_command = [\"sh\", \"-c\", \"env > \\\"$GITPRESS_OUT_DIR/env.txt\\\"\"]\n",
    );

    let out = open(&site).build(None, true).unwrap();

    let env = fs::read_to_string(out.join("env.txt")).unwrap();
    assert!(env.contains("GITPRESS_OUT_DIR="));
    assert!(env.contains("GITPRESS_CONTENT_DIR="));
    assert!(env.contains("GITPRESS_REPO_DIR="));
    assert!(!env.contains("CARGO_MANIFEST_DIR="));
}

#[test]
fn test_command_missing_program() {
    let site = TestSite::with_config(
        "presenter = \"command\"\nbuild_command = [\"gitpress-no-such-program\"]\n",
    );

    let err = open(&site).build(None, false).unwrap_err();
    assert!(matches!(err, Error::BuildFailed { .. }));
}
