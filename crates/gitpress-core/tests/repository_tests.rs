//! Integration tests for repository lookup, init, plugins and themes.

use std::path::{Path, PathBuf};

use gitpress_core::{
    BuildRequest, Error, InitOptions, Presenter, PresenterHint, PresenterRegistry, Repository,
    StaticPresenter, TemplateResolver,
};
use gitpress_test_utils::git;
use gitpress_test_utils::site::TestSite;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn open(site: &TestSite) -> Repository {
    Repository::open(Some(&site.repo_dir()), None, None).unwrap()
}

/// Presenter that reports a fixed output directory.
struct FixedOutput(PathBuf);

impl Presenter for FixedOutput {
    fn name(&self) -> &str {
        "fixed"
    }

    fn build(&self, _request: &BuildRequest<'_>) -> gitpress_core::Result<PathBuf> {
        Ok(self.0.clone())
    }
}

/// Presenter that reports where it was asked to write.
struct EchoOutput;

impl Presenter for EchoOutput {
    fn name(&self) -> &str {
        "echo"
    }

    fn build(&self, request: &BuildRequest<'_>) -> gitpress_core::Result<PathBuf> {
        Ok(request.output_directory().to_native())
    }
}

// ==========================================================================
// Lookup
// ==========================================================================

#[test]
fn test_open_missing_directory() {
    let site = TestSite::new();

    let err = Repository::open(Some(&site.repo_dir()), None, None).unwrap_err();
    assert!(matches!(err, Error::RepositoryNotFound { ref path } if path == &site.repo_dir()));
}

#[test]
fn test_open_without_config_is_invalid() {
    let site = TestSite::new();
    site.write_repo_file("themes/default/theme.toml", "");

    let err = Repository::open(Some(&site.repo_dir()), None, None).unwrap_err();
    match err {
        Error::InvalidRepository { path, reason } => {
            assert_eq!(path, site.repo_dir());
            assert!(reason.contains("config.toml"));
        }
        other => panic!("expected InvalidRepository, got {other:?}"),
    }
}

#[test]
fn test_open_resolves_directories() {
    let site = TestSite::with_repository();
    let repo = open(&site);

    assert_eq!(repo.content_directory().to_native(), site.root());
    assert_eq!(repo.directory().to_native(), site.repo_dir());
    assert_eq!(
        repo.config_path().to_native(),
        site.repo_dir().join("config.toml")
    );
    assert_eq!(
        repo.themes_directory().to_native(),
        site.repo_dir().join("themes")
    );
}

#[test]
fn test_from_content_uses_default_metadata_directory() {
    let site = TestSite::with_repository();

    let repo = Repository::from_content(Some(site.root()), None, None).unwrap();
    assert_eq!(repo.directory().to_native(), site.repo_dir());
}

#[test]
fn test_open_rejects_content_directory_as_metadata_directory() {
    let site = TestSite::with_repository();
    site.write_content("config.toml", "theme = \"default\"\n");

    let err = Repository::open(Some(Path::new(".")), Some(site.root()), None).unwrap_err();
    match err {
        Error::InvalidRepository { path, reason } => {
            assert_eq!(path, site.root());
            assert!(reason.contains("content directory"));
        }
        other => panic!("expected InvalidRepository, got {other:?}"),
    }
}

#[test]
fn test_open_malformed_config_propagates() {
    let site = TestSite::with_config("theme = [unclosed\n");

    let err = Repository::open(Some(&site.repo_dir()), None, None).unwrap_err();
    assert!(matches!(err, Error::Fs(_)));
}

#[rstest]
#[case::default(None, "static")]
#[case::named(Some("command"), "command")]
fn test_presenter_resolution(#[case] hint: Option<&str>, #[case] expected: &str) {
    let site = TestSite::with_repository();

    let repo = Repository::open(Some(&site.repo_dir()), None, hint.map(PresenterHint::from))
        .unwrap();
    assert_eq!(repo.presenter().map(|p| p.name()), Some(expected));
}

#[test]
fn test_presenter_from_config() {
    let site = TestSite::with_config("presenter = \"command\"\n");
    assert_eq!(open(&site).presenter().map(|p| p.name()), Some("command"));
}

#[test]
fn test_unknown_presenter() {
    let site = TestSite::with_config("presenter = \"jekyll\"\n");

    let err = Repository::open(Some(&site.repo_dir()), None, None).unwrap_err();
    assert!(matches!(err, Error::PresenterNotFound { ref name } if name == "jekyll"));
}

#[test]
fn test_presenter_key_must_be_string() {
    let site = TestSite::with_config("presenter = 3\n");

    let err = Repository::open(Some(&site.repo_dir()), None, None).unwrap_err();
    assert!(matches!(err, Error::ConfigType { ref key, .. } if key == "presenter"));
}

#[test]
fn test_custom_registry() {
    let site = TestSite::with_config("presenter = \"echo\"\n");
    let mut registry = PresenterRegistry::new();
    registry.register("echo", |_| Ok(Box::new(EchoOutput)));

    let repo = Repository::open_with_registry(Some(&site.repo_dir()), None, None, &registry)
        .unwrap();
    assert_eq!(repo.presenter().map(|p| p.name()), Some("echo"));
}

// ==========================================================================
// Init
// ==========================================================================

#[test]
fn test_init_default_template() {
    let site = TestSite::new();

    let repo = Repository::init(Some(site.root()), None, None).unwrap();

    assert_eq!(repo.directory().to_native(), site.repo_dir());
    assert_eq!(repo.active_theme().as_deref(), Some("default"));
    assert_eq!(
        repo.themes().unwrap(),
        Some(vec!["default".to_string(), "minimal".to_string()])
    );
    assert!(repo.plugins().is_empty());
    site.assert_file_exists(".gitpress/.git");
    assert_eq!(
        git::head_message(&site.repo_dir()).as_deref(),
        Some("Add default presentation content.")
    );
}

#[test]
fn test_init_twice_fails() {
    let site = TestSite::new();
    Repository::init(Some(site.root()), None, None).unwrap();

    let err = Repository::init(Some(site.root()), None, None).unwrap_err();
    match err {
        Error::RepositoryAlreadyExists {
            content_directory,
            directory,
        } => {
            assert_eq!(content_directory, site.root());
            assert_eq!(directory, site.repo_dir());
        }
        other => panic!("expected RepositoryAlreadyExists, got {other:?}"),
    }
    assert_eq!(git::commit_count(&site.repo_dir()), 1);
}

#[test]
fn test_init_over_existing_directory_keeps_it() {
    let site = TestSite::new();
    site.write_repo_file("notes.txt", "keep me");

    let err = Repository::init(Some(site.root()), None, None).unwrap_err();

    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::AlreadyExists));
    site.assert_file_contains(".gitpress/notes.txt", "keep me");
}

#[test]
fn test_init_named_template() {
    let templates = TestSite::new();
    templates.write_content("blog/config.toml", "theme = \"plain\"\n");
    templates.write_content("blog/themes/plain/static/site.css", "body {}\n");
    let site = TestSite::new();

    let options = InitOptions {
        template: Some("blog".into()),
        templates: TemplateResolver::with_search_dir(templates.root()),
        ..InitOptions::default()
    };
    let repo = Repository::init_with(Some(site.root()), None, &options).unwrap();

    assert_eq!(repo.active_theme().as_deref(), Some("plain"));
    assert_eq!(
        git::head_message(&site.repo_dir()).as_deref(),
        Some("Add 'blog' presentation content.")
    );
}

#[test]
fn test_init_template_by_path() {
    let templates = TestSite::new();
    templates.write_content("starter/config.toml", "");
    let site = TestSite::new();
    let path = templates.root().join("starter");

    let options = InitOptions {
        template: Some(path.to_string_lossy().into_owned()),
        ..InitOptions::default()
    };
    Repository::init_with(Some(site.root()), None, &options).unwrap();

    site.assert_file_exists(".gitpress/config.toml");
}

#[test]
fn test_init_unknown_template_creates_nothing() {
    let templates = TestSite::new();
    let site = TestSite::new();

    let options = InitOptions {
        template: Some("missing".into()),
        templates: TemplateResolver::with_search_dir(templates.root()),
        ..InitOptions::default()
    };
    let err = Repository::init_with(Some(site.root()), None, &options).unwrap_err();

    assert!(matches!(err, Error::TemplateNotFound { ref name } if name == "missing"));
    site.assert_file_not_exists(".gitpress");
}

#[test]
fn test_init_failure_after_copy_removes_directory() {
    let templates = TestSite::new();
    templates.write_content("broken/config.toml", "presenter = \"nonexistent\"\n");
    let site = TestSite::new();

    let options = InitOptions {
        template: Some("broken".into()),
        templates: TemplateResolver::with_search_dir(templates.root()),
        ..InitOptions::default()
    };
    let err = Repository::init_with(Some(site.root()), None, &options).unwrap_err();

    assert!(matches!(err, Error::PresenterNotFound { .. }));
    site.assert_file_not_exists(".gitpress");
}

/// A template whose `.git` entry is a plain file, so `git init` fails.
fn template_with_stray_git_file(templates: &TestSite) -> InitOptions {
    templates.write_content("tracked/config.toml", "theme = \"default\"\n");
    templates.write_content("tracked/.git", "not a git directory\n");
    InitOptions {
        template: Some("tracked".into()),
        templates: TemplateResolver::with_search_dir(templates.root()),
        ..InitOptions::default()
    }
}

#[test]
fn test_init_survives_version_control_failure() {
    let templates = TestSite::new();
    let site = TestSite::new();
    let options = template_with_stray_git_file(&templates);

    let repo = Repository::init_with(Some(site.root()), None, &options).unwrap();

    assert_eq!(repo.active_theme().as_deref(), Some("default"));
    site.assert_file_exists(".gitpress/config.toml");
}

#[test]
fn test_init_requiring_commit_fails_and_cleans_up() {
    let templates = TestSite::new();
    let site = TestSite::new();
    let options = InitOptions {
        require_commit: true,
        ..template_with_stray_git_file(&templates)
    };

    let err = Repository::init_with(Some(site.root()), None, &options).unwrap_err();

    assert!(matches!(err, Error::Git(_)), "got {err:?}");
    site.assert_file_not_exists(".gitpress");
}

#[test]
fn test_init_into_content_directory_is_rejected() {
    let site = TestSite::new();

    let err = Repository::init(Some(site.root()), Some(Path::new(".")), None).unwrap_err();

    assert!(matches!(err, Error::InvalidRepository { .. }), "got {err:?}");
    site.assert_file_not_exists("config.toml");
    site.assert_file_not_exists("themes");
}

#[test]
fn test_init_custom_repo_directory() {
    let site = TestSite::new();

    let repo = Repository::init(Some(site.root()), Some(Path::new("meta")), None).unwrap();

    assert_eq!(repo.directory().to_native(), site.root().join("meta"));
    site.assert_file_exists("meta/config.toml");
}

#[test]
fn test_init_inside_git_checkout() {
    let site = TestSite::new();
    git::real_git_repo(site.root());

    Repository::init(Some(site.root()), None, None).unwrap();

    assert_eq!(git::commit_count(&site.repo_dir()), 1);
    assert_eq!(git::head_message(site.root()), None);
}

#[test]
fn test_history_lists_init_commit() {
    let site = TestSite::new();
    let repo = Repository::init(Some(site.root()), None, None).unwrap();

    let history = repo.history(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].message, "Add default presentation content.");
}

#[test]
fn test_history_without_git_fails() {
    let site = TestSite::with_repository();
    assert!(matches!(open(&site).history(5), Err(Error::Git(_))));
}

#[test]
fn test_clone_not_implemented() {
    let site = TestSite::new();
    let err = Repository::clone(site.root(), "https://example.com/site.git").unwrap_err();
    assert!(matches!(err, Error::NotImplemented { operation: "clone" }));
}

// ==========================================================================
// Plugins
// ==========================================================================

#[test]
fn test_add_plugin_twice() {
    let site = TestSite::with_repository();
    let mut repo = open(&site);

    assert!(repo.add_plugin("feed").unwrap());
    assert!(!repo.add_plugin("feed").unwrap());

    let names: Vec<String> = repo.plugins().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["feed"]);
}

#[test]
fn test_plugins_persist() {
    let site = TestSite::with_repository();
    {
        let mut repo = open(&site);
        repo.add_plugin("sitemap").unwrap();
        repo.add_plugin("feed").unwrap();
    }

    let names: Vec<String> = open(&site).plugins().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["feed", "sitemap"]);
    assert!(site.read_repo_file("config.toml").contains("sitemap"));
}

#[test]
fn test_remove_plugin() {
    let site = TestSite::with_config("[plugins.feed]\nversion = \"1.2\"\n");
    let mut repo = open(&site);

    assert_eq!(repo.plugins()[0].version(), Some("1.2"));
    assert!(!repo.remove_plugin("sitemap").unwrap());
    assert!(repo.remove_plugin("feed").unwrap());
    assert!(repo.plugins().is_empty());
    assert!(open(&site).plugins().is_empty());
}

#[test]
fn test_malformed_plugins_entry() {
    let site = TestSite::with_config("plugins = \"feed\"\n");
    let mut repo = open(&site);

    assert!(repo.plugins().is_empty());
    assert!(matches!(
        repo.add_plugin("feed"),
        Err(Error::ConfigType { ref key, .. }) if key == "plugins"
    ));
    assert!(matches!(
        repo.remove_plugin("feed"),
        Err(Error::ConfigType { .. })
    ));
}

#[test]
fn test_plugins_keep_unknown_keys() {
    let site = TestSite::with_config("title = \"Notes\"\n");
    let mut repo = open(&site);

    repo.add_plugin("feed").unwrap();

    assert!(site.read_repo_file("config.toml").contains("title = \"Notes\""));
}

#[test]
fn test_plugins_keep_datetimes() {
    let site = TestSite::with_config("published = 2024-01-02T03:04:05Z\n\n[plugins]\n");
    let mut repo = open(&site);

    repo.add_plugin("feed").unwrap();
    repo.add_plugin("sitemap").unwrap();
    repo.remove_plugin("feed").unwrap();

    let config = site.read_repo_file("config.toml");
    assert!(config.contains("published = 2024-01-02T03:04:05Z"), "{config}");
    assert!(!config.contains("toml_private"), "{config}");
    assert_eq!(
        open(&site).config().get_str("published"),
        Some("2024-01-02T03:04:05Z")
    );
}

// ==========================================================================
// Themes
// ==========================================================================

#[test]
fn test_themes_absent() {
    let site = TestSite::with_repository();
    assert_eq!(open(&site).themes().unwrap(), None);
}

#[test]
fn test_themes_sorted() {
    let site = TestSite::with_repository();
    site.add_theme("zen").add_theme("alpha");
    site.write_repo_file("themes/README", "not a theme");

    assert_eq!(
        open(&site).themes().unwrap(),
        Some(vec!["alpha".to_string(), "zen".to_string()])
    );
}

#[test]
fn test_use_theme() {
    let site = TestSite::with_repository();
    site.add_theme("dark").add_theme("light");
    let mut repo = open(&site);

    assert!(repo.use_theme("dark").unwrap());
    assert!(!repo.use_theme("dark").unwrap());
    assert!(repo.use_theme("light").unwrap());
    assert_eq!(open(&site).active_theme().as_deref(), Some("light"));
}

#[test]
fn test_use_unknown_theme() {
    let site = TestSite::with_repository();
    site.add_theme("dark");
    let mut repo = open(&site);

    let err = repo.use_theme("solarized").unwrap_err();
    assert!(matches!(err, Error::ThemeNotFound { ref name } if name == "solarized"));
    assert_eq!(repo.active_theme(), None);
}

#[test]
fn test_use_theme_without_themes_directory() {
    let site = TestSite::with_repository();
    let mut repo = open(&site);

    assert!(matches!(
        repo.use_theme("default"),
        Err(Error::ThemeNotFound { .. })
    ));
}

#[test]
fn test_theme_install_not_implemented() {
    let site = TestSite::with_repository();
    let mut repo = open(&site);

    assert!(matches!(
        repo.install_theme("dark"),
        Err(Error::NotImplemented { .. })
    ));
    assert!(matches!(
        repo.uninstall_theme("dark"),
        Err(Error::NotImplemented { .. })
    ));
}

// ==========================================================================
// Build delegation
// ==========================================================================

#[test]
fn test_build_returns_presenter_path() {
    let site = TestSite::with_repository();
    let presenter: Box<dyn Presenter> = Box::new(FixedOutput(PathBuf::from("/tmp/out")));
    let repo = Repository::open(Some(&site.repo_dir()), None, Some(presenter.into())).unwrap();

    assert_eq!(repo.build(None, true).unwrap(), PathBuf::from("/tmp/out"));
    assert_eq!(repo.build(None, false).unwrap(), PathBuf::from("/tmp/out"));
}

#[test]
fn test_build_out_directory_resolution() {
    let site = TestSite::with_repository();
    let presenter: Box<dyn Presenter> = Box::new(EchoOutput);
    let repo = Repository::open(Some(&site.repo_dir()), None, Some(presenter.into())).unwrap();

    assert_eq!(repo.build(None, false).unwrap(), site.repo_dir().join("_site"));
    assert_eq!(
        repo.build(Some(Path::new("public")), false).unwrap(),
        site.root().join("public")
    );
    assert_eq!(
        repo.build(Some(Path::new("/srv/www")), false).unwrap(),
        PathBuf::from("/srv/www")
    );
}

#[test]
fn test_build_uses_config_out_directory() {
    let site = TestSite::with_config("out_directory = \"../dist\"\n");
    let presenter: Box<dyn Presenter> = Box::new(EchoOutput);
    let repo = Repository::open(Some(&site.repo_dir()), None, Some(presenter.into())).unwrap();

    assert_eq!(repo.build(None, false).unwrap(), site.root().join("dist"));
}

#[test]
fn test_build_sees_config_edits() {
    let site = TestSite::with_repository();
    let presenter: Box<dyn Presenter> = Box::new(EchoOutput);
    let mut repo =
        Repository::open(Some(&site.repo_dir()), None, Some(presenter.into())).unwrap();

    repo.config_mut().set("out_directory", "public").unwrap();

    assert_eq!(
        repo.build(None, false).unwrap(),
        site.repo_dir().join("public")
    );
    site.assert_file_contains(".gitpress/config.toml", "out_directory = \"public\"");
}

#[test]
fn test_default_presenter_is_static() {
    let site = TestSite::with_repository();
    assert_eq!(
        open(&site).presenter().map(|p| p.name()),
        Some(StaticPresenter::NAME)
    );
}
