//! gitpress CLI
//!
//! The command-line interface for managing, building and previewing a
//! gitpress content repository.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use context::Location;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let location = Location::from_cli(&cli);
    match cli.command {
        Some(cmd) => execute_command(cmd, &location),
        None => {
            println!("{} Content repository manager", "gitpress".green().bold());
            println!();
            println!("Run {} for available commands.", "gitpress --help".cyan());
            Ok(())
        }
    }
}

/// DEBUG to stderr with `--verbose`, otherwise `RUST_LOG` (default `warn`).
fn init_tracing(verbose: bool) {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    if let Err(e) = result {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(cmd: Commands, location: &Location) -> Result<()> {
    match cmd {
        Commands::Init {
            directory,
            template,
            require_commit,
        } => commands::run_init(
            directory.as_deref().or(location.content_dir()),
            location.repo_dir(),
            template.as_deref(),
            require_commit,
        ),
        Commands::Build { out, no_isolate } => {
            commands::run_build(location, out.as_deref(), !no_isolate)
        }
        Commands::Preview { host, port } => {
            commands::run_preview(location, host.as_deref(), port)
        }
        Commands::Plugins { action } => commands::run_plugins(location, action),
        Commands::Themes { action } => commands::run_themes(location, action),
        Commands::Clone { url, directory } => commands::run_clone(&url, directory.as_deref()),
        Commands::Log { count } => commands::run_log(location, count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn location(dir: &std::path::Path) -> Location {
        Location {
            content_dir: Some(dir.to_path_buf()),
            ..Location::default()
        }
    }

    #[test]
    fn test_init_then_use_theme() {
        let temp = TempDir::new().unwrap();
        let cmd = Commands::Init {
            directory: Some(temp.path().to_path_buf()),
            template: None,
            require_commit: false,
        };
        execute_command(cmd, &Location::default()).unwrap();

        let cmd = Commands::Themes {
            action: Some(cli::ThemesAction::Use {
                name: "minimal".into(),
            }),
        };
        execute_command(cmd, &location(temp.path())).unwrap();

        let config = fs::read_to_string(temp.path().join(".gitpress/config.toml")).unwrap();
        assert!(config.contains("theme = \"minimal\""));
    }

    #[test]
    fn test_build_into_explicit_directory() {
        let temp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        commands::run_init(Some(temp.path()), None, None, false).unwrap();
        fs::write(temp.path().join("index.html"), "<h1>Hi</h1>").unwrap();

        let cmd = Commands::Build {
            out: Some(out.path().join("site")),
            no_isolate: false,
        };
        execute_command(cmd, &location(temp.path())).unwrap();

        assert!(out.path().join("site/index.html").is_file());
        assert!(out.path().join("site/style.css").is_file());
    }

    #[test]
    fn test_clone_reports_not_implemented() {
        let cmd = Commands::Clone {
            url: "https://example.com/blog.git".into(),
            directory: None,
        };
        let err = execute_command(cmd, &Location::default()).unwrap_err();
        assert!(err.to_string().contains("not implemented"));
    }

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }
}
