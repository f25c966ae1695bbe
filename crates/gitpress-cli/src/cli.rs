//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// gitpress - Manage, build and preview a content repository
#[derive(Parser, Debug)]
#[command(name = "gitpress")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Content directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub content_dir: Option<PathBuf>,

    /// Metadata directory (defaults to .gitpress inside the content directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub repo_dir: Option<PathBuf>,

    /// Presenter to use instead of the configured one
    #[arg(long, global = true, value_name = "NAME")]
    pub presenter: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a new gitpress repository
    ///
    /// Creates a .gitpress/ directory from a template and records it in git.
    ///
    /// Examples:
    ///   gitpress init                    # Initialize in current directory
    ///   gitpress init my-site            # Create and initialize my-site/
    ///   gitpress init --template blog    # Use a named template
    Init {
        /// Content directory to initialize
        directory: Option<PathBuf>,

        /// Template name or directory
        #[arg(short, long)]
        template: Option<String>,

        /// Fail if the initial commit cannot be recorded
        #[arg(long)]
        require_commit: bool,
    },

    /// Build the site
    Build {
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Build in place with the full host environment
        #[arg(long)]
        no_isolate: bool,
    },

    /// Build the site and serve it locally
    Preview {
        /// Host to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage declared plugins
    Plugins {
        #[command(subcommand)]
        action: Option<PluginsAction>,
    },

    /// Manage installed themes
    Themes {
        #[command(subcommand)]
        action: Option<ThemesAction>,
    },

    /// Clone a remote repository
    Clone {
        /// Remote URL
        url: String,

        /// Target content directory
        directory: Option<PathBuf>,
    },

    /// Show recent repository history
    Log {
        /// Number of commits to show
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
}

/// Plugin actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PluginsAction {
    /// List declared plugins
    List,

    /// Declare a plugin
    Add {
        /// Plugin name
        name: String,
    },

    /// Remove a declared plugin
    Remove {
        /// Plugin name
        name: String,
    },
}

/// Theme actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ThemesAction {
    /// List installed themes
    List,

    /// Switch the active theme
    Use {
        /// Theme name
        name: String,
    },

    /// Install a theme
    Install {
        /// Theme name
        name: String,
    },

    /// Uninstall a theme
    Uninstall {
        /// Theme name
        name: String,
    },
}
