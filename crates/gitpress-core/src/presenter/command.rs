//! Built-in presenter that delegates to an external build command.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use super::{BuildRequest, Presenter};
use crate::config::keys;
use crate::{Error, Result};

/// Environment variable holding the output directory.
pub const ENV_OUT_DIR: &str = "GITPRESS_OUT_DIR";
/// Environment variable holding the content directory.
pub const ENV_CONTENT_DIR: &str = "GITPRESS_CONTENT_DIR";
/// Environment variable holding the metadata directory.
pub const ENV_REPO_DIR: &str = "GITPRESS_REPO_DIR";

/// Variables passed through when the build is isolated.
const ISOLATED_PASSTHROUGH: &[&str] = &["PATH", "HOME"];

/// Runs the `build_command` argv from the config inside the content
/// directory.
///
/// The command finds its directories in `GITPRESS_OUT_DIR`,
/// `GITPRESS_CONTENT_DIR` and `GITPRESS_REPO_DIR`. An isolated build starts
/// from an empty environment apart from `PATH` and `HOME`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandPresenter;

impl CommandPresenter {
    pub const NAME: &'static str = "command";
}

impl Presenter for CommandPresenter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn build(&self, request: &BuildRequest<'_>) -> Result<PathBuf> {
        let argv = request
            .config
            .get_string_list(keys::BUILD_COMMAND)?
            .filter(|argv| !argv.is_empty())
            .ok_or_else(|| failure(format!("'{}' is not configured", keys::BUILD_COMMAND)))?;

        let out = request.output_directory().to_native();
        fs::create_dir_all(&out)?;

        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..])
            .current_dir(request.content_directory.to_native());
        if request.isolate {
            cmd.env_clear();
            for key in ISOLATED_PASSTHROUGH {
                if let Some(value) = std::env::var_os(key) {
                    cmd.env(key, value);
                }
            }
        }
        cmd.env(ENV_OUT_DIR, &out)
            .env(ENV_CONTENT_DIR, request.content_directory.to_native())
            .env(ENV_REPO_DIR, request.repo_directory.to_native());

        tracing::debug!(command = ?argv, isolate = request.isolate, "Running build command");
        let output = cmd
            .output()
            .map_err(|e| failure(format!("failed to run '{}': {e}", argv[0])))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let code = output.status.code().unwrap_or(-1);
            return Err(failure(format!(
                "'{}' exited with status {code}: {}",
                argv[0],
                stderr.trim()
            )));
        }

        Ok(out)
    }
}

fn failure(message: String) -> Error {
    Error::BuildFailed {
        presenter: CommandPresenter::NAME.to_string(),
        message,
    }
}
