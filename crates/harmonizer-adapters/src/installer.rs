//! Package installer running an external command (`npm install` by default).
//!
//! The program is looked up on `PATH` before it is run, so a missing program
//! and a program that ran and failed are reported differently.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument};

use harmonizer_core::{
    application::{ApplicationError, ports::PackageInstaller},
    error::HarmonizerResult,
};

pub const DEFAULT_PROGRAM: &str = "npm";
pub const DEFAULT_ARGS: [&str; 1] = ["install"];

/// Runs `<program> <args...>` in the project directory, inheriting stdio so
/// the operator sees the installer's own progress output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInstaller {
    program: String,
    args: Vec<String>,
}

impl CommandInstaller {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The command line, for messages.
    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Absolute path of the program, if it is on `PATH`.
    pub fn find_program(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }
}

impl Default for CommandInstaller {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_ARGS)
    }
}

impl PackageInstaller for CommandInstaller {
    fn program(&self) -> String {
        self.program.clone()
    }

    #[instrument(skip(self), fields(command = %self.display_command()))]
    fn install(&self, dir: &Path) -> HarmonizerResult<()> {
        let executable = self
            .find_program()
            .ok_or_else(|| ApplicationError::InstallerNotFound {
                program: self.program.clone(),
            })?;
        debug!(executable = %executable.display(), "Running installer");

        let failed = |reason: String| ApplicationError::InstallFailed {
            program: self.display_command(),
            dir: dir.to_path_buf(),
            reason,
        };

        let status = Command::new(&executable)
            .args(&self.args)
            .current_dir(dir)
            .status()
            .map_err(|e| failed(e.to_string()))?;

        if !status.success() {
            return Err(failed(status.to_string()).into());
        }
        Ok(())
    }
}
