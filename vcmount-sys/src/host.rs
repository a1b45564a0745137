// SPDX-License-Identifier: GPL-3.0-only

//! Process and filesystem access
//!
//! Shell integration is kept behind [`Host`] so the orchestration logic
//! stays testable with a recording fake.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Result, SysError};

/// Output of a command whose streams were captured.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
}

/// Exit of a child process that ran attached to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
}

impl ChildExit {
    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

/// Operating system facilities used while mounting.
pub trait Host {
    /// Whether the process may mount volumes (root, or an elevated Windows session).
    fn has_admin_rights(&self) -> bool;

    /// Resolve `program` to an executable path.
    fn find_program(&self, program: &str) -> Result<PathBuf>;

    /// Run a command to completion and capture its output.
    ///
    /// A nonzero exit is reported as [`SysError::CommandFailed`].
    fn capture(&self, program: &str, args: &[String]) -> Result<CommandOutput>;

    /// Run a command with stdin, stdout and stderr inherited from this process
    /// and wait for it to exit.
    fn run_interactive(&self, program: &str, args: &[String]) -> Result<ChildExit>;

    /// Create `path` and its parents if missing. Returns `true` when created.
    fn ensure_dir(&self, path: &Path) -> Result<bool>;
}

/// Render a command for messages. Must not be used for argument lists
/// carrying secrets.
pub fn render(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// [`Host`] backed by the real operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    #[cfg(unix)]
    fn has_admin_rights(&self) -> bool {
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    fn has_admin_rights(&self) -> bool {
        // `net session` only succeeds from an elevated prompt.
        Command::new("net")
            .arg("session")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn find_program(&self, program: &str) -> Result<PathBuf> {
        which::which(program).map_err(|_| SysError::ProgramNotFound {
            program: program.to_string(),
        })
    }

    fn capture(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let rendered = render(program, args);
        debug!("Running {}", rendered);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SysError::SpawnFailed {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(SysError::CommandFailed {
                command: rendered,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(CommandOutput {
            command: rendered,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn run_interactive(&self, program: &str, args: &[String]) -> Result<ChildExit> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| SysError::SpawnFailed {
                program: program.to_string(),
                source,
            })?;

        debug!("{} exited with {:?}", program, status.code());
        Ok(ChildExit {
            code: status.code(),
        })
    }

    fn ensure_dir(&self, path: &Path) -> Result<bool> {
        if path.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_command_context() {
        let args = vec!["--paths".to_string(), "--pairs".to_string()];
        assert_eq!(render("lsblk", &args), "lsblk --paths --pairs");
        assert_eq!(render("lsblk", &[]), "lsblk");
    }

    #[test]
    fn child_exit_success_requires_zero() {
        assert!(ChildExit { code: Some(0) }.success());
        assert!(!ChildExit { code: Some(1) }.success());
        assert!(!ChildExit { code: None }.success());
    }

    #[test]
    fn ensure_dir_reports_creation_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("mnt").join("wsl").join("PHYSICALDRIVE1");

        assert!(SystemHost.ensure_dir(&target).expect("create"));
        assert!(!SystemHost.ensure_dir(&target).expect("exists"));
        assert!(target.is_dir());
    }
}
