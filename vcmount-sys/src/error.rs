// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use thiserror::Error;

/// Problems with the configuration file or its settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file '{}' does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("unable to read config file '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file '{}' is malformed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("section [{section}] not found in config file '{}'", .path.display())]
    MissingSection {
        path: PathBuf,
        section: &'static str,
    },

    #[error("invalid setting in config file '{}': {reason}", .path.display())]
    InvalidValue { path: PathBuf, reason: String },

    #[error("{} is not set!\n{hint}", .key.to_ascii_uppercase())]
    MissingSetting { key: &'static str, hint: String },

    #[error(
        "unable to find '{program}'!\nPlease make sure it is installed at the path set for {} in the config file.",
        .key.to_ascii_uppercase()
    )]
    ProgramMissing { key: &'static str, program: String },
}

/// Error types for system-level operations
#[derive(Error, Debug)]
pub enum SysError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("program '{program}' was not found in PATH")]
    ProgramNotFound { program: String },

    #[error("command failed: {command}; stderr: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("unable to start '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read password: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Result type alias for system operations
pub type Result<T> = std::result::Result<T, SysError>;
