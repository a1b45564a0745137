// SPDX-License-Identifier: GPL-3.0-only

//! Low-level system operations for mounting VeraCrypt volumes
//!
//! This crate wraps everything that touches the operating system:
//! - Loading the INI configuration file
//! - Privilege checks and program lookup
//! - Captured and interactive child processes
//! - Partition and physical drive listing
//! - VeraCrypt command construction
//! - WSL drive attachment
//! - Hidden password prompts
//!
//! All OS access goes through the [`Host`] and [`PasswordPrompt`] traits so
//! callers can substitute recording fakes.

pub mod config;
pub mod error;
pub mod host;
pub mod partitions;
pub mod prompt;
pub mod veracrypt;
pub mod wsl;

pub use config::{load_config, parse_config};
pub use error::{ConfigError, Result, SysError};
pub use host::{ChildExit, CommandOutput, Host, SystemHost};
pub use partitions::{BlockDevice, PartitionListing, list_partitions};
pub use prompt::{PASSWORD_PROMPT, PasswordPrompt, TerminalPrompt};
pub use veracrypt::{VeracryptCommand, build_veracrypt_command};
