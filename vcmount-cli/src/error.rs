// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;
use vcmount_sys::{ConfigError, PartitionListing, SysError};

pub const EXIT_TOOL_FAILURE: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 3;
pub const EXIT_PARTITION_UNRESOLVED: u8 = 4;
pub const EXIT_PRIVILEGE_REQUIRED: u8 = 5;

/// Reasons a mount run ends without a mounted volume
#[derive(Error, Debug)]
pub enum MountError {
    #[error(
        "This tool requires administrative rights to mount volumes.\nPlease re-run it as an administrator or as root."
    )]
    PrivilegeRequired,

    #[error("An error has been detected in the configuration file:\n{0}")]
    Config(#[from] ConfigError),

    /// Not a failure as such: candidates were listed for the operator.
    #[error(
        "DRIVE_PARTITION is not set!\nPlease set it to the Linux partition of the VeraCrypt volume [e.g. '/dev/sda1'].\nCurrently detected Linux partitions:\n{listing}"
    )]
    PartitionUnresolved { listing: PartitionListing },

    #[error("DRIVE_PARTITION is not set, and partitions could not be listed: {0}")]
    ListingFailed(#[source] SysError),

    /// VeraCrypt's own diagnostics went straight to the terminal and cannot
    /// be repeated here.
    #[error("VeraCrypt failed to mount the volume ({}); see its output above", describe_exit(.code))]
    ExternalToolFailure { code: Option<i32> },

    #[error(transparent)]
    Sys(#[from] SysError),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by a signal".to_string(),
    }
}

impl MountError {
    /// Process exit code reported for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::PrivilegeRequired => EXIT_PRIVILEGE_REQUIRED,
            Self::Config(_) => EXIT_CONFIG_ERROR,
            Self::PartitionUnresolved { .. } => EXIT_PARTITION_UNRESOLVED,
            Self::ListingFailed(_) | Self::ExternalToolFailure { .. } | Self::Sys(_) => {
                EXIT_TOOL_FAILURE
            }
        }
    }

    /// Whether this outcome is informational rather than a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::PartitionUnresolved { .. })
    }
}

pub type Result<T> = std::result::Result<T, MountError>;
