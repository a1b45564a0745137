// SPDX-License-Identifier: GPL-3.0-only

//! Windows Subsystem for Linux helpers
//!
//! On Windows the physical drive holding the volume is attached to WSL as a
//! bare block device, after which VeraCrypt runs inside the distribution.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use vcmount_types::physical_drive_name;

use crate::error::Result;
use crate::host::{CommandOutput, Host};

pub const WMIC: &str = "wmic.exe";

/// Windows device path of a physical drive, e.g. `\\.\PHYSICALDRIVE0`.
pub fn physical_drive_path(drive_num: u32) -> String {
    format!(r"\\.\{}", physical_drive_name(drive_num))
}

/// Windows-side directory backing `/mnt/wsl/PHYSICALDRIVE<n>` in the distribution.
pub fn windows_mount_point(wsl_root: &Path, drive_num: u32) -> PathBuf {
    wsl_root
        .join("mnt")
        .join("wsl")
        .join(physical_drive_name(drive_num))
}

/// Attach the physical drive to WSL without mounting any filesystem on it.
pub fn attach_physical_drive(
    host: &dyn Host,
    wsl_exe: &str,
    drive_num: u32,
) -> Result<CommandOutput> {
    info!(
        "Attaching physical drive '{}' to WSL...",
        physical_drive_name(drive_num)
    );
    let args = vec![
        "--mount".to_string(),
        physical_drive_path(drive_num),
        "--bare".to_string(),
    ];
    host.capture(wsl_exe, &args)
}

/// Brief listing of the physical drives Windows can see.
pub fn list_physical_drives(host: &dyn Host) -> Result<String> {
    let args = vec!["diskdrive".to_string(), "list".to_string(), "brief".to_string()];
    let output = host.capture(WMIC, &args)?;
    debug!("wmic reported {} lines", output.stdout.lines().count());
    Ok(output.stdout)
}
