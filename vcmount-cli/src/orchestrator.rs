// SPDX-License-Identifier: GPL-3.0-only

//! Single mount run: resolve settings, then hand the terminal to VeraCrypt
//!
//! Everything the run needs is passed in explicitly. OS access goes through
//! [`Host`], password input through [`PasswordPrompt`].

use std::path::Path;

use tracing::{debug, info, warn};
use vcmount_sys::wsl;
use vcmount_sys::{
    ConfigError, Host, PASSWORD_PROMPT, PasswordPrompt, build_veracrypt_command, list_partitions,
    load_config,
};
use vcmount_types::{
    MountConfig, PHYSICAL_DRIVE_NUM_KEY, Platform, VolumePassword, WSL_EXE_KEY, WSL_ROOT_KEY,
    physical_drive_name,
};

use crate::error::{MountError, Result};

/// A volume VeraCrypt reported as mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountOutcome {
    pub partition: String,
    pub mount_point: String,
}

/// Load the config file at `config_path` and mount the volume it describes.
pub fn mount_from_file(
    config_path: &Path,
    platform: Platform,
    host: &dyn Host,
    prompt: &dyn PasswordPrompt,
) -> Result<MountOutcome> {
    let config = load_config(config_path)?;
    mount_volume(&config, platform, host, prompt)
}

/// Mount the volume described by `config`.
///
/// Makes a single attempt. When no partition is configured the candidates
/// are listed instead and VeraCrypt is never started.
pub fn mount_volume(
    config: &MountConfig,
    platform: Platform,
    host: &dyn Host,
    prompt: &dyn PasswordPrompt,
) -> Result<MountOutcome> {
    if !host.has_admin_rights() {
        return Err(MountError::PrivilegeRequired);
    }

    debug!("Mounting for platform {}", platform);
    let drive_num = match platform {
        Platform::Wsl => Some(validate_wsl_settings(config, host)?),
        Platform::Linux => None,
    };

    let Some(partition) = config.drive_partition.as_deref() else {
        return Err(list_candidates(config, platform, host, drive_num));
    };

    let prompted: VolumePassword;
    let password = match &config.password {
        Some(password) => password,
        None => {
            prompted = prompt.prompt_password(PASSWORD_PROMPT)?;
            &prompted
        }
    };

    if let Some(drive_num) = drive_num {
        prepare_wsl_drive(config, host, drive_num)?;
    }

    let command = build_veracrypt_command(config, platform, partition, Some(password));
    info!(
        "Mounting VeraCrypt volume '{}' to '{}'...",
        command.partition(),
        command.mount_point()
    );
    debug!("{}", command.redacted());

    let exit = host.run_interactive(command.program(), command.args())?;
    if !exit.success() {
        return Err(MountError::ExternalToolFailure { code: exit.code });
    }

    info!("VeraCrypt finished mounting '{}'", command.mount_point());
    Ok(MountOutcome {
        partition: command.partition().to_string(),
        mount_point: command.mount_point().to_string(),
    })
}

fn require_wsl_root(config: &MountConfig) -> std::result::Result<&Path, ConfigError> {
    config
        .wsl_root
        .as_deref()
        .ok_or_else(|| ConfigError::MissingSetting {
            key: WSL_ROOT_KEY,
            hint: "Please set it to WSL's root share path for the current distribution [e.g. '\\\\wsl.localhost\\Ubuntu'].".to_string(),
        })
}

fn validate_wsl_settings(config: &MountConfig, host: &dyn Host) -> Result<u32> {
    require_wsl_root(config)?;

    if let Err(e) = host.find_program(&config.wsl_exe) {
        debug!("WSL lookup failed: {}", e);
        return Err(ConfigError::ProgramMissing {
            key: WSL_EXE_KEY,
            program: config.wsl_exe.clone(),
        }
        .into());
    }

    if let Some(drive_num) = config.physical_drive_num {
        return Ok(drive_num);
    }

    let drives = wsl::list_physical_drives(host)
        .unwrap_or_else(|e| format!("(unable to list physical drives: {e})"));
    Err(ConfigError::MissingSetting {
        key: PHYSICAL_DRIVE_NUM_KEY,
        hint: format!(
            "Please set it to the DeviceID for the drive containing the VeraCrypt volume [e.g. '0' for '{}'].\nCurrently detected physical drives:\n{}",
            physical_drive_name(0),
            drives.trim_end()
        ),
    }
    .into())
}

fn attach_drive(config: &MountConfig, host: &dyn Host, drive_num: u32) {
    // Attaching an already attached drive fails; VeraCrypt reports real problems later.
    if let Err(e) = wsl::attach_physical_drive(host, &config.wsl_exe, drive_num) {
        warn!("Attaching {} to WSL failed: {}", physical_drive_name(drive_num), e);
    }
}

fn prepare_wsl_drive(config: &MountConfig, host: &dyn Host, drive_num: u32) -> Result<()> {
    let wsl_root = require_wsl_root(config)?;

    let mount_point = wsl::windows_mount_point(wsl_root, drive_num);
    if host.ensure_dir(&mount_point)? {
        info!("Created mount point at '{}'", mount_point.display());
    }

    info!(
        "Mounting VeraCrypt drive at drive number '{}'...",
        drive_num
    );
    attach_drive(config, host, drive_num);
    Ok(())
}

fn list_candidates(
    config: &MountConfig,
    platform: Platform,
    host: &dyn Host,
    drive_num: Option<u32>,
) -> MountError {
    if let Some(drive_num) = drive_num {
        // The drive has to be attached before lsblk inside WSL can see it.
        attach_drive(config, host, drive_num);
    }

    match list_partitions(host, platform, &config.wsl_exe) {
        Ok(listing) => MountError::PartitionUnresolved { listing },
        Err(e) => MountError::ListingFailed(e),
    }
}
