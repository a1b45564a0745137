// SPDX-License-Identifier: GPL-3.0-only

//! VeraCrypt command-line construction
//!
//! The argument list may carry the volume password in plaintext, so it is
//! never rendered without redaction.

use std::fmt;

use vcmount_types::{MountConfig, Platform, REDACTED, VolumePassword};
use zeroize::Zeroize;

/// Fully resolved VeraCrypt invocation.
pub struct VeracryptCommand {
    program: String,
    args: Vec<String>,
    password_index: Option<usize>,
    partition: String,
    mount_point: String,
}

impl VeracryptCommand {
    /// Executable to spawn (`wsl` under WSL, VeraCrypt otherwise).
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    /// Command line with the password replaced by a placeholder.
    pub fn redacted(&self) -> String {
        let mut rendered = self.program.clone();
        for (index, arg) in self.args.iter().enumerate() {
            rendered.push(' ');
            if Some(index) == self.password_index {
                rendered.push_str("--password=");
                rendered.push_str(REDACTED);
            } else {
                rendered.push_str(arg);
            }
        }
        rendered
    }
}

impl fmt::Debug for VeracryptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VeracryptCommand")
            .field("command", &self.redacted())
            .field("partition", &self.partition)
            .field("mount_point", &self.mount_point)
            .finish()
    }
}

impl Drop for VeracryptCommand {
    fn drop(&mut self) {
        if let Some(index) = self.password_index {
            self.args[index].zeroize();
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Build the VeraCrypt invocation for `partition`.
///
/// `-t` keeps VeraCrypt in text mode so it prompts for any setting left
/// unset here.
pub fn build_veracrypt_command(
    config: &MountConfig,
    platform: Platform,
    partition: &str,
    password: Option<&VolumePassword>,
) -> VeracryptCommand {
    let mut args = Vec::new();
    let program = match platform {
        Platform::Linux => config.veracrypt_exe.clone(),
        Platform::Wsl => {
            args.push(config.veracrypt_exe.clone());
            config.wsl_exe.clone()
        }
    };

    args.push("-t".to_string());
    if config.use_truecrypt {
        args.push("-tc".to_string());
    }
    if platform.is_wsl() {
        // WSL kernels lack the crypto modules VeraCrypt would use.
        args.push("-m=nokernelcrypto".to_string());
    }
    if let Some(keyfiles) = &config.keyfile_path {
        args.push(format!("--keyfiles={keyfiles}"));
    }

    let mut password_index = None;
    if let Some(password) = password {
        password_index = Some(args.len());
        args.push(format!("--password={}", password.expose()));
    }

    if let Some(pim) = config.pim {
        args.push(format!("--pim={pim}"));
    }
    if let Some(protect_hidden) = config.protect_hidden {
        args.push(format!("--protect-hidden={}", yes_no(protect_hidden)));
    }
    args.push(format!("--slot={}", config.slot));
    args.extend(config.veracrypt_options.iter().cloned());

    let mount_point = config.resolved_mount_point(platform);
    args.push(partition.to_string());
    args.push(mount_point.clone());

    VeracryptCommand {
        program,
        args,
        password_index,
        partition: partition.to_string(),
        mount_point,
    }
}
