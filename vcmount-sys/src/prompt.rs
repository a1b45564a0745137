// SPDX-License-Identifier: GPL-3.0-only

//! Hidden password input

use vcmount_types::VolumePassword;

use crate::error::{Result, SysError};

pub const PASSWORD_PROMPT: &str = "Enter Volume Password: ";

/// Source of the volume password when the config does not provide one.
pub trait PasswordPrompt {
    fn prompt_password(&self, prompt: &str) -> Result<VolumePassword>;
}

/// Reads from the controlling terminal with echo disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn prompt_password(&self, prompt: &str) -> Result<VolumePassword> {
        rpassword::prompt_password(prompt)
            .map(VolumePassword::new)
            .map_err(SysError::Prompt)
    }
}
