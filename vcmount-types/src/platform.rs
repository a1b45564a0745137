// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;

/// Where the VeraCrypt executable runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Native Linux host; VeraCrypt and `lsblk` are invoked directly.
    Linux,
    /// Windows host; VeraCrypt and `lsblk` run inside the Windows Subsystem for Linux.
    Wsl,
}

impl Platform {
    /// Platform of the running binary.
    pub fn current() -> Self {
        if cfg!(windows) { Self::Wsl } else { Self::Linux }
    }

    pub fn is_wsl(self) -> bool {
        self == Self::Wsl
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => f.write_str("linux"),
            Self::Wsl => f.write_str("wsl"),
        }
    }
}

/// Windows device name for a physical drive index, e.g. `PHYSICALDRIVE0`.
pub fn physical_drive_name(drive_num: u32) -> String {
    format!("PHYSICALDRIVE{drive_num}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_physical_drive_names() {
        assert_eq!(physical_drive_name(0), "PHYSICALDRIVE0");
        assert_eq!(physical_drive_name(12), "PHYSICALDRIVE12");
    }
}
