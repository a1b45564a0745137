// SPDX-License-Identifier: GPL-3.0-only

//! Typed view of the `[Veracrypt]` configuration section

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::password::VolumePassword;
use crate::platform::{Platform, physical_drive_name};

/// INI section holding every setting.
pub const SECTION_NAME: &str = "Veracrypt";

pub const DRIVE_PARTITION_KEY: &str = "drive_partition";
pub const PHYSICAL_DRIVE_NUM_KEY: &str = "physical_drive_num";
pub const WSL_EXE_KEY: &str = "wsl_exe";
pub const WSL_ROOT_KEY: &str = "wsl_root";

/// Keys whose values must never reach a log line.
pub const SECRET_KEYS: &[&str] = &["volume_password", "password"];

pub const DEFAULT_VERACRYPT_EXE: &str = "veracrypt";
pub const DEFAULT_WSL_EXE: &str = "wsl";

/// VeraCrypt mount slot, 1 through 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotNumber(u8);

impl SlotNumber {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 64;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for SlotNumber {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for SlotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settings for a single mount run.
///
/// Built once from the config file and never mutated afterwards. Settings
/// left unset are omitted from the VeraCrypt command line so that VeraCrypt's
/// own text-mode prompts ask for them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// Block device or partition holding the volume, e.g. `/dev/sdb1`.
    pub drive_partition: Option<String>,

    /// Directory the decrypted volume is mounted on, as seen by VeraCrypt.
    pub mount_point: Option<String>,

    #[serde(rename = "volume_password", alias = "password")]
    pub password: Option<VolumePassword>,

    #[serde(alias = "keyfiles")]
    pub keyfile_path: Option<String>,

    /// Personal Iterations Multiplier.
    #[serde(
        rename = "personal_iterations_multiplier",
        alias = "pim",
        deserialize_with = "de::parsed_opt"
    )]
    pub pim: Option<u32>,

    #[serde(
        rename = "using_hidden_partition",
        alias = "protect_hidden",
        deserialize_with = "de::flag_opt"
    )]
    pub protect_hidden: Option<bool>,

    #[serde(rename = "slot_num", alias = "slot", deserialize_with = "de::slot")]
    pub slot: SlotNumber,

    #[serde(deserialize_with = "de::flag")]
    pub use_truecrypt: bool,

    /// Extra flags appended verbatim before the partition argument.
    #[serde(alias = "extra_options", deserialize_with = "de::shell_words")]
    pub veracrypt_options: Vec<String>,

    pub veracrypt_exe: String,

    #[serde(deserialize_with = "de::parsed_opt")]
    pub physical_drive_num: Option<u32>,

    pub wsl_exe: String,

    /// Windows path of the WSL distribution root, e.g. `\\wsl.localhost\Ubuntu`.
    pub wsl_root: Option<PathBuf>,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            drive_partition: None,
            mount_point: None,
            password: None,
            keyfile_path: None,
            pim: None,
            protect_hidden: None,
            slot: SlotNumber::default(),
            use_truecrypt: false,
            veracrypt_options: Vec::new(),
            veracrypt_exe: DEFAULT_VERACRYPT_EXE.to_string(),
            physical_drive_num: None,
            wsl_exe: DEFAULT_WSL_EXE.to_string(),
            wsl_root: None,
        }
    }
}

impl MountConfig {
    /// Build a config from raw key/value pairs.
    ///
    /// Keys are matched case-insensitively, empty values count as unset and
    /// unknown keys are ignored.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, serde_json::Error>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut object = Map::new();
        for (key, value) in entries {
            let Some(value) = value else { continue };
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            object.insert(
                key.as_ref().trim().to_ascii_lowercase(),
                Value::String(value.to_string()),
            );
        }

        serde_json::from_value(Value::Object(object))
    }

    /// Mount point to pass to VeraCrypt.
    ///
    /// An explicit `mount_point` wins. Otherwise Linux uses
    /// `/media/veracrypt<slot>` and WSL uses `/mnt/wsl/PHYSICALDRIVE<n>`.
    /// The path is always POSIX since VeraCrypt runs on the Linux side.
    pub fn resolved_mount_point(&self, platform: Platform) -> String {
        if let Some(mount_point) = &self.mount_point {
            return mount_point.clone();
        }

        match (platform, self.physical_drive_num) {
            (Platform::Wsl, Some(drive_num)) => {
                format!("/mnt/wsl/{}", physical_drive_name(drive_num))
            }
            _ => format!("/media/veracrypt{}", self.slot),
        }
    }
}

mod de {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    use super::SlotNumber;

    pub fn parsed_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("'{raw}' is not a valid number: {e}")))
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_flag(&raw)
            .ok_or_else(|| D::Error::custom(format!("'{raw}' is not a boolean (yes/no)")))
    }

    pub fn flag_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        flag(deserializer).map(Some)
    }

    pub fn slot<'de, D>(deserializer: D) -> Result<SlotNumber, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse::<u8>()
            .ok()
            .and_then(SlotNumber::new)
            .ok_or_else(|| {
                D::Error::custom(format!(
                    "'{raw}' is not a slot between {} and {}",
                    SlotNumber::MIN,
                    SlotNumber::MAX
                ))
            })
    }

    pub fn shell_words<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        shlex::split(&raw)
            .ok_or_else(|| D::Error::custom(format!("unbalanced quotes in '{raw}'")))
    }

    fn parse_flag(raw: &str) -> Option<bool> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Some(true),
            "0" | "no" | "false" | "off" => Some(false),
            _ => None,
        }
    }
}
