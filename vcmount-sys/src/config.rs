// SPDX-License-Identifier: GPL-3.0-only

//! INI configuration loading
//!
//! Settings live in a single `[Veracrypt]` section. Section and key names
//! are case-insensitive.

use std::fs;
use std::path::Path;

use configparser::ini::Ini;
use tracing::{debug, info};
use vcmount_types::{MountConfig, REDACTED, SECRET_KEYS, SECTION_NAME};

use crate::error::ConfigError;

/// Load and parse the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<MountConfig, ConfigError> {
    info!(
        "Loading configuration from config file '{}'...",
        path.display()
    );

    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(path, &content)
}

/// INI parser that only treats whole lines starting with `;` or `#` as
/// comments, so those characters survive inside values such as passwords.
fn ini_parser() -> Ini {
    let mut defaults = Ini::new().defaults();
    defaults.enable_inline_comments = false;
    Ini::new_from_defaults(defaults)
}

/// Parse configuration text; `path` is only used in error messages.
pub fn parse_config(path: &Path, content: &str) -> Result<MountConfig, ConfigError> {
    let mut conf = ini_parser();
    let sections = conf
        .read(content.to_string())
        .map_err(|reason| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason,
        })?;

    let Some(section) = sections.get(&SECTION_NAME.to_ascii_lowercase()) else {
        return Err(ConfigError::MissingSection {
            path: path.to_path_buf(),
            section: SECTION_NAME,
        });
    };

    let mut keys: Vec<&String> = section.keys().collect();
    keys.sort();
    for key in keys {
        let value = section.get(key).and_then(|value| value.as_deref());
        let shown = if SECRET_KEYS.contains(&key.as_str()) {
            value.map(|_| REDACTED)
        } else {
            value
        };
        debug!("{}={}", key, shown.unwrap_or_default());
    }

    let entries = section.iter().map(|(key, value)| (key, value.as_deref()));
    MountConfig::from_entries(entries).map_err(|e| ConfigError::InvalidValue {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
