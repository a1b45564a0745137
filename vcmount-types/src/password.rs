// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;

use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

/// Placeholder shown wherever a password would otherwise be printed.
pub const REDACTED: &str = "******";

/// Volume password held only in process memory.
///
/// The buffer is wiped on drop, and neither `Debug` nor `Display` reveal it.
#[derive(Clone, PartialEq, Eq)]
pub struct VolumePassword(Zeroizing<String>);

impl VolumePassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Access the plaintext. Callers must not log the result.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for VolumePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VolumePassword").field(&REDACTED).finish()
    }
}

impl fmt::Display for VolumePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for VolumePassword {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_never_reveals_the_secret() {
        let password = VolumePassword::new("hunter2");
        assert_eq!(password.to_string(), REDACTED);
        assert!(!format!("{password:?}").contains("hunter2"));
        assert_eq!(password.expose(), "hunter2");
    }
}
