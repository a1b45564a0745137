// SPDX-License-Identifier: GPL-3.0-only

//! vcmount - mount a VeraCrypt volume from an INI configuration file
//!
//! The orchestrator loads the configuration, resolves the partition and the
//! password, then hands the terminal over to VeraCrypt until it exits.

pub mod error;
pub mod logging;
pub mod orchestrator;

pub use error::{MountError, Result};
pub use orchestrator::{MountOutcome, mount_from_file, mount_volume};
