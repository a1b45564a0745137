// SPDX-License-Identifier: GPL-3.0-only

//! Domain models for the vcmount VeraCrypt mount helper
//!
//! This crate holds the data that flows between the configuration loader,
//! the system layer and the orchestrator:
//!
//! - `MountConfig` → the typed `[Veracrypt]` section of the config file
//! - `VolumePassword` → a zeroize-on-drop secret that never prints itself
//! - `Platform` → where VeraCrypt runs (natively on Linux, or inside WSL)

pub mod config;
pub mod password;
pub mod platform;

pub use config::*;
pub use password::*;
pub use platform::*;
