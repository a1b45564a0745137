// SPDX-License-Identifier: GPL-3.0-only

//! Block device listing via `lsblk`

use std::fmt;

use tracing::debug;
use vcmount_types::Platform;

use crate::error::Result;
use crate::host::Host;

pub const LSBLK: &str = "lsblk";

const LSBLK_COLUMNS: &str = "NAME,SIZE,TYPE,FSTYPE,MOUNTPOINT";

/// One row of `lsblk` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDevice {
    /// Full device path, e.g. `/dev/sda1`.
    pub name: String,
    pub size: String,
    /// `disk`, `part`, `crypt`, `loop`, ...
    pub kind: String,
    pub fstype: Option<String>,
    pub mount_point: Option<String>,
}

/// Candidates shown when no partition is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionListing {
    pub devices: Vec<BlockDevice>,
    /// Unparsed command output, shown when nothing could be parsed.
    pub raw: String,
}

fn lsblk_args() -> Vec<String> {
    vec![
        "--paths".to_string(),
        "--pairs".to_string(),
        "--output".to_string(),
        LSBLK_COLUMNS.to_string(),
    ]
}

/// Parse `lsblk --pairs` output (`NAME="/dev/sda1" SIZE="10G" ...`).
///
/// Lines without a `NAME` are skipped.
pub fn parse_lsblk_pairs(output: &str) -> Vec<BlockDevice> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }

            let mut device = BlockDevice {
                name: String::new(),
                size: String::new(),
                kind: String::new(),
                fstype: None,
                mount_point: None,
            };

            for token in shlex::split(line)? {
                let Some((key, value)) = token.split_once('=') else {
                    continue;
                };
                let optional = (!value.is_empty()).then(|| value.to_string());
                match key {
                    "NAME" => device.name = value.to_string(),
                    "SIZE" => device.size = value.to_string(),
                    "TYPE" => device.kind = value.to_string(),
                    "FSTYPE" => device.fstype = optional,
                    "MOUNTPOINT" => device.mount_point = optional,
                    _ => {}
                }
            }

            (!device.name.is_empty()).then_some(device)
        })
        .collect()
}

/// Enumerate block devices so the operator can pick `DRIVE_PARTITION`.
///
/// Under WSL, `lsblk` runs inside the distribution through `wsl_exe`.
pub fn list_partitions(
    host: &dyn Host,
    platform: Platform,
    wsl_exe: &str,
) -> Result<PartitionListing> {
    let output = match platform {
        Platform::Linux => host.capture(LSBLK, &lsblk_args())?,
        Platform::Wsl => {
            let mut args = vec![LSBLK.to_string()];
            args.extend(lsblk_args());
            host.capture(wsl_exe, &args)?
        }
    };

    let devices = parse_lsblk_pairs(&output.stdout);
    debug!("Found {} block devices", devices.len());

    Ok(PartitionListing {
        devices,
        raw: output.stdout,
    })
}

impl fmt::Display for PartitionListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.devices.is_empty() {
            let raw = self.raw.trim_end();
            if raw.is_empty() {
                return f.write_str("(no block devices detected)");
            }
            return f.write_str(raw);
        }

        let headers = ["NAME", "SIZE", "TYPE", "FSTYPE", "MOUNTPOINT"];
        let rows: Vec<[&str; 5]> = self
            .devices
            .iter()
            .map(|device| {
                [
                    device.name.as_str(),
                    device.size.as_str(),
                    device.kind.as_str(),
                    device.fstype.as_deref().unwrap_or(""),
                    device.mount_point.as_deref().unwrap_or(""),
                ]
            })
            .collect();

        let mut widths = headers.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        let mut write_row = |cells: &[&str; 5], last: bool| -> fmt::Result {
            let line = cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            f.write_str(line.trim_end())?;
            if !last { f.write_str("\n") } else { Ok(()) }
        };

        write_row(&headers, rows.is_empty())?;
        for (index, row) in rows.iter().enumerate() {
            write_row(row, index + 1 == rows.len())?;
        }
        Ok(())
    }
}
