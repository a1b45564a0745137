// SPDX-License-Identifier: GPL-3.0-only

//! vcmount - mounts a VeraCrypt volume with a Linux filesystem in Windows or Linux
//!
//! Volume settings are read from an INI file. VeraCrypt is then started in
//! text mode with the terminal attached, so it can prompt for anything the
//! file leaves out.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use vcmount::logging::{self, LoggingLevel};
use vcmount::{MountError, mount_from_file};
use vcmount_sys::{SystemHost, TerminalPrompt};
use vcmount_types::Platform;

#[derive(Debug, Parser)]
#[command(name = "vcmount", version)]
#[command(about = "Mounts a VeraCrypt volume with a Linux filesystem in Windows or Linux")]
struct Cli {
    /// Path to a .ini configuration file with a [Veracrypt] section
    #[arg(short, long = "config", value_name = "PATH")]
    config_path: PathBuf,

    /// Log verbosity; RUST_LOG takes precedence
    #[arg(long, value_enum, default_value_t = LoggingLevel::Info)]
    log_level: LoggingLevel,

    /// Wait for Enter before exiting on failure
    #[arg(long)]
    pause_on_error: bool,
}

fn report(error: &MountError) {
    let message = error.to_string();
    for line in message.lines() {
        if error.is_informational() {
            warn!("{}", line);
        } else {
            error!("{}", line);
        }
    }
}

fn pause_for_input() {
    print!("Press Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_level) {
        eprintln!("vcmount: failed to initialize logging: {e:#}");
    }

    match mount_from_file(
        &cli.config_path,
        Platform::current(),
        &SystemHost,
        &TerminalPrompt,
    ) {
        Ok(outcome) => {
            info!(
                "Volume '{}' is available at '{}'",
                outcome.partition, outcome.mount_point
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            report(&e);
            if cli.pause_on_error {
                pause_for_input();
            }
            ExitCode::from(e.exit_code())
        }
    }
}
