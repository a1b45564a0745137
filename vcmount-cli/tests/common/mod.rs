#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use vcmount_sys::{ChildExit, CommandOutput, Host, PasswordPrompt, SysError};
use vcmount_types::VolumePassword;

pub const LSBLK_SAMPLE: &str = concat!(
    "NAME=\"/dev/sda\" SIZE=\"931.5G\" TYPE=\"disk\" FSTYPE=\"\" MOUNTPOINT=\"\"\n",
    "NAME=\"/dev/sda1\" SIZE=\"931.5G\" TYPE=\"part\" FSTYPE=\"\" MOUNTPOINT=\"\"\n",
);

pub const WMIC_SAMPLE: &str = "DeviceID            Model\r\n\\\\.\\PHYSICALDRIVE0  Samsung SSD\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Recording [`Host`] that never touches the real system.
pub struct MockHost {
    pub admin: bool,
    pub exit_code: Option<i32>,
    pub missing_programs: Vec<String>,
    pub failing_programs: Vec<String>,
    pub captured: RefCell<Vec<Invocation>>,
    pub interactive: RefCell<Vec<Invocation>>,
    pub dirs: RefCell<Vec<PathBuf>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            admin: true,
            exit_code: Some(0),
            missing_programs: Vec::new(),
            failing_programs: Vec::new(),
            captured: RefCell::new(Vec::new()),
            interactive: RefCell::new(Vec::new()),
            dirs: RefCell::new(Vec::new()),
        }
    }
}

impl MockHost {
    pub fn exiting_with(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::default()
        }
    }

    pub fn captured(&self) -> Vec<Invocation> {
        self.captured.borrow().clone()
    }

    pub fn interactive(&self) -> Vec<Invocation> {
        self.interactive.borrow().clone()
    }

    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.dirs.borrow().clone()
    }
}

impl Host for MockHost {
    fn has_admin_rights(&self) -> bool {
        self.admin
    }

    fn find_program(&self, program: &str) -> vcmount_sys::Result<PathBuf> {
        if self.missing_programs.iter().any(|missing| missing == program) {
            return Err(SysError::ProgramNotFound {
                program: program.to_string(),
            });
        }
        Ok(PathBuf::from("/usr/bin").join(program))
    }

    fn capture(&self, program: &str, args: &[String]) -> vcmount_sys::Result<CommandOutput> {
        self.captured.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        });

        let command = format!("{} {}", program, args.join(" "));
        if self.failing_programs.iter().any(|failing| failing == program) {
            return Err(SysError::CommandFailed {
                command,
                stderr: "mock failure".to_string(),
            });
        }

        let stdout = if program == "lsblk" || args.first().map(String::as_str) == Some("lsblk") {
            LSBLK_SAMPLE.to_string()
        } else if program == "wmic.exe" {
            WMIC_SAMPLE.to_string()
        } else {
            String::new()
        };

        Ok(CommandOutput {
            command,
            stdout,
            stderr: String::new(),
        })
    }

    fn run_interactive(&self, program: &str, args: &[String]) -> vcmount_sys::Result<ChildExit> {
        self.interactive.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        });
        Ok(ChildExit {
            code: self.exit_code,
        })
    }

    fn ensure_dir(&self, path: &Path) -> vcmount_sys::Result<bool> {
        self.dirs.borrow_mut().push(path.to_path_buf());
        Ok(true)
    }
}

/// Prompt that answers with a fixed password and counts how often it was asked.
pub struct MockPrompt {
    answer: String,
    calls: Cell<usize>,
}

impl MockPrompt {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl PasswordPrompt for MockPrompt {
    fn prompt_password(&self, _prompt: &str) -> vcmount_sys::Result<VolumePassword> {
        self.calls.set(self.calls.get() + 1);
        Ok(VolumePassword::new(self.answer.clone()))
    }
}

/// Write `content` to `volume.ini` inside `dir`.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("volume.ini");
    fs::write(&path, content).expect("write config fixture");
    path
}
