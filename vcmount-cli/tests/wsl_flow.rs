mod common;

use std::path::PathBuf;

use common::{MockHost, MockPrompt};
use vcmount::error::EXIT_CONFIG_ERROR;
use vcmount::{MountError, mount_volume};
use vcmount_sys::ConfigError;
use vcmount_types::{MountConfig, Platform, VolumePassword};

fn wsl_config() -> MountConfig {
    MountConfig {
        drive_partition: Some("/dev/sdd1".to_string()),
        password: Some(VolumePassword::new("secret")),
        physical_drive_num: Some(1),
        wsl_root: Some(PathBuf::from("wsl-root")),
        ..MountConfig::default()
    }
}

#[test]
fn attaches_the_drive_then_runs_veracrypt_inside_wsl() {
    let host = MockHost::default();
    let prompt = MockPrompt::answering("unused");

    let outcome =
        mount_volume(&wsl_config(), Platform::Wsl, &host, &prompt).expect("mounts");
    assert_eq!(outcome.mount_point, "/mnt/wsl/PHYSICALDRIVE1");

    let expected_dir = PathBuf::from("wsl-root")
        .join("mnt")
        .join("wsl")
        .join("PHYSICALDRIVE1");
    assert_eq!(host.created_dirs(), vec![expected_dir]);

    let captured = host.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].program, "wsl");
    assert_eq!(captured[0].args, ["--mount", r"\\.\PHYSICALDRIVE1", "--bare"]);

    let runs = host.interactive();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].program, "wsl");
    assert_eq!(runs[0].args[0], "veracrypt");
    assert!(runs[0].args.contains(&"-m=nokernelcrypto".to_string()));
    assert!(runs[0].args.contains(&"/dev/sdd1".to_string()));
}

#[test]
fn failed_attach_is_not_fatal() {
    let host = MockHost {
        failing_programs: vec!["wsl".to_string()],
        ..MockHost::default()
    };
    let prompt = MockPrompt::answering("unused");

    mount_volume(&wsl_config(), Platform::Wsl, &host, &prompt).expect("mounts");
    assert_eq!(host.interactive().len(), 1);
}

#[test]
fn missing_wsl_root_is_a_config_error() {
    let config = MountConfig {
        wsl_root: None,
        ..wsl_config()
    };
    let host = MockHost::default();
    let prompt = MockPrompt::answering("unused");

    let error = mount_volume(&config, Platform::Wsl, &host, &prompt).expect_err("wsl_root required");

    assert!(matches!(
        error,
        MountError::Config(ConfigError::MissingSetting { key: "wsl_root", .. })
    ));
    assert!(error.to_string().contains("WSL_ROOT is not set"));
    assert_eq!(error.exit_code(), EXIT_CONFIG_ERROR);
}

#[test]
fn missing_wsl_executable_is_a_config_error() {
    let host = MockHost {
        missing_programs: vec!["wsl".to_string()],
        ..MockHost::default()
    };
    let prompt = MockPrompt::answering("unused");

    let error =
        mount_volume(&wsl_config(), Platform::Wsl, &host, &prompt).expect_err("wsl missing");

    assert!(matches!(
        error,
        MountError::Config(ConfigError::ProgramMissing { .. })
    ));
    assert!(host.interactive().is_empty());
}

#[test]
fn missing_drive_number_lists_physical_drives() {
    let config = MountConfig {
        physical_drive_num: None,
        ..wsl_config()
    };
    let host = MockHost::default();
    let prompt = MockPrompt::answering("unused");

    let error = mount_volume(&config, Platform::Wsl, &host, &prompt).expect_err("drive required");

    let message = error.to_string();
    assert!(message.contains("PHYSICAL_DRIVE_NUM is not set"));
    assert!(message.contains("Samsung SSD"));
    assert_eq!(host.captured()[0].program, "wmic.exe");
    assert!(host.interactive().is_empty());
}

#[test]
fn listing_mode_runs_lsblk_inside_wsl() {
    let config = MountConfig {
        drive_partition: None,
        ..wsl_config()
    };
    let host = MockHost::default();
    let prompt = MockPrompt::answering("unused");

    let error = mount_volume(&config, Platform::Wsl, &host, &prompt).expect_err("listing mode");
    assert!(matches!(error, MountError::PartitionUnresolved { .. }));

    let captured = host.captured();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].args[0], "--mount");
    assert_eq!(captured[1].program, "wsl");
    assert_eq!(captured[1].args[0], "lsblk");
    assert!(host.interactive().is_empty());
}
