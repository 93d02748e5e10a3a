use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stillcam_cmd() -> Command {
    Command::cargo_bin("stillcam").expect("binary exists")
}

#[test]
fn stillcam_help_prints_usage() {
    stillcam_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "HTTP front-end for a Raspberry Pi still camera",
        ))
        .stdout(predicate::str::contains("--remote"));
}

#[test]
fn missing_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();

    stillcam_cmd()
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn malformed_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[camera\nquality = 80").unwrap();

    stillcam_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn invalid_listen_address_fails_to_bind() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    stillcam_cmd()
        .env("RUST_LOG", "off")
        .arg("--config")
        .arg(&config)
        .arg("--dir")
        .arg(temp.path().join("captures"))
        .args(["--http", "127.0.0.1:99999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to bind to 127.0.0.1:99999"));

    assert!(temp.path().join("captures").is_dir());
}
