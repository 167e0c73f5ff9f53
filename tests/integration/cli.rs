//! Binary-level tests: the wrapper must be invisible apart from picking the binary.

#![cfg(unix)]

use crate::common::TestHome;
use predicates::prelude::*;

#[test]
fn test_forwards_exit_code_and_arguments() {
    let home = TestHome::new();
    let out = home.path().join("args.txt");
    home.install_kubectl("1.13.0", &format!("echo \"$@\" > {}\nexit 3", out.display()));

    home.command().args(["get", "pods", "-n", "kube-system", "--help"]).assert().code(3);

    assert_eq!(std::fs::read_to_string(out).unwrap().trim(), "get pods -n kube-system --help");
}

#[test]
fn test_forwards_stdout() {
    let home = TestHome::new();
    home.install_kubectl("1.13.0", "echo fake kubectl 1.13.0");

    home.command()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fake kubectl 1.13.0"));
}

#[test]
fn test_default_version_from_config() {
    let home = TestHome::new();
    home.write_config("default_version = \"v1.9.11\"\nversion_timeout_ms = 300\n");
    home.install_kubectl("1.9.11", "echo picked 1.9.11");

    home.command().assert().success().stdout(predicate::str::contains("picked 1.9.11"));
}

#[test]
fn test_signal_exit_code() {
    let home = TestHome::new();
    home.install_kubectl("1.13.0", "kill -KILL $$");

    home.command().assert().code(128 + 9);
}

#[test]
fn test_switch_upgrade_flag_is_not_forwarded() {
    let home = TestHome::new();
    // Unreachable release API: the update check fails silently
    home.write_config(
        "version_timeout_ms = 300\n[upgrade]\napi_base = \"http://127.0.0.1:9\"\n",
    );
    let out = home.path().join("args.txt");
    home.install_kubectl("1.13.0", &format!("echo \"$@\" > {}", out.display()));

    home.command().args(["--switch-upgrade", "version"]).assert().success();

    assert_eq!(std::fs::read_to_string(out).unwrap().trim(), "version");
}

#[test]
fn test_download_failure_exits_one() {
    let home = TestHome::new();
    home.write_config("version_timeout_ms = 300\nurl_template = \"http://127.0.0.1:9/{version}/{os}/{arch}\"\n");

    home.command()
        .arg("version")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1.13.0"));

    assert!(!home.kubectl_path("1.13.0").exists());
}

#[test]
fn test_invalid_config_exits_one() {
    let home = TestHome::new();
    home.write_config("version_timeout_ms = \"soon\"\n");

    home.command()
        .arg("version")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("kubectl-switch.toml"));
}
