//! Binary tests for the cmdrelay CLI

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::{create_script, ECHO_ARGS_SCRIPT};

fn cmdrelay() -> Command {
    let mut cmd = Command::cargo_bin("cmdrelay").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("CMDRELAY_CONFIG");
    cmd
}

#[test]
fn test_run_echo() {
    cmdrelay()
        .args(["run", "/bin/echo", "hello"])
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn test_run_resolves_program_on_path() {
    cmdrelay()
        .args(["run", "echo", "from", "path"])
        .assert()
        .success()
        .stdout("from path\n");
}

#[test]
fn test_run_missing_binary_fails() {
    cmdrelay()
        .args(["run", "/nonexistent/binary"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("could not be launched"));
}

#[test]
fn test_run_json_output() {
    cmdrelay()
        .args(["--format", "json", "run", "/bin/echo", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains("\"output\": \"hi\\n\""));
}

#[test]
fn test_run_json_failure() {
    cmdrelay()
        .args(["--format", "json", "run", "/nonexistent/binary"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing_command"));
}

#[test]
fn test_sub_uses_configured_executable() {
    let (_dir, script) = create_script("xcrun", ECHO_ARGS_SCRIPT);

    cmdrelay()
        .env("CMDRELAY_SUBCOMMAND__EXECUTABLE_PATH", script.to_str().unwrap())
        .args(["sub", "list", "devices"])
        .assert()
        .success()
        .stdout("simctl\nlist\ndevices\n");
}

#[test]
fn test_sub_with_config_file() {
    let (dir, script) = create_script("tool", ECHO_ARGS_SCRIPT);
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[subcommand]\nleading_token = \"devicectl\"\nexecutable_path = \"{}\"\n",
            script.display()
        ),
    )
    .unwrap();

    cmdrelay()
        .args(["--config", config_path.to_str().unwrap(), "sub", "info"])
        .assert()
        .success()
        .stdout("devicectl\ninfo\n");
}

#[test]
fn test_sub_empty_output_policy() {
    let (_dir, script) = create_script("quiet", "#!/bin/sh\nexit 0\n");

    cmdrelay()
        .env("CMDRELAY_SUBCOMMAND__EXECUTABLE_PATH", script.to_str().unwrap())
        .env("CMDRELAY_DISPATCH__EMPTY_OUTPUT_IS_FAILURE", "true")
        .args(["sub", "boot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no output"));
}

#[test]
fn test_config_shows_defaults() {
    cmdrelay()
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leading_token = \"simctl\""));
}

#[test]
fn test_config_json() {
    cmdrelay()
        .args(["--format", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"executable_path\""));
}

#[test]
fn test_verbose_prints_command() {
    cmdrelay()
        .args(["-v", "run", "/bin/echo", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("/bin/echo x"));
}

#[test]
fn test_missing_config_file_fails() {
    cmdrelay()
        .args(["--config", "/nonexistent/config.toml", "sub", "boot"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Config file not found: /nonexistent/config.toml"));
}

#[test]
fn test_missing_config_file_from_env_fails() {
    cmdrelay()
        .env("CMDRELAY_CONFIG", "/nonexistent/config.toml")
        .args(["config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
