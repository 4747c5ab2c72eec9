use assert_cmd::Command;
use predicates::prelude::*;

/// Test CLI help output
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("mcp-server-timezone").unwrap();
    let assert = cmd.arg("--help").assert();

    assert
        .success()
        .stdout(predicate::str::contains("timezone"));
}

/// Test CLI version output
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("mcp-server-timezone").unwrap();
    let assert = cmd.arg("--version").assert();

    assert.success();
}

/// Test that a bad lookup base URL is rejected at startup
#[test]
fn test_cli_rejects_invalid_geo_api_url() {
    let mut cmd = Command::cargo_bin("mcp-server-timezone").unwrap();
    let assert = cmd.args(["--geo-api-url", "not a url"]).assert();

    assert.failure();
}
