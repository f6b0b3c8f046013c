//! End-to-end tests of the `forge-hooks` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn forge_hooks() -> Command {
    let mut cmd = Command::cargo_bin("forge-hooks").unwrap();
    cmd.env_remove("FORGE_HOOKS_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn signature(secret: &str, body: &str) -> String {
    let output = forge_hooks()
        .args(["sign", "--secret", secret, "--body", "-"])
        .write_stdin(body)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn test_help_lists_commands() {
    forge_hooks()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("check-config"));
}

#[test]
fn test_sign_reads_stdin() {
    forge_hooks()
        .args(["sign", "--secret", "Jefe", "--body", "-"])
        .write_stdin("what do ya want for nothing?")
        .assert()
        .success()
        .stdout("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843\n");
}

#[test]
fn test_events_lists_gitlab_hooks() {
    forge_hooks()
        .args(["events", "--provider", "gitlab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("System Hook\tSystemHookPayload"))
        .stdout(predicate::str::contains("Job Hook\tJobEventPayload"));
}

#[test]
fn test_parse_github_delivery_from_stdin() {
    let body = r#"{"zen":"Keep it logically awesome.","hook_id":1}"#;
    let signature_header = format!("X-Hub-Signature-256: sha256={}", signature("s3cr3t", body));

    forge_hooks()
        .args([
            "parse",
            "--provider",
            "github",
            "--secret",
            "s3cr3t",
            "-e",
            "ping",
            "-H",
            "X-GitHub-Event: ping",
            "-H",
            signature_header.as_str(),
            "--body",
            "-",
            "--format",
            "yaml",
        ])
        .write_stdin(body)
        .assert()
        .success()
        .stdout(predicate::str::contains("event: ping"))
        .stdout(predicate::str::contains("zen: Keep it logically awesome."));
}

#[test]
fn test_parse_auth_failure_exit_code() {
    forge_hooks()
        .args([
            "parse",
            "--provider",
            "bitbucket",
            "--hook-uuid",
            "ABC",
            "-e",
            "repo:push",
            "-H",
            "X-Event-Key: repo:push",
            "-H",
            "X-Hook-UUID: WRONG",
            "--body",
            "-",
        ])
        .write_stdin("{}")
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("hook UUID"));
}

#[test]
fn test_parse_unsubscribed_event_exit_code() {
    forge_hooks()
        .args([
            "parse",
            "--provider",
            "gitea",
            "-e",
            "push",
            "-H",
            "X-Gitea-Event: issues",
            "--body",
            "-",
        ])
        .write_stdin("{}")
        .assert()
        .code(2);
}

#[test]
fn test_parse_with_configured_hook() {
    let config = temp_file(
        ".toml",
        r#"
[hooks.ci]
provider = "gitlab"
events = ["Job Hook", "Build Hook"]
secret = { type = "env", var = "FORGE_HOOKS_CLI_TEST_TOKEN" }
"#,
    );

    forge_hooks()
        .env("FORGE_HOOKS_CLI_TEST_TOKEN", "sampleToken!")
        .arg("--config")
        .arg(config.path())
        .args([
            "parse",
            "--hook",
            "ci",
            "-H",
            "X-Gitlab-Event: Job Hook",
            "-H",
            "X-Gitlab-Token: sampleToken!",
            "--body",
            "-",
            "--format",
            "text",
        ])
        .write_stdin(r#"{"object_kind":"build","build_id":42}"#)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "gitlab Build Hook (BuildEventPayload)",
        ));
}

#[test]
fn test_check_config_accepts_valid_file() {
    let config = temp_file(
        ".yaml",
        "hooks:\n  app:\n    provider: github\n    events: [push]\n    secret:\n      type: literal\n      value: s3cr3t\n",
    );

    forge_hooks()
        .arg("check-config")
        .arg("--file")
        .arg(config.path())
        .assert()
        .success()
        .stdout("Configuration OK: 1 hook(s)\n");
}

#[test]
fn test_check_config_show_never_prints_secrets() {
    let config = temp_file(
        ".toml",
        "[hooks.app]\nprovider = \"github\"\nsecret = { type = \"literal\", value = \"s3cr3t\" }\n",
    );

    forge_hooks()
        .arg("--config")
        .arg(config.path())
        .args(["check-config", "--show", "-f", "toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("verifies_credentials = true"))
        .stdout(predicate::str::contains("s3cr3t").not());
}

#[test]
fn test_check_config_reports_invalid_hook() {
    let config = temp_file(
        ".toml",
        "[hooks.registry]\nprovider = \"docker-hub\"\nsecret = { type = \"literal\", value = \"x\" }\n",
    );

    forge_hooks()
        .arg("check-config")
        .arg("--file")
        .arg(config.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("registry"));
}

#[test]
fn test_check_config_without_file() {
    forge_hooks().arg("check-config").assert().code(1);
}
