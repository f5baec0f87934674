//! Offline smoke tests for the `tiq` binary: argument parsing,
//! configuration errors, and client-side validation. Nothing here
//! talks to a real store or classification service.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// A `tiq` invocation with config and env isolated from the host.
fn tiq_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tiq"));
    cmd.env("HOME", config_home);
    cmd.env("XDG_CONFIG_HOME", config_home.join(".config"));
    cmd.env_remove("TIQ_API_URL");
    cmd.env_remove("TIQ_STORE_URL");
    cmd.env_remove("TIQ_STORE_KEY");
    cmd.env_remove("FORMAT");
    cmd.env_remove("RUST_BACKTRACE");
    cmd.env("TIQ_LOG", "error");
    cmd
}

#[test]
fn help_lists_every_subcommand() {
    let dir = TempDir::new().unwrap();
    tiq_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("trends"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn subcommand_help_carries_examples() {
    let dir = TempDir::new().unwrap();
    tiq_cmd(dir.path())
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXAMPLES:"))
        .stdout(predicate::str::contains("--filter"));
}

#[test]
fn version_flag_reports_version() {
    let dir = TempDir::new().unwrap();
    tiq_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tiq"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    tiq_cmd(dir.path())
        .args(["list", "--no-such-flag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--no-such-flag"));
}

#[test]
fn missing_subcommand_prints_usage() {
    let dir = TempDir::new().unwrap();
    tiq_cmd(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn list_without_store_url_explains_how_to_configure() {
    let dir = TempDir::new().unwrap();
    tiq_cmd(dir.path())
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ticket store not configured"))
        .stderr(predicate::str::contains("TIQ_STORE_URL"));
}

#[test]
fn stats_without_store_url_fails_the_same_way() {
    let dir = TempDir::new().unwrap();
    tiq_cmd(dir.path())
        .args(["stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ticket store not configured"));
}

#[test]
fn store_error_is_json_when_json_requested() {
    let dir = TempDir::new().unwrap();
    let output = tiq_cmd(dir.path())
        .args(["trends", "--json"])
        .output()
        .expect("trends should not crash");
    assert!(!output.status.success());

    // Stderr carries the JSON error object followed by anyhow's
    // terminal `Error:` line; parse up to the closing brace.
    let stderr = String::from_utf8_lossy(&output.stderr);
    let end = stderr.rfind('}').expect("JSON object on stderr");
    let parsed: serde_json::Value =
        serde_json::from_str(&stderr[..=end]).expect("stderr should carry a JSON error object");
    assert_eq!(
        parsed["error"]["error_code"],
        serde_json::Value::String("store_unconfigured".into())
    );
}

#[test]
fn create_rejects_blank_description_without_a_network() {
    let dir = TempDir::new().unwrap();
    tiq_cmd(dir.path())
        .args(["create", "--description", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("description must not be empty"));
}

#[test]
fn analyze_rejects_blank_text_without_a_network() {
    let dir = TempDir::new().unwrap();
    tiq_cmd(dir.path())
        .args(["analyze", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("text must not be empty"));
}

#[test]
fn create_accepts_unknown_category_vocabulary() {
    // Unknown category strings must parse (the enum carries a
    // catch-all); the command then fails on the unreachable service,
    // not on argument parsing.
    let dir = TempDir::new().unwrap();
    tiq_cmd(dir.path())
        .env("TIQ_API_URL", "http://192.0.2.1:1")
        .args([
            "create",
            "--description",
            "Consulta legal",
            "--category",
            "reclamos legales",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreachable"));
}

#[test]
fn config_file_store_url_is_honored() {
    // A configured store URL gets past the unconfigured check and
    // fails on the (unroutable) network instead.
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join(".config/tiq");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[store]\nurl = \"http://192.0.2.1:1\"\n",
    )
    .unwrap();

    tiq_cmd(dir.path())
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load tickets"));
}

#[test]
fn malformed_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join(".config/tiq");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "store = 'not a table'").unwrap();

    tiq_cmd(dir.path())
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}
