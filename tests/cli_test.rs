use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/happy_path.json").arg("--no-delay");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("login ok: softtop@outlook.com"))
        .stdout(predicate::str::contains("stage: validating"))
        .stdout(predicate::str::contains("stage: done"))
        .stdout(predicate::str::contains(
            "summary: total=150.00 available=105.00 difference=45.00 action=recharge",
        ))
        .stdout(predicate::str::contains(
            "payment submitted, pending verification: a1b2c3d4e5f6",
        ))
        .stdout(predicate::str::contains("screen: topup"));

    Ok(())
}

#[test]
fn test_cli_validation_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.json");
    let script = serde_json::json!([
        { "event": "login", "email": "softtop@outlook.com", "password": "softtop.beijing" },
        { "event": "update_link", "index": 0, "field": "url", "value": "https://example.com" },
        { "event": "update_link", "index": 0, "field": "amount", "value": "300" },
        { "event": "submit_links" }
    ]);
    std::fs::write(&path, script.to_string()).unwrap();

    let mut cmd = Command::new(cargo_bin!("topflow"));
    cmd.arg(&path).arg("--no-delay");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("error link[0]: Max $250 per link"))
        .stdout(predicate::str::contains("stage:").not());
}

#[test]
fn test_cli_rejects_bad_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.json");
    let script = serde_json::json!([
        { "event": "login", "email": "softtop@outlook.com", "password": "guess" }
    ]);
    std::fs::write(&path, script.to_string()).unwrap();

    let mut cmd = Command::new(cargo_bin!("topflow"));
    cmd.arg(&path).arg("--no-delay");

    cmd.assert().success().stdout(predicate::str::contains(
        "login failed: Invalid email or password. Please try again.",
    ));
}

#[test]
fn test_cli_malformed_script() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.json");
    std::fs::write(&path, r#"[{"event": "teleport"}]"#).unwrap();

    let mut cmd = Command::new(cargo_bin!("topflow"));
    cmd.arg(&path);

    cmd.assert().failure();
}
