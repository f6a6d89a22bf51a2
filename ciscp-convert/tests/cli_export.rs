use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ciscp-convert"))
}

#[test]
fn export_renders_api_payloads_to_stdout() {
    let assert = cmd()
        .arg("export")
        .arg(fixture("fixtures/extended-acl.txt"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let export: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(export["layer"], "Core");
    assert_eq!(export["objects"][0]["command"], "add-host");
    assert_eq!(export["objects"][0]["payload"]["name"], "host_10.1.1.1");
    assert_eq!(export["objects"][1]["command"], "add-network");

    // icmp echo maps through the table; the port range has no table entry
    assert_eq!(export["rules"][0]["payload"]["service"], "echo-request");
    assert_eq!(export["skipped_services"], 1);
}

#[test]
fn export_warns_about_unmapped_services() {
    cmd()
        .arg("export")
        .arg(fixture("fixtures/extended-acl.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped for services without a table entry"));
}

#[test]
fn export_writes_output_file() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("payloads.json");

    cmd()
        .arg("export")
        .arg(fixture("fixtures/extended-acl.txt"))
        .arg("--output")
        .arg(&out)
        .arg("--layer")
        .arg("Migration")
        .assert()
        .success();

    let export: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read export")).expect("json");
    assert_eq!(export["layer"], "Migration");
    assert_eq!(export["rules"][0]["payload"]["layer"], "Migration");
}

#[test]
fn export_honors_services_file_override() {
    let dir = tempdir().expect("tempdir");
    let services = dir.path().join("services.toml");
    fs::write(
        &services,
        r#"
[[service]]
proto = "tcp"
port = "443"
name = "tls-custom"

[[icmp]]
type = "echo"
name = "echo-request"
"#,
    )
    .expect("write services");

    let assert = cmd()
        .arg("export")
        .arg(fixture("fixtures/extended-acl.txt"))
        .arg("--services-file")
        .arg(&services)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let export: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    let services: Vec<&str> = export["rules"]
        .as_array()
        .expect("rules")
        .iter()
        .map(|r| r["payload"]["service"].as_str().expect("service"))
        .collect();
    assert!(services.contains(&"tls-custom"));
}

#[test]
fn export_falls_back_to_embedded_table_on_bad_file() {
    let dir = tempdir().expect("tempdir");
    let services = dir.path().join("broken.toml");
    fs::write(&services, "not = [valid").expect("write broken");

    cmd()
        .arg("export")
        .arg(fixture("fixtures/extended-acl.txt"))
        .arg("--services-file")
        .arg(&services)
        .assert()
        .success()
        .stderr(predicate::str::contains("using embedded defaults"));
}
