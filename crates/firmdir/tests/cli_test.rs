//! Integration tests for the `firmdir` binary.
//!
//! Argument parsing, help output, completions, and error handling run
//! without a backend; the end-to-end listing and registration flows run
//! against a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `firmdir` binary with env isolation.
///
/// Clears all `FIRMDIR_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn firmdir_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("firmdir");
    cmd.env("HOME", "/tmp/firmdir-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/firmdir-cli-test-nonexistent")
        .env_remove("FIRMDIR_BACKEND_URL")
        .env_remove("FIRMDIR_OUTPUT")
        .env_remove("FIRMDIR_INSECURE")
        .env_remove("FIRMDIR_TIMEOUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn companies_body() -> serde_json::Value {
    json!([
        {
            "id": "1",
            "companyName": "Tech Solutions",
            "companyITIN": 12_345_678_u64,
            "phone": 1_112_223_333_u64,
            "country": "USA",
            "email": "contact@techsolutions.com"
        },
        {
            "id": "2",
            "companyName": "Global Trade",
            "companyITIN": 87_654_321_u64,
            "phone": 4_445_556_666_u64,
            "country": "UK",
            "email": "info@globaltrade.co.uk"
        }
    ])
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = firmdir_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    firmdir_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("company directory")
            .and(predicate::str::contains("companies"))
            .and(predicate::str::contains("about")),
    );
}

#[test]
fn test_version_flag() {
    firmdir_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("firmdir"));
}

#[test]
fn test_about() {
    firmdir_cmd()
        .arg("about")
        .assert()
        .success()
        .stdout(predicate::str::contains("About firmdir").and(predicate::str::contains("Backend")));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    firmdir_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_prints_a_path() {
    firmdir_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_prints_defaults() {
    firmdir_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[backend]")
                .and(predicate::str::contains("http://localhost:4000")),
        );
}

// ── Bad input ───────────────────────────────────────────────────────

#[test]
fn test_invalid_backend_url_is_a_usage_error() {
    let output = firmdir_cmd()
        .args(["--backend-url", "not a url", "companies", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("Configuration error"),
        "Expected config error in:\n{text}"
    );
}

#[test]
fn test_add_with_invalid_email_fails_validation() {
    // Validation rejects before any request: no backend needed.
    let output = firmdir_cmd()
        .args([
            "--backend-url",
            "http://127.0.0.1:9",
            "companies",
            "add",
            "--name",
            "Acme Imports",
            "--itin",
            "55667788",
            "--phone",
            "9998887777",
            "--country",
            "Canada",
            "--email",
            "not-an-email",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected validation exit code");
    let text = combined_output(&output);
    assert!(text.contains("Invalid email"), "Expected message in:\n{text}");
}

#[test]
fn test_add_with_short_name_reports_field() {
    let output = firmdir_cmd()
        .args([
            "--backend-url",
            "http://127.0.0.1:9",
            "companies",
            "add",
            "--name",
            "A",
            "--itin",
            "1",
            "--phone",
            "2",
            "--country",
            "Canada",
            "--email",
            "a@b.co",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("name: Company name must be at least 2 characters"));
}

// ── End-to-end against a mock backend ───────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_renders_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(companies_body()))
        .mount(&server)
        .await;

    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        firmdir_cmd()
            .args(["--backend-url", &uri, "companies", "list"])
            .assert()
    })
    .await
    .unwrap();

    assert.success().stdout(
        predicate::str::contains("Tech Solutions")
            .and(predicate::str::contains("Global Trade"))
            .and(predicate::str::contains("Country")),
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_plain_emits_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(companies_body()))
        .mount(&server)
        .await;

    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        firmdir_cmd()
            .args(["--backend-url", &uri, "-o", "plain", "companies", "list"])
            .assert()
    })
    .await
    .unwrap();

    assert.success().stdout(predicate::str::diff("1\n2\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_list_prints_friendly_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        firmdir_cmd()
            .args(["--backend-url", &uri, "companies", "list"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("No companies found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_posts_then_shows_directory() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/companies"))
        .and(body_json(json!({
            "companyName": "Acme Imports",
            "companyITIN": 55_667_788_u64,
            "phone": 9_998_887_777_u64,
            "country": "Canada",
            "email": "hello@acmeimports.ca"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(companies_body()))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        firmdir_cmd()
            .args([
                "--backend-url",
                &uri,
                "companies",
                "add",
                "--name",
                "Acme Imports",
                "--itin",
                "55667788",
                "--phone",
                "9998887777",
                "--country",
                "Canada",
                "--email",
                "hello@acmeimports.ca",
            ])
            .assert()
    })
    .await
    .unwrap();

    // Registration lands on the directory view afterwards.
    assert
        .success()
        .stderr(predicate::str::contains("Company registered"))
        .stdout(predicate::str::contains("Tech Solutions"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_no_list_skips_directory() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    // No GET mock: reaching the listing would fail the command.
    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        firmdir_cmd()
            .args([
                "--backend-url",
                &uri,
                "companies",
                "add",
                "--no-list",
                "--name",
                "Acme Imports",
                "--itin",
                "55667788",
                "--phone",
                "9998887777",
                "--country",
                "Canada",
                "--email",
                "hello@acmeimports.ca",
            ])
            .assert()
    })
    .await
    .unwrap();

    assert.success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_backend_failure_surfaces_error_and_skips_directory() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/companies"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "registry offline" })),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        firmdir_cmd()
            .args([
                "--backend-url",
                &uri,
                "companies",
                "add",
                "--name",
                "Acme Imports",
                "--itin",
                "55667788",
                "--phone",
                "9998887777",
                "--country",
                "Canada",
                "--email",
                "hello@acmeimports.ca",
            ])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    // A failed registration must not navigate to the listing.
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("registry offline"), "Expected backend message in:\n{text}");
    assert!(!text.contains("Tech Solutions"));
}
