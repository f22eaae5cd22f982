//! Integration tests for the `movesys` CLI binary.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command with env isolation: no `MOVESYS_*` variables leak in
/// and config directories point at an empty temp dir.
fn movesys_cmd(home: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("movesys");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("MOVESYS_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

fn home() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_usage() {
    let home = home();
    let output = movesys_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("Usage"), "{text}");
}

#[test]
fn test_help_lists_domains() {
    let home = home();
    movesys_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("vehicles")
            .and(predicate::str::contains("deliveries"))
            .and(predicate::str::contains("maintenance"))
            .and(predicate::str::contains("dashboard")),
    );
}

#[test]
fn test_vehicles_help_has_fleet_actions() {
    let home = home();
    movesys_cmd(&home)
        .args(["vehicles", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("assign-driver")
                .and(predicate::str::contains("unassign-driver"))
                .and(predicate::str::contains("list")),
        );
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_points_at_toml() {
    let home = home();
    movesys_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_reflects_flags_and_env() {
    let home = home();
    movesys_cmd(&home)
        .env("MOVESYS_DELIVERIES_ENDPOINT_PATH", "/v2/deliveries")
        .args(["--api-url", "https://fleet.example.com", "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("https://fleet.example.com")
                .and(predicate::str::contains("/v2/deliveries"))
                .and(predicate::str::contains("/maintenances")),
        );
}

#[test]
fn test_invalid_api_url_is_usage_error() {
    let home = home();
    movesys_cmd(&home)
        .args(["--api-url", "not a url", "vehicles", "list"])
        .assert()
        .code(2);
}

// ── Against a mock API ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_vehicles_list_plain_prints_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/vehicles"))
        .and(header("authorization", "Bearer cli-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vehicles": [
                { "Id": 7, "Plate": "ABC-123", "Status": "available" },
                { "Id": 9, "Plate": "VAN-001", "Status": "in_use" },
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = home();
    movesys_cmd(&home)
        .args([
            "--api-url",
            &server.uri(),
            "--token",
            "cli-token",
            "-o",
            "plain",
            "vehicles",
            "list",
            "--status",
            "in_use",
        ])
        .assert()
        .success()
        .stdout("9\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_record_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let home = home();
    movesys_cmd(&home)
        .args(["--api-url", &server.uri(), "users", "get", "42"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_session_exits_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/deliveries"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let home = home();
    movesys_cmd(&home)
        .args(["--api-url", &server.uri(), "deliveries", "list"])
        .assert()
        .code(3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboard_warns_about_failed_domain_and_prints_the_rest() {
    let server = MockServer::start().await;
    for (collection, body) in [
        ("/api/v1/users", json!([{ "Id": 1 }, { "Id": 2, "Status": "inactive" }])),
        ("/api/v1/deliveries", json!([{ "Id": 3, "Status": "completed" }])),
        ("/api/v1/fuel-entries", json!([])),
        ("/maintenances", json!([])),
    ] {
        Mock::given(method("GET"))
            .and(path(collection))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/v1/vehicles"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "down" })))
        .expect(1)
        .mount(&server)
        .await;

    let home = home();
    movesys_cmd(&home)
        .args(["--api-url", &server.uri(), "-o", "plain", "dashboard"])
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to load vehicles"))
        .stdout(
            predicate::str::contains("total_users=2")
                .and(predicate::str::contains("inactive_users=1"))
                .and(predicate::str::contains("completed_deliveries=1"))
                .and(predicate::str::contains("fleet_available=0")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboard_server_metrics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalUsers": 14 })))
        .expect(1)
        .mount(&server)
        .await;

    let home = home();
    movesys_cmd(&home)
        .args(["--api-url", &server.uri(), "-o", "plain", "dashboard", "--server"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("total_users=14")
                .and(predicate::str::contains("fleet_available=0")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_is_printed_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/reports/deliveries/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "completed": 12 })))
        .expect(1)
        .mount(&server)
        .await;

    let home = home();
    movesys_cmd(&home)
        .args(["--api-url", &server.uri(), "-o", "plain", "reports", "deliveries"])
        .assert()
        .success()
        .stdout("{\"completed\":12}\n");
}

#[test]
fn test_unknown_report_is_usage_error() {
    let home = home();
    movesys_cmd(&home)
        .args(["reports", "weekly"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("weekly"));
}
