//! End-to-end tests for the `kopi` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A command isolated from the developer's environment and kopi.toml files.
fn kopi(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kopi").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("KOPI_USER_ID")
        .env_remove("KOPI_CONFIG")
        .env_remove("KOPI_API_URL")
        .env_remove("KOPI_API_TOKEN")
        .env_remove("KOPI_TIMEOUT_SECS")
        .env_remove("RUST_LOG")
        .env("KOPI_ENV", "development")
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path());
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    kopi(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recommend"))
        .stdout(predicate::str::contains("facilities"))
        .stdout(predicate::str::contains("distance"));
}

#[test]
fn distance_between_identical_points_is_zero_meters() {
    let dir = TempDir::new().unwrap();
    kopi(&dir)
        .args(["distance", "0", "0", "0", "0"])
        .assert()
        .success()
        .stdout("0 m\n");
}

#[test]
fn distance_accepts_negative_latitudes() {
    let dir = TempDir::new().unwrap();
    kopi(&dir)
        .args(["distance", "-6.1754", "106.8272", "-6.1352", "106.8133"])
        .assert()
        .success()
        .stdout("4.73 km\n");
}

#[test]
fn distance_with_unknown_point_is_unavailable() {
    let dir = TempDir::new().unwrap();
    kopi(&dir)
        .args(["distance", "NaN", "0", "0", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unavailable"));
}

#[test]
fn recommend_without_user_exits_with_session_error() {
    let dir = TempDir::new().unwrap();
    kopi(&dir)
        .env("KOPI_API_URL", "http://127.0.0.1:9")
        .arg("recommend")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No signed-in user"));
}

#[test]
fn json_format_reports_errors_as_json() {
    let dir = TempDir::new().unwrap();
    let output = kopi(&dir)
        .env("KOPI_API_URL", "http://127.0.0.1:9")
        .args(["--format", "json", "recommend"])
        .assert()
        .code(4)
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["code_str"], "E7001");
    assert_eq!(report["category"], "Session");
    assert_eq!(report["message"], "No signed-in user");
}

#[test]
fn zero_top_is_rejected() {
    let dir = TempDir::new().unwrap();
    kopi(&dir)
        .args(["recommend", "--user", "u-1", "--top", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--top"));
}

#[test]
fn missing_explicit_config_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    kopi(&dir)
        .args(["recommend", "--user", "u-1", "--config", "nope.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration file not found"));
}

async fn recommendation_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommendations/u-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"cafe_id": "1", "name": "Kopi Kenangan", "rating": 4.5, "score": 0.9},
                {"cafe_id": "2", "name": "Tuku", "rating": 4.8},
                {"cafe_id": "3", "name": "Fore", "rating": 3.0, "score": 0.99}
            ]
        })))
        .mount(&server)
        .await;

    let details = [
        ("1", -6.1800, 106.8300, json!(["Free Wi-Fi", "Toilet"])),
        ("2", -6.1760, 106.8270, json!(["AC Full Ruangan"])),
        ("3", -6.2500, 106.9000, json!(["Free Wi-Fi"])),
    ];
    for (id, lat, lng, facilities) in details {
        Mock::given(method("GET"))
            .and(path(format!("/cafes/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"latitude": lat, "longitude": lng, "facilities": facilities}
            })))
            .mount(&server)
            .await;
    }

    server
}

fn ids(output: &Value) -> Vec<String> {
    output["cafes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn recommend_json_ranks_by_distance() {
    let server = recommendation_server().await;
    let uri = server.uri();

    let stdout = tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        let out = kopi(&dir)
            .env("KOPI_API_URL", uri)
            .args([
                "recommend",
                "--user",
                "u-1",
                "--lat=-6.1754",
                "--lng=106.8272",
                "--distance",
                "nearest",
                "--format",
                "json",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(out).unwrap()
    })
    .await
    .unwrap();

    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ids(&output), ["2", "1", "3"]);
    assert_eq!(output["user_id"], "u-1");
    assert_eq!(output["location"]["state"], "known");
    assert_eq!(output["degraded"], 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn recommend_json_defaults_to_score_order_without_location() {
    let server = recommendation_server().await;
    let uri = server.uri();

    let stdout = tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        let out = kopi(&dir)
            .env("KOPI_API_URL", uri)
            .env("KOPI_USER_ID", "u-1")
            .args(["recommend", "--distance", "nearest", "--format", "json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(out).unwrap()
    })
    .await
    .unwrap();

    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ids(&output), ["3", "1", "2"]);
    assert_eq!(output["location"]["state"], "unavailable");
}

#[tokio::test(flavor = "multi_thread")]
async fn facilities_lists_sorted_vocabulary() {
    let server = recommendation_server().await;
    let uri = server.uri();

    tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        kopi(&dir)
            .env("KOPI_API_URL", uri)
            .args(["facilities", "--user", "u-1", "--format", "json"])
            .assert()
            .success()
            .stdout("[\"AC Full Ruangan\",\"Free Wi-Fi\",\"Toilet\"]\n");
    })
    .await
    .unwrap();
}
