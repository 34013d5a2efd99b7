#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes a config pointing the client at `server` with no pacing delays.
fn write_config(dir: &Path, server: &MockServer, max_attempts: u32) {
    let content = format!(
        "[api]\nendpoint = \"{}/\"\nmin_interval_ms = 0\n\
         max_attempts = {max_attempts}\nbase_delay_ms = 1\n",
        server.uri()
    );
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

fn page_body(titles: &[(u64, &str)]) -> serde_json::Value {
    let media: Vec<serde_json::Value> = titles
        .iter()
        .map(|(id, title)| json!({ "id": id, "title": { "romaji": title }, "averageScore": 80 }))
        .collect();
    json!({
        "data": {
            "Page": {
                "pageInfo": {
                    "total": media.len(),
                    "currentPage": 1,
                    "lastPage": 1,
                    "hasNextPage": false,
                    "perPage": 20
                },
                "media": media
            }
        }
    })
}

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("anidex");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("seasonal"))
        .stdout(predicate::str::contains("theme"));
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("anidex");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--studio"))
        .stdout(predicate::str::contains("--pages"));
}

#[test]
fn test_search_rejects_unknown_format() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("anidex");
    cmd.args(["search", "--format", "radio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown media format: radio"));
}

#[test]
fn test_show_requires_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("anidex");
    cmd.arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<ID>"));
}

#[test]
fn test_theme_defaults_to_light() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("anidex");
    cmd.env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light"));
}

#[test]
fn test_theme_set_and_toggle_persist() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    cargo_bin_cmd!("anidex")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .args(["theme", "set", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to dark"));
    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();

    // Assert
    assert!(saved.contains("theme = \"dark\""));
    cargo_bin_cmd!("anidex")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to light"));
}

#[tokio::test]
async fn test_show_not_found_is_not_an_error() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "id": 999_999 } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "Media": null } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server, 3);

    // Act & Assert
    cargo_bin_cmd!("anidex")
        .env_remove("RUST_LOG")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .arg("--dir")
        .arg(dir.path())
        .args(["show", "999999", "--details"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Media 999999 not found"));
}

#[tokio::test]
async fn test_upstream_error_exits_with_message() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "errors": [{ "message": "Invalid token" }] })),
        )
        .expect(2)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server, 2);

    // Act & Assert
    cargo_bin_cmd!("anidex")
        .env_remove("RUST_LOG")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .arg("--dir")
        .arg(dir.path())
        .args(["top"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid token"))
        .stderr(predicate::str::contains("Caused by").not());
}

#[tokio::test]
async fn test_home_lists_anime_and_manga() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "type": "ANIME", "perPage": 10 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[(1, "Cowboy Bebop")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "type": "MANGA", "perPage": 10 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[(30002, "Berserk")])))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server, 1);

    // Act & Assert
    cargo_bin_cmd!("anidex")
        .env_remove("RUST_LOG")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .arg("--dir")
        .arg(dir.path())
        .arg("home")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top Anime"))
        .stdout(predicate::str::contains("Cowboy Bebop"))
        .stdout(predicate::str::contains("Top Manga"))
        .stdout(predicate::str::contains("Berserk"));
}

#[tokio::test]
async fn test_search_with_studio_sends_studio_query() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "search": "Kyoto Animation", "type": "ANIME", "page": 1 }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_body(&[(21827, "Violet Evergarden")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server, 1);

    // Act & Assert
    cargo_bin_cmd!("anidex")
        .env_remove("RUST_LOG")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .arg("--dir")
        .arg(dir.path())
        .args(["search", "--studio", "Kyoto Animation", "--genre", "Drama"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Violet Evergarden"));
}
