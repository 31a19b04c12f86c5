use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const UNREACHABLE_HOST: &str = "http://127.0.0.1:9";

/// Command isolated from the user's environment: temp cache, temp config
fn pubapi(temp: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pubapi"));
    cmd.arg("--cache-dir")
        .arg(temp.join("cache"))
        .arg("--config")
        .arg(temp.join("config.yaml"))
        .env_remove("PUBAPI_API_HOST")
        .env_remove("PUBAPI_FORMAT")
        .env_remove("PUBAPI_CONFIG")
        .env_remove("PUBAPI_CACHE_DIR")
        .env_remove("PUBAPI_DEBUG")
        .env_remove("RUST_LOG");
    cmd
}

fn entries_body(count: usize) -> String {
    let entries: Vec<Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "API": format!("Api {:02}", i),
                "Description": format!("Endpoint number {}", i),
                "Auth": if i % 2 == 0 { "apiKey" } else { "" },
                "HTTPS": true,
                "Cors": "unknown",
                "Link": format!("https://example.com/{}", i),
                "Category": if i % 3 == 0 { "Animals" } else { "Books" },
            })
        })
        .collect();
    Value::Array(entries).to_string()
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn cache_entry_count(temp: &Path) -> u64 {
    let output = pubapi(temp)
        .args(["cache", "status", "--format", "json"])
        .output()
        .expect("cache status should run");
    stdout_json(&output)["entries"]
        .as_u64()
        .expect("entries should be a number")
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    pubapi(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn completion_generates_bash_script() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    pubapi(temp.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pubapi"));
    Ok(())
}

#[test]
fn cache_path_honors_cache_dir_flag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let expected = temp.path().join("cache").join("catalog.db");

    pubapi(temp.path())
        .args(["cache", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().to_string()));
    Ok(())
}

#[test]
fn cache_status_on_fresh_cache() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let output = pubapi(temp.path())
        .args(["cache", "status", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["entries"], 0);
    assert_eq!(json["capacity"], 40);
    Ok(())
}

#[test]
fn offline_list_on_empty_cache() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    pubapi(temp.path())
        .args(["list", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found."));
    Ok(())
}

#[test]
fn list_survives_unreachable_host() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let output = pubapi(temp.path())
        .args(["--api-host", UNREACHABLE_HOST, "list", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not reach the catalog"));

    let json = stdout_json(&output);
    assert_eq!(json["data"], Value::Array(vec![]));
    assert_eq!(json["meta"]["source"], "cache");
    Ok(())
}

#[test]
fn dashboard_fails_without_network() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    pubapi(temp.path())
        .args(["--api-host", UNREACHABLE_HOST, "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn invalid_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    std::fs::write(temp.path().join("config.yaml"), "timeout_secs: 0\n")?;

    pubapi(temp.path())
        .args(["list", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
    Ok(())
}

#[test]
fn status_shows_defaults_without_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    pubapi(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("Cache is empty"));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn list_caches_at_most_forty_entries() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _entries = server
        .mock("GET", "/entries.json")
        .with_status(200)
        .with_body(entries_body(45))
        .create();
    let _categories = server
        .mock("GET", "/categories.json")
        .with_status(200)
        .with_body(r#"{"categories": ["Animals", "Books"]}"#)
        .create();

    let temp = tempdir()?;
    let output = pubapi(temp.path())
        .args(["--api-host", &server.url(), "list", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["meta"]["source"], "network");

    // No filter: the visible list is read back from the bounded cache
    let data = json["data"].as_array().expect("data should be an array");
    assert_eq!(data.len(), 40);
    assert_eq!(data[0]["name"], "Api 00");
    assert_eq!(cache_entry_count(temp.path()), 40);
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn filtered_list_shows_every_match() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _entries = server
        .mock("GET", "/entries.json")
        .with_status(200)
        .with_body(entries_body(45))
        .create();
    let _categories = server
        .mock("GET", "/categories.json")
        .with_status(200)
        .with_body(r#"{"categories": ["Animals", "Books"]}"#)
        .create();

    let temp = tempdir()?;
    let output = pubapi(temp.path())
        .args(["--api-host", &server.url(), "list", "--name", "API", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["data"].as_array().map(Vec::len), Some(45));
    assert_eq!(cache_entry_count(temp.path()), 40);
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn category_filter_is_sent_to_server() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let filtered = server
        .mock("GET", "/entries.json")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("orderBy".into(), "\"Category\"".into()),
            mockito::Matcher::UrlEncoded("equalTo".into(), "\"Animals\"".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"3": {"API": "Dogs", "Description": "Dog pictures", "Auth": "",
                "HTTPS": true, "Cors": "yes", "Link": "https://dog.ceo", "Category": "Animals"}}"#,
        )
        .expect(1)
        .create();
    let _categories = server
        .mock("GET", "/categories.json")
        .with_status(200)
        .with_body(r#"{"categories": ["Animals", "Books"]}"#)
        .create();

    let temp = tempdir()?;
    pubapi(temp.path())
        .args(["--api-host", &server.url(), "list", "--category", "Animals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dogs"));

    filtered.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn stale_cache_shown_when_refresh_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _entries = server
        .mock("GET", "/entries.json")
        .with_status(200)
        .with_body(entries_body(5))
        .create();
    let _categories = server
        .mock("GET", "/categories.json")
        .with_status(200)
        .with_body(r#"{"categories": ["Animals", "Books"]}"#)
        .create();

    let temp = tempdir()?;
    pubapi(temp.path())
        .args(["--api-host", &server.url(), "list"])
        .assert()
        .success();

    let output = pubapi(temp.path())
        .args(["--api-host", UNREACHABLE_HOST, "list", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["meta"]["source"], "cache");
    assert_eq!(json["data"].as_array().map(Vec::len), Some(5));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn dashboard_groups_by_category() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _entries = server
        .mock("GET", "/entries.json")
        .with_status(200)
        .with_body(entries_body(6))
        .create();
    let _categories = server
        .mock("GET", "/categories.json")
        .with_status(200)
        .with_body(r#"{"categories": ["Animals", "Books", "Weather"]}"#)
        .create();

    let temp = tempdir()?;
    let output = pubapi(temp.path())
        .args(["--api-host", &server.url(), "dashboard", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let json = stdout_json(&output);
    let sections = json["data"].as_array().expect("data should be an array");

    // Weather has no entries and is left out
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["category"], "Animals");
    assert_eq!(sections[0]["count"], 2);
    assert_eq!(sections[1]["category"], "Books");
    assert_eq!(sections[1]["count"], 4);
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn cache_clear_empties_the_cache() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _entries = server
        .mock("GET", "/entries.json")
        .with_status(200)
        .with_body(entries_body(3))
        .create();
    let _categories = server
        .mock("GET", "/categories.json")
        .with_status(200)
        .with_body(r#"{"categories": ["Animals", "Books"]}"#)
        .create();

    let temp = tempdir()?;
    pubapi(temp.path())
        .args(["--api-host", &server.url(), "list"])
        .assert()
        .success();
    assert_eq!(cache_entry_count(temp.path()), 3);

    pubapi(temp.path())
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 3 cached entries"));
    assert_eq!(cache_entry_count(temp.path()), 0);
    Ok(())
}
