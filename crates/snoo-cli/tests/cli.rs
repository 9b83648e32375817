//! CLI integration tests.
//!
//! Offline commands run directly; listing commands run against a wiremock
//! server standing in for the API host.

mod common;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{assert_success, run_cli, run_cli_success, run_cli_with_api};

fn post(id: &str) -> Value {
    json!({
        "kind": "t3",
        "data": {
            "id": id,
            "name": format!("t3_{}", id),
            "title": format!("post {}", id),
            "subreddit": "rust",
            "author": "ferris",
            "score": 1,
            "is_self": true,
            "edited": false
        }
    })
}

fn listing(children: Vec<Value>, after: Value) -> Value {
    json!({
        "kind": "Listing",
        "data": {"before": null, "after": after, "dist": children.len(), "children": children}
    })
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_async(args: Vec<String>, config_dir: TempDir, base_url: String) -> std::process::Output {
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli_with_api(&args, config_dir.path(), &base_url)
    })
    .await
    .unwrap()
}

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(&["--help"], dir.path());
    assert!(stdout.contains("listing"));
    assert!(stdout.contains("thread"));
    assert!(stdout.contains("query"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_query_top_defaults_time_window() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(&["query", "--sort", "top", "--json"], dir.path());
    let params: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(params["t"], "day");
    assert_eq!(params["limit"], "25");
    assert_eq!(params["after"], "");
    assert_eq!(params["before"], "");
    assert_eq!(params["raw_json"], "1");
    assert!(params.get("g").is_none());
}

#[test]
fn test_query_hot_with_location() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(
        &["query", "--sort", "hot", "--geo", "gb", "--time", "week", "--json"],
        dir.path(),
    );
    let params: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(params["g"], "GB");
    assert!(params.get("t").is_none());
}

#[test]
fn test_query_extra_params_do_not_override() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(
        &[
            "query", "--limit", "50", "--param", "limit=5", "--param", "sr_detail=true", "--json",
        ],
        dir.path(),
    );
    let params: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(params["limit"], "50");
    assert_eq!(params["sr_detail"], "true");
}

#[test]
fn test_config_set_show_path() {
    let dir = TempDir::new().unwrap();

    let path = run_cli_success(&["config", "path"], dir.path());
    assert!(path.trim().ends_with("config.json"));

    run_cli_success(
        &["config", "set", "--limit", "40", "--user-agent", "snoo-tests/1.0"],
        dir.path(),
    );
    assert!(dir.path().join("config.json").exists());

    let shown = run_cli_success(&["config", "show", "--json"], dir.path());
    let config: Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(config["limit"], 40);
    assert_eq!(config["user_agent"], "snoo-tests/1.0");

    // Stored limit feeds the query builder
    let stdout = run_cli_success(&["query", "--json"], dir.path());
    let params: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(params["limit"], "40");
}

#[test]
fn test_config_rejects_plain_http_remote() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(
        &["config", "set", "--base-url", "http://www.reddit.com"],
        dir.path(),
    );
    assert!(!output.status.success());
    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn test_invalid_sort_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["query", "--sort", "sideways"], dir.path());
    assert!(!output.status.success());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_listing_single_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/r/rust/new.json"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing(vec![post("a1"), post("a2")], json!("t3_a2"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let args = argv(&["listing", "--subreddit", "rust", "--sort", "new", "--limit", "2"]);
    let output = run_async(args.clone(), TempDir::new().unwrap(), server.uri()).await;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let items: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["kind"], "t3");
    assert_eq!(items[1]["data"]["id"], "a2");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("t3_a2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_listing_walk_all() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hot.json"))
        .and(query_param("after", ""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing(vec![post("a1")], json!("t3_a1"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hot.json"))
        .and(query_param("after", "t3_a1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing(vec![post("a2")], Value::Null)),
        )
        .mount(&server)
        .await;

    let args = argv(&["listing", "--all"]);
    let output = run_async(args.clone(), TempDir::new().unwrap(), server.uri()).await;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Completed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_listing_walk_failure_keeps_partial_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/r/rust/hot.json"))
        .and(query_param("after", ""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing(vec![post("a1")], json!("t3_a1"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r/rust/hot.json"))
        .and(query_param("after", "t3_a1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let args = argv(&["listing", "--subreddit", "rust", "--all"]);
    let output = run_async(args, TempDir::new().unwrap(), server.uri()).await;

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("page 2"));
}
