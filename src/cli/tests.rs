//! Unit tests for CLI commands

use std::io::Write;

use crate::cli::{run, Cli, Commands};
use clap::Parser;
use serde_json::Value;

fn config_file(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

fn run_json(args: &[&str]) -> Value {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    run(cli, &mut out).unwrap();
    serde_json::from_slice(&out).unwrap()
}

const CONFIG: &str = r#"
allowed_origins: ["https://app.example.com"]
allowed_methods: ["GET", "POST"]
allowed_headers: ["Content-Type"]
"#;

#[test]
fn test_show_command_parses() {
    let cli = Cli::try_parse_from(["brrtcors", "show", "--config", "cors.yaml"]).unwrap();
    match cli.command {
        Commands::Show { config } => assert_eq!(config.to_string_lossy(), "cors.yaml"),
        _ => panic!("Expected Show command"),
    }
}

#[test]
fn test_check_command_with_flags() {
    let cli = Cli::try_parse_from([
        "brrtcors",
        "check",
        "-c",
        "cors.yaml",
        "-m",
        "OPTIONS",
        "--origin",
        "https://a.com",
        "--request-method",
        "PUT",
        "--request-headers",
        "X-Token",
    ])
    .unwrap();

    match cli.command {
        Commands::Check {
            method,
            origin,
            request_method,
            request_headers,
            ..
        } => {
            assert_eq!(method, "OPTIONS");
            assert_eq!(origin.as_deref(), Some("https://a.com"));
            assert_eq!(request_method.as_deref(), Some("PUT"));
            assert_eq!(request_headers.as_deref(), Some("X-Token"));
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_check_requires_method() {
    assert!(Cli::try_parse_from(["brrtcors", "check", "--config", "cors.yaml"]).is_err());
}

#[test]
fn test_show_prints_normalized_policy() {
    let file = config_file("allowed_origins: [\"https://A.com\", \"https://*.b.com\"]\n");
    let path = file.path().to_str().unwrap();
    let summary = run_json(&["brrtcors", "show", "--config", path]);
    assert_eq!(summary["allow_all_origins"], false);
    assert_eq!(summary["exact_origins"][0], "https://a.com");
    assert_eq!(summary["wildcard_origins"][0], "https://*.b.com");
    assert_eq!(summary["allowed_methods"], serde_json::json!(["GET", "POST"]));
}

#[test]
fn test_check_granted_preflight() {
    let file = config_file(CONFIG);
    let path = file.path().to_str().unwrap();
    let report = run_json(&[
        "brrtcors",
        "check",
        "--config",
        path,
        "--method",
        "OPTIONS",
        "--origin",
        "https://app.example.com",
        "--request-method",
        "POST",
        "--request-headers",
        "Content-Type",
    ]);
    assert_eq!(report["status"], 200);
    assert_eq!(report["handler_called"], false);
    assert_eq!(report["body"], Value::Null);
    assert_eq!(report["decision"]["outcome"], "granted");
    assert_eq!(
        report["headers"]["access-control-allow-origin"],
        "https://app.example.com"
    );
    assert_eq!(report["headers"]["access-control-allow-methods"], "POST");
}

#[test]
fn test_check_denied_actual_request_still_runs_handler() {
    let file = config_file(CONFIG);
    let path = file.path().to_str().unwrap();
    let report = run_json(&[
        "brrtcors",
        "check",
        "--config",
        path,
        "--method",
        "GET",
        "--origin",
        "https://evil.com",
    ]);
    assert_eq!(report["handler_called"], true);
    assert_eq!(report["body"]["ok"], true);
    assert_eq!(report["decision"]["outcome"], "denied");
    assert_eq!(report["decision"]["reason"]["check"], "origin");
    assert!(report["headers"].get("access-control-allow-origin").is_none());
}

#[test]
fn test_missing_config_is_an_error() {
    let cli = Cli::try_parse_from(["brrtcors", "show", "--config", "/nonexistent/cors.yaml"])
        .unwrap();
    let mut out = Vec::new();
    let err = run(cli, &mut out).unwrap_err();
    assert!(err.to_string().contains("Failed to load CORS config"));
}
