use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tiered_data::error::ApiError;
use tiered_data::tooling::cli::{Cli, CliContext, Commands, SyntheticPreset};

const CONFIG: &str = r#"
[local]
root = "."

[entities.meeting-actions]
files = ["transcript.txt", "actions.json"]
description = "Meeting notes and extracted actions"

[entities.invoice-anomalies]
files = ["invoices.csv"]
"#;

/// Workspace with a config file and one local transcript.
fn workspace() -> (TempDir, PathBuf, CliContext) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("workspace");
    let data = root.join("data").join("meeting-actions");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("transcript.txt"), "minutes").unwrap();
    let config_path = root.join("tiered-data.toml");
    fs::write(&config_path, CONFIG).unwrap();

    let context = CliContext::new(root.clone(), Some(config_path)).unwrap();
    (temp, root, context)
}

fn resolve(entity: &str, file: &str) -> Commands {
    Commands::Resolve {
        entity: entity.to_string(),
        file: file.to_string(),
        format: "json".to_string(),
        fallback: None,
        synthetic_rows: None,
        preset: SyntheticPreset::Generic,
        seed: 0,
    }
}

#[tokio::test]
async fn resolve_json_contract_for_local_hit() {
    let (_temp, root, context) = workspace();

    let output = context
        .execute(&resolve("meeting-actions", "transcript.txt"))
        .await
        .unwrap();

    assert!(output.success);
    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["data"], "minutes");
    let source = parsed["source"].as_str().unwrap();
    assert!(source.starts_with(&root.display().to_string()), "{source}");
    assert!(source.ends_with("transcript.txt"), "{source}");
    assert!(parsed.get("error").is_none());
}

#[tokio::test]
async fn resolve_json_contract_for_synthetic_rows() {
    let (_temp, _root, context) = workspace();

    let output = context
        .execute(&Commands::Resolve {
            entity: "invoice-anomalies".to_string(),
            file: "invoices.csv".to_string(),
            format: "json".to_string(),
            fallback: None,
            synthetic_rows: Some(5),
            preset: SyntheticPreset::Invoices,
            seed: 11,
        })
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed["source"], "synthetic");
    let rows = parsed["data"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows[0].get("vendor").is_some());
}

#[tokio::test]
async fn unresolved_file_marks_output_unsuccessful() {
    let (_temp, _root, context) = workspace();

    let output = context
        .execute(&resolve("unknown-agent", "x.csv"))
        .await
        .unwrap();

    assert!(!output.success);
    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed["success"], false);
    assert_eq!(parsed["source"], "not-found");
    assert_eq!(parsed["error"], "Unknown entity: unknown-agent");
}

#[tokio::test]
async fn batch_json_contract_has_summary() {
    let (_temp, _root, context) = workspace();

    let output = context
        .execute(&Commands::Batch {
            entity: "meeting-actions".to_string(),
            format: "json".to_string(),
        })
        .await
        .unwrap();

    assert!(!output.success);
    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed["entity_id"], "meeting-actions");
    assert_eq!(parsed["summary"]["attempted"], 2);
    assert_eq!(parsed["summary"]["succeeded"], 1);
    assert_eq!(parsed["results"]["transcript.txt"]["success"], true);
    assert_eq!(parsed["results"]["actions.json"]["source"], "error");
}

#[tokio::test]
async fn entities_json_lists_registered_entities() {
    let (_temp, _root, context) = workspace();

    let output = context
        .execute(&Commands::Entities {
            format: "json".to_string(),
        })
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    let ids: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["entity_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["invoice-anomalies", "meeting-actions"]);
    assert_eq!(parsed[1]["remote_folder"], "meeting-actions");
}

#[tokio::test]
async fn validate_flags_unreachable_entities() {
    let (_temp, _root, context) = workspace();

    let output = context.execute(&Commands::Validate).await.unwrap();

    assert!(!output.success);
    assert!(output.text.contains("remote (not configured)"));
    assert!(output.text.contains("entity 'invoice-anomalies'"));
    assert!(output.text.contains("Total: 3 checked, 2 valid."));
}

#[tokio::test]
async fn unsupported_format_is_rejected() {
    let (_temp, _root, context) = workspace();

    let err = context
        .execute(&Commands::Entities {
            format: "xml".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidRequest(_)));
}

#[test]
fn half_configured_remote_is_a_startup_error() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("tiered-data.toml");
    fs::write(&config_path, "[remote]\nowner = \"acme\"\n").unwrap();

    let result = CliContext::new(temp.path().to_path_buf(), Some(config_path));

    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["tiered-data", "entities"],
        vec!["tiered-data", "validate"],
        vec!["tiered-data", "batch", "meeting-actions", "--format", "json"],
        vec!["tiered-data", "resolve", "meeting-actions", "transcript.txt"],
        vec![
            "tiered-data",
            "resolve",
            "invoice-anomalies",
            "invoices.csv",
            "--synthetic-rows",
            "20",
            "--preset",
            "invoices",
            "--seed",
            "7",
        ],
        vec![
            "tiered-data",
            "--workspace",
            "/tmp/ws",
            "--log-level",
            "debug",
            "resolve",
            "e",
            "a.json",
            "--fallback",
            "{\"k\": 1}",
        ],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_conflicting_fallbacks() {
    let parsed = Cli::try_parse_from([
        "tiered-data",
        "resolve",
        "e",
        "a.csv",
        "--fallback",
        "[]",
        "--synthetic-rows",
        "3",
    ]);
    assert!(parsed.is_err());

    let parsed = Cli::try_parse_from(["tiered-data", "resolve", "e", "a.csv", "--preset", "bogus"]);
    assert!(parsed.is_err());
}
