use serde_json::json;
use tempfile::TempDir;
use tiered_data::resolver::ProviderChain;
use tiered_data::types::SourceTag;
use wiremock::MockServer;

use super::support::{coordinates_for, counted_chain, entity_in, resolver_with, write_local};

const TRANSCRIPT: &str = "Ana: ship the parser by Friday.\nLee: I'll review it Monday.\n";

#[tokio::test]
async fn transcript_is_served_verbatim_from_local_storage() {
    let temp = TempDir::new().unwrap();
    let written = write_local(temp.path(), "meeting-actions", "transcript.txt", TRANSCRIPT);
    let server = MockServer::start().await;
    let (chain, counters) = counted_chain(coordinates_for(&server));
    let resolver = resolver_with(
        vec![entity_in(temp.path(), "meeting-actions", &["transcript.txt"])],
        chain,
    );

    let result = resolver
        .resolve(&resolver.request("meeting-actions", "transcript.txt"))
        .await;

    assert!(result.is_success());
    assert_eq!(result.data(), Some(&json!(TRANSCRIPT)));
    assert_eq!(result.source(), &SourceTag::Local(written.clone()));
    assert_eq!(result.source().to_string(), written.display().to_string());
    assert!(result.provenance().is_none());
    assert_eq!(counters.raw.get(), 0);
    assert_eq!(counters.api.get(), 0);
}

#[tokio::test]
async fn later_candidate_answers_when_earlier_is_missing() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("agents").join("meeting-actions").join("data");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("actions.yaml"), "- owner: ana\n  due: friday\n").unwrap();
    let (chain, _) = counted_chain(Default::default());
    let resolver = resolver_with(
        vec![entity_in(temp.path(), "meeting-actions", &["actions.yaml"])],
        chain,
    );

    let result = resolver
        .resolve(&resolver.request("meeting-actions", "actions.yaml"))
        .await;

    assert_eq!(result.source(), &SourceTag::Local(dir.join("actions.yaml")));
    assert_eq!(
        result.data(),
        Some(&json!([{ "owner": "ana", "due": "friday" }]))
    );
}

#[tokio::test]
async fn standard_chain_resolves_relative_candidates_against_root() {
    let temp = TempDir::new().unwrap();
    let written = write_local(
        temp.path(),
        "invoice-anomalies",
        "invoices.tsv",
        "id\tamount\n1\t5\n",
    );
    let chain = ProviderChain::standard(
        &Default::default(),
        Some(temp.path().to_path_buf()),
        reqwest::Client::new(),
    )
    .unwrap();
    let resolver = resolver_with(
        vec![tiered_data::registry::EntityDescriptor::new(
            "invoice-anomalies",
            &["invoices.tsv"],
        )],
        chain,
    );

    let result = resolver
        .resolve(&resolver.request("invoice-anomalies", "invoices.tsv"))
        .await;

    assert_eq!(result.source().to_string(), written.display().to_string());
    assert_eq!(result.data(), Some(&json!([{ "id": "1", "amount": "5" }])));
}

#[tokio::test]
async fn unknown_suffix_returns_raw_text() {
    let temp = TempDir::new().unwrap();
    write_local(temp.path(), "e", "notes.log", "line 1\nline 2");
    let (chain, _) = counted_chain(Default::default());
    let resolver = resolver_with(vec![entity_in(temp.path(), "e", &["notes.log"])], chain);

    let result = resolver.resolve(&resolver.request("e", "notes.log")).await;

    assert_eq!(result.data(), Some(&json!("line 1\nline 2")));
}
