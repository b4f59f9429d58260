use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tiered_data::error::ApiError;
use tiered_data::synthetic::SyntheticFallback;
use tiered_data::types::SourceTag;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::support::{
    coordinates_for, counted_chain, entity_in, raw_path, resolver_with, write_local,
};

const FILES: [&str; 3] = ["transcript.txt", "actions.json", "attendees.csv"];

async fn mixed_sources() -> (TempDir, MockServer) {
    let temp = TempDir::new().unwrap();
    write_local(temp.path(), "meeting-actions", "transcript.txt", "minutes");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(raw_path("meeting-actions", "actions.json")))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"actions": 2}"#))
        .mount(&server)
        .await;
    (temp, server)
}

#[tokio::test]
async fn batch_resolves_each_file_independently() {
    let (temp, server) = mixed_sources().await;
    let (chain, _) = counted_chain(coordinates_for(&server));
    let resolver = resolver_with(vec![entity_in(temp.path(), "meeting-actions", &FILES)], chain);

    let batch = resolver
        .resolve_all("meeting-actions", &HashMap::new())
        .await
        .unwrap();

    assert_eq!(batch.summary.attempted, 3);
    assert_eq!(batch.summary.succeeded, 2);
    assert_eq!(batch.summary.failed(), 1);

    let transcript = batch.get("transcript.txt").unwrap();
    assert!(transcript.source().is_local());
    assert_eq!(transcript.data(), Some(&json!("minutes")));

    let actions = batch.get("actions.json").unwrap();
    assert_eq!(actions.source(), &SourceTag::RemoteRaw);
    assert_eq!(actions.data(), Some(&json!({ "actions": 2 })));

    let attendees = batch.get("attendees.csv").unwrap();
    assert!(!attendees.is_success());
    assert_eq!(attendees.source(), &SourceTag::Error);
}

#[tokio::test]
async fn batch_fallbacks_apply_per_file() {
    let (temp, server) = mixed_sources().await;
    let (chain, _) = counted_chain(coordinates_for(&server));
    let resolver = resolver_with(vec![entity_in(temp.path(), "meeting-actions", &FILES)], chain);

    let mut fallbacks = HashMap::new();
    fallbacks.insert(
        "attendees.csv".to_string(),
        SyntheticFallback::value(json!([{ "name": "placeholder" }])),
    );
    // Never used: the transcript resolves locally.
    fallbacks.insert(
        "transcript.txt".to_string(),
        SyntheticFallback::value(json!("unused")),
    );

    let batch = resolver
        .resolve_all("meeting-actions", &fallbacks)
        .await
        .unwrap();

    assert_eq!(batch.summary.succeeded, 3);
    assert_eq!(
        batch.get("attendees.csv").unwrap().source(),
        &SourceTag::Synthetic
    );
    assert_eq!(
        batch.get("transcript.txt").unwrap().data(),
        Some(&json!("minutes"))
    );
}

#[tokio::test]
async fn batch_for_unknown_entity_is_an_error() {
    let server = MockServer::start().await;
    let (chain, counters) = counted_chain(coordinates_for(&server));
    let resolver = resolver_with(Vec::new(), chain);

    let err = resolver
        .resolve_all("unknown-agent", &HashMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::UnknownEntity(id) if id == "unknown-agent"));
    assert_eq!(counters.local.get(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_resolutions_do_not_interfere() {
    let (temp, server) = mixed_sources().await;
    let (chain, _) = counted_chain(coordinates_for(&server));
    let resolver = Arc::new(resolver_with(
        vec![entity_in(temp.path(), "meeting-actions", &FILES)],
        chain,
    ));

    let mut handles = Vec::new();
    for round in 0..8 {
        for file in FILES {
            let resolver = resolver.clone();
            handles.push(tokio::spawn(async move {
                let request = resolver
                    .request("meeting-actions", file)
                    .with_synthetic(json!({ "round": round }));
                (file, round, resolver.resolve(&request).await)
            }));
        }
    }

    for handle in handles {
        let (file, round, result) = handle.await.unwrap();
        assert!(result.is_success());
        match file {
            "transcript.txt" => assert_eq!(result.data(), Some(&json!("minutes"))),
            "actions.json" => assert_eq!(result.data(), Some(&json!({ "actions": 2 }))),
            _ => assert_eq!(result.data(), Some(&json!({ "round": round }))),
        }
    }
}
