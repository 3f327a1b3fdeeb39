use e2e_tests::test_utils::unused_url;
use e2e_tests::{MockNode, NodeOptions};
use sdk::{Client, ClientConfig, ClientError};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_missing_resources_are_not_found() {
    let node = MockNode::start().unwrap();
    let client = node.client().unwrap();
    let dir = TempDir::new().unwrap();

    let err = client.download("deadbeef", dir.path(), None).unwrap_err();
    assert!(matches!(err, ClientError::NotFound { ref id } if id == "deadbeef"));
    assert!(!dir.path().join("deadbeef").exists());

    let err = client.file_info("deadbeef").unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
    assert_eq!(err.status(), Some(404));

    let err = client.zk_proof("deadbeef").unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
}

#[test]
fn test_disabled_zkp_is_distinct() {
    let node = MockNode::start_with(NodeOptions {
        zkp_enabled: false,
        ..NodeOptions::default()
    })
    .unwrap();
    let client = node.client().unwrap();

    let err = client.zk_proof("abc").unwrap_err();
    assert!(matches!(err, ClientError::ZkpDisabled));
    assert!(err.is_warning());
    assert_eq!(err.status(), Some(501));
}

#[test]
fn test_degraded_health_is_reported_not_failed() {
    let node = MockNode::start_with(NodeOptions {
        degraded: true,
        ..NodeOptions::default()
    })
    .unwrap();
    let client = node.client().unwrap();

    let health = client.health().unwrap();
    assert!(!health.is_healthy());
    assert_eq!(health.status, "degraded");
    assert_eq!(health.components.get("blockchain"), Some(&false));
}

#[test]
fn test_missing_metrics_endpoint_is_api_error() {
    let node = MockNode::start().unwrap();
    let client = node.client().unwrap();

    match client.metrics().unwrap_err() {
        ClientError::Api { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "No detail provided (Status: 404)");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_exposed_metrics_decode() {
    let node = MockNode::start_with(NodeOptions {
        metrics: true,
        ..NodeOptions::default()
    })
    .unwrap();
    let client = node.client().unwrap();

    let metrics = client.metrics().unwrap();
    assert!(metrics.contains_key("uploads_total"));
}

#[test]
fn test_missing_local_file_sends_nothing() {
    let node = MockNode::start().unwrap();
    let client = node.client().unwrap();
    let dir = TempDir::new().unwrap();

    let err = client.upload(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, ClientError::LocalFile { .. }));
    assert_eq!(node.stored_count(), 0);
}

#[test]
fn test_unreachable_node_is_network_error() {
    let url = unused_url().unwrap();
    let client = Client::new(ClientConfig::new(url.clone(), Duration::from_secs(5))).unwrap();

    match client.status().unwrap_err() {
        ClientError::Network { url: failed, .. } => assert!(failed.starts_with(&url)),
        other => panic!("unexpected error: {:?}", other),
    }
}
