use common::digest::{sha256_file, sha256_hex};
use e2e_tests::test_utils::{binary_content, create_test_files};
use e2e_tests::MockNode;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_upload_then_download_is_byte_identical() {
    let node = MockNode::start().unwrap();
    let client = node.client().unwrap();
    let dir = TempDir::new().unwrap();

    let content = binary_content(3 * 1024 * 1024 + 17);
    let source = dir.path().join("blob.bin");
    fs::write(&source, &content).unwrap();

    let stored = client.upload(&source).unwrap();
    assert!(stored.is_new());
    assert_eq!(stored.hash, sha256_hex(&content));
    assert_eq!(stored.size, content.len() as u64);

    let out = dir.path().join("downloads");
    let saved = client.download(&stored.hash, &out, Some("copy.bin")).unwrap();
    assert_eq!(saved, out.join("copy.bin"));
    assert_eq!(fs::read(&saved).unwrap(), content);
    assert_eq!(sha256_file(&saved).unwrap(), stored.hash);
}

#[test]
fn test_duplicate_upload_is_not_new() {
    let node = MockNode::start().unwrap();
    let client = node.client().unwrap();
    let dir = TempDir::new().unwrap();
    let files = create_test_files(dir.path(), 1).unwrap();

    let first = client.upload(&files[0]).unwrap();
    let second = client.upload(&files[0]).unwrap();
    assert!(first.is_new());
    assert!(!second.is_new());
    assert_eq!(first.hash, second.hash);
    assert_eq!(node.stored_count(), 1);
}

#[test]
fn test_upload_sends_guessed_mime_type() {
    let node = MockNode::start().unwrap();
    let client = node.client().unwrap();
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("notes.txt");
    fs::write(&source, "plain text").unwrap();

    let stored = client.upload(&source).unwrap();
    let info = client.file_info(&stored.hash).unwrap();
    assert_eq!(info.filename, "notes.txt");
    assert!(info.content_type.starts_with("text/plain"));
    assert!(info.timestamp.is_some());
}

#[test]
fn test_list_and_search() {
    let node = MockNode::start().unwrap();
    let client = node.client().unwrap();
    let dir = TempDir::new().unwrap();
    for path in create_test_files(dir.path(), 3).unwrap() {
        client.upload(&path).unwrap();
    }

    let all = client.list_files(None).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].filename, "file2.txt");

    let limited = client.list_files(Some(2)).unwrap();
    assert_eq!(limited.len(), 2);

    let hits = client.search("file1.txt", 10).unwrap();
    assert_eq!(hits[0].file.filename, "file1.txt");
    assert_eq!(hits[0].similarity, 1.0);

    let hits = client.search("file", 2).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(client.search("missing", 10).unwrap().is_empty());
}

#[test]
fn test_node_level_calls() {
    let node = MockNode::start().unwrap();
    let client = node.client().unwrap();

    assert!(!client.root_message().unwrap().message.is_empty());
    let status = client.status().unwrap();
    assert_eq!(status.status, "online");
    assert_eq!(status.details["node_id"], "mock-node-1");

    let health = client.health().unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.components.get("storage"), Some(&true));
}

#[test]
fn test_proof_for_stored_file() {
    let node = MockNode::start().unwrap();
    let client = node.client().unwrap();
    let dir = TempDir::new().unwrap();
    let files = create_test_files(dir.path(), 1).unwrap();

    let stored = client.upload(&files[0]).unwrap();
    assert!(stored.zkp_available);
    let proof = client.zk_proof(&stored.hash).unwrap();
    assert_eq!(proof.hash.as_deref(), Some(stored.hash.as_str()));
    assert_eq!(proof.proof.len(), 64);
}
