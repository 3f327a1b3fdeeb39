//! Payload types exchanged with a PermastoreIt node, plus small helpers
//! shared by the SDK, the CLI and the test node.

pub mod digest;
pub mod file_utils;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status string reported by a fully operational node.
pub const HEALTHY: &str = "healthy";

/// Welcome message served on `/`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RootMessage {
    pub message: String,
}

/// Operational status served on `/status`.
/// Only `status` is guaranteed; everything else the node reports is kept as-is.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NodeStatus {
    pub status: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Component health report served on `/health`.
/// The node answers 200 even when degraded; `status` carries the verdict.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub components: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_stored: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peers_connected: Option<u64>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}

/// Server's description of a stored file, returned by `/upload`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UploadResult {
    pub status: String, // "success" for new content, anything else means deduplicated
    pub hash: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub zkp_available: bool,
    #[serde(default)]
    pub message: String,
}

impl UploadResult {
    pub fn is_new(&self) -> bool {
        self.status == "success"
    }
}

/// Metadata record returned by `/files` and `/file-info/{hash}`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FileMetadata {
    pub hash: String,
    pub filename: String,
    pub size: u64,
    pub content_type: String,
    /// Seconds since Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

/// Ranked match returned by `/search`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SearchHit {
    #[serde(flatten)]
    pub file: FileMetadata,
    pub similarity: f64,
}

/// Zero-knowledge proof of storage returned by `/zk-proof/{hash}`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ZkProof {
    pub proof: String,
    pub challenge: String,
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Error body returned with non-2xx responses
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(serde_json::Value::String(detail.into())),
        }
    }

    /// Detail rendered as text. Structured details (validation error lists)
    /// are rendered as compact JSON.
    pub fn detail_text(&self) -> Option<String> {
        match &self.detail {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}
