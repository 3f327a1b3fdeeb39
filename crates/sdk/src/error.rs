//! Failure kinds produced by the client core

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Every failure a client call can end in. Transport and HTTP details never
/// escape unclassified.
#[derive(Debug, Error)]
pub enum ClientError {
    /// DNS, connect, timeout or broken body stream
    #[error("{message}")]
    Network { url: String, message: String },

    /// Node rejected the request
    #[error("API Error {status}: {detail}")]
    Api { status: u16, detail: String },

    /// 404 for a download, file-info or zk-proof resource
    #[error("Resource '{id}' not found on server.")]
    NotFound { id: String },

    /// 501 from a ZKP endpoint
    #[error("ZKP is not enabled on the target node.")]
    ZkpDisabled,

    /// Missing or unreadable source file
    #[error("Local file error for {}: {reason}", path.display())]
    LocalFile { path: PathBuf, reason: String },

    /// Destination directory or file could not be written
    #[error("Local I/O error at {}: {source}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Client-side input rejected before any network call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 2xx body that does not match the expected payload
    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// HTTP status behind API-class failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::ZkpDisabled => Some(501),
            _ => None,
        }
    }

    /// Failures that reflect node configuration rather than a malfunction
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::ZkpDisabled)
    }
}
