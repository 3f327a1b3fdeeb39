//! Client library for a PermastoreIt content-storage node.
//!
//! ```no_run
//! use sdk::{Client, ClientConfig};
//! use std::path::Path;
//!
//! let client = Client::new(ClientConfig::default())?;
//! let stored = client.upload(Path::new("notes.txt"))?;
//! client.download(&stored.hash, Path::new("downloads"), None)?;
//! # Ok::<(), sdk::ClientError>(())
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod mime;
pub mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use transport::{HttpTransport, Transport, TransportError, TransportErrorKind};

pub use common::{
    FileMetadata, HealthReport, NodeStatus, RootMessage, SearchHit, UploadResult, ZkProof,
};
