//! Command failures. Client failures keep their kind so each one can be
//! rendered distinctly.

use sdk::ClientError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Downloaded bytes do not hash to the requested content hash
    #[error("Content hash mismatch for {}: expected {expected}, got {actual}", path.display())]
    HashMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Downloaded file could not be read back for verification
    #[error("Failed to verify {}: {source}", path.display())]
    Verify {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Bulk upload directory could not be listed
    #[error("Error finding files in {}: {source}", dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Heading and message shown to the user
    pub fn describe(&self) -> (&'static str, String) {
        match self {
            CliError::Client(e) => match e {
                ClientError::NotFound { id } => (
                    "Error",
                    format!("Resource '{}' not found on the server (404).", id),
                ),
                ClientError::ZkpDisabled => ("Warning", e.to_string()),
                ClientError::Api { status, detail } => {
                    ("Error", format!("API Error ({}): {}", status, detail))
                }
                ClientError::Network { message, .. } => {
                    ("Error", format!("Network Error: {}", message))
                }
                ClientError::LocalFile { .. } => ("Error", format!("Local File Error: {}", e)),
                ClientError::LocalIo { .. } => ("Error", format!("Local I/O Error: {}", e)),
                ClientError::InvalidArgument(msg) => ("Error", format!("Invalid Argument: {}", msg)),
                ClientError::Decode { .. } => ("Error", format!("Unexpected Response: {}", e)),
            },
            CliError::HashMismatch { .. } => ("Error", format!("Integrity Error: {}", self)),
            CliError::Verify { .. } | CliError::Scan { .. } => {
                ("Error", format!("Local I/O Error: {}", self))
            }
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, CliError::Client(e) if e.is_warning())
    }
}
