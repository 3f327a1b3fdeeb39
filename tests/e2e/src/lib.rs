//! End-to-end support: an in-process PermastoreIt node served over real HTTP.

pub mod handlers;
pub mod node;

pub use node::{MockNode, NodeOptions};

use tracing_subscriber::EnvFilter;

/// Route node logs into the test harness output. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,actix_server=error")),
        )
        .with_test_writer()
        .try_init();
}
