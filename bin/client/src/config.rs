//! Command-line options shared by every command

use crate::constants::NODE_URL_ENV;
use crate::output::OutputFormat;
use clap::Args;
use sdk::constants::{DEFAULT_NODE_URL, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use sdk::ClientConfig;
use std::time::Duration;

/// Where the node lives and how long to wait for it
#[derive(Args, Debug, Clone)]
pub struct NodeArgs {
    /// Base URL of the PermastoreIt node API
    #[arg(long, global = true, env = NODE_URL_ENV, default_value = DEFAULT_NODE_URL)]
    pub url: String,

    /// Default request timeout in seconds (at most one day)
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub timeout: u64,
}

impl NodeArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.url, Duration::from_secs(self.timeout))
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Output format (text to stderr, json lines to stdout)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub output_format: OutputFormat,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct RepeatArgs {
    /// Number of times to repeat the operation
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Delay in seconds between repetitions
    #[arg(short, long, default_value = "0", value_parser = parse_delay)]
    pub delay: Duration,
}

impl Default for RepeatArgs {
    fn default() -> Self {
        Self {
            repeat: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Parse a non-negative number of seconds
pub fn parse_delay(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("delay must be a non-negative number, got {}", value))
}
