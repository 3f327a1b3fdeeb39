use super::{fail, timed, with_timing, Exit};
use crate::output::{Console, OutputFormat};
use colored::Colorize;
use sdk::{Client, Transport};

/// Fetch the zero-knowledge proof of storage for a file.
/// A node with ZKP disabled is reported as a warning.
pub fn zkp<T: Transport>(
    client: &Client<T>,
    console: &mut Console,
    format: OutputFormat,
    hash: &str,
) -> Exit {
    console.say(format!(
        "Generating ZKP for hash '{}' from {}...",
        hash.cyan(),
        client.base_url().cyan()
    ));
    let (result, millis) = timed(|| client.zk_proof(hash));
    match result {
        Ok(proof) => {
            console.output(format, &with_timing(&proof, "query_time_ms", millis));
            Exit::Success
        }
        Err(e) => fail(console, e),
    }
}
