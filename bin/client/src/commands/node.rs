//! Node-level commands: status, health and metrics.

use super::{fail, timed, with_timing, Exit};
use crate::output::{Console, OutputFormat};
use colored::Colorize;
use common::HealthReport;
use sdk::{Client, ClientError, Transport};

/// Print the node's operational status
pub fn status<T: Transport>(client: &Client<T>, console: &mut Console, format: OutputFormat) -> Exit {
    console.say(format!("Fetching status from {}...", client.base_url().cyan()));
    let (result, millis) = timed(|| client.status());
    match result {
        Ok(status) => {
            console.output(format, &with_timing(&status, "query_time_ms", millis));
            Exit::Success
        }
        Err(e) => fail(console, e),
    }
}

/// Print component health. An unhealthy node exits with [`Exit::Unhealthy`].
pub fn health<T: Transport>(client: &Client<T>, console: &mut Console, format: OutputFormat) -> Exit {
    console.say(format!("Fetching health from {}...", client.base_url().cyan()));
    let (result, millis) = timed(|| client.health());
    let report = match result {
        Ok(report) => report,
        Err(e) => return fail(console, e),
    };

    match format {
        OutputFormat::Json => console.record(&with_timing(&report, "query_time_ms", millis)),
        OutputFormat::Text => render_health(console, &report, millis),
    }

    if report.is_healthy() {
        Exit::Success
    } else {
        Exit::Unhealthy
    }
}

fn render_health(console: &mut Console, report: &HealthReport, millis: f64) {
    let overall = report.status.to_uppercase();
    let overall = if report.is_healthy() {
        overall.green().bold()
    } else {
        overall.yellow().bold()
    };
    console.say(format!("Overall Status: {}", overall));

    console.say(format!("  {:<15} {}", "Component".bold(), "Status".bold()));
    for (component, ok) in &report.components {
        let state = if *ok { "OK".green() } else { "FAIL".red().bold() };
        console.say(format!("  {:<15} {}", capitalize(component), state));
    }

    console.say(format!("  Node ID: {}", or_na(report.node_id.as_deref())));
    console.say(format!("  Files Stored: {}", or_na(report.files_stored)));
    console.say(format!("  Blockchain Length: {}", or_na(report.blockchain_length)));
    console.say(format!("  DHT Peers (Known): {}", or_na(report.peers_connected)));
    console.say(format!("  Query Time: {:.2} ms", millis));
}

/// Fetch node metrics from `/metrics`
pub fn metrics<T: Transport>(client: &Client<T>, console: &mut Console, format: OutputFormat) -> Exit {
    console.say(format!("Fetching metrics from {}...", client.base_url().cyan()));
    let (result, millis) = timed(|| client.metrics());
    match result {
        Ok(metrics) => {
            console.output(format, &with_timing(&metrics, "query_time_ms", millis));
            Exit::Success
        }
        Err(ClientError::Api { status: 404, .. }) => {
            console.say(format!(
                "{} this node does not expose a /metrics endpoint.",
                "Not Implemented:".yellow().bold()
            ));
            Exit::Failure
        }
        Err(e) => fail(console, e),
    }
}

fn or_na<V: ToString>(value: Option<V>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
