//! Metadata queries: list, info and search.

use super::{fail, timed, with_timing, Exit};
use crate::constants::{HASH_COLUMN_WIDTH, TIMESTAMP_FORMAT};
use crate::output::{Console, OutputFormat};
use chrono::{DateTime, Local};
use colored::Colorize;
use common::{FileMetadata, SearchHit};
use sdk::{Client, Transport};
use serde::Serialize;

#[derive(Serialize)]
struct FileListing<'a> {
    files: &'a [FileMetadata],
    query_time_ms: f64,
}

#[derive(Serialize)]
struct SearchListing<'a> {
    results: &'a [SearchHit],
    query_time_ms: f64,
}

/// List stored files, most recent first
pub fn list<T: Transport>(
    client: &Client<T>,
    console: &mut Console,
    format: OutputFormat,
    limit: Option<i64>,
) -> Exit {
    let limit_label = limit.map_or_else(|| "All".to_string(), |l| l.to_string());
    console.say(format!(
        "Listing files from {} (limit: {})...",
        client.base_url().cyan(),
        limit_label
    ));

    let (result, millis) = timed(|| client.list_files(limit));
    let files = match result {
        Ok(files) => files,
        Err(e) => return fail(console, e),
    };

    if format == OutputFormat::Json {
        console.record(&FileListing {
            files: &files,
            query_time_ms: millis,
        });
        return Exit::Success;
    }

    console.say(format!("Query Time: {:.2} ms", millis));
    if files.is_empty() {
        console.say("No files found.".yellow());
        return Exit::Success;
    }
    console.say(format!("Stored Files (Limit: {})", limit_label).bold());
    console.say(format!(
        "{:<18}  {:<19}  {:>12}  {:<24}  {}",
        "Hash", "Timestamp", "Size (Bytes)", "Content Type", "Filename"
    ));
    for file in &files {
        console.say(format!(
            "{:<18}  {:<19}  {:>12}  {:<24}  {}",
            short_hash(&file.hash),
            format_timestamp(file.timestamp),
            file.size,
            file.content_type,
            file.filename
        ));
    }
    Exit::Success
}

/// Show metadata of a single file
pub fn info<T: Transport>(
    client: &Client<T>,
    console: &mut Console,
    format: OutputFormat,
    hash: &str,
) -> Exit {
    console.say(format!(
        "Getting info for hash '{}' from {}...",
        hash.cyan(),
        client.base_url().cyan()
    ));
    let (result, millis) = timed(|| client.file_info(hash));
    match result {
        Ok(file) => {
            console.output(format, &with_timing(&file, "query_time_ms", millis));
            Exit::Success
        }
        Err(e) => fail(console, e),
    }
}

/// Search stored files by name or tag
pub fn search<T: Transport>(
    client: &Client<T>,
    console: &mut Console,
    format: OutputFormat,
    query: &str,
    limit: i64,
) -> Exit {
    console.say(format!(
        "Searching for '{}' on {} (limit: {})...",
        query.cyan(),
        client.base_url().cyan(),
        limit
    ));

    let (result, millis) = timed(|| client.search(query, limit));
    let hits = match result {
        Ok(hits) => hits,
        Err(e) => return fail(console, e),
    };

    if format == OutputFormat::Json {
        console.record(&SearchListing {
            results: &hits,
            query_time_ms: millis,
        });
        return Exit::Success;
    }

    console.say(format!("Query Time: {:.2} ms", millis));
    if hits.is_empty() {
        console.say("No results found.".yellow());
        return Exit::Success;
    }
    console.say(format!("Search Results for '{}' (Limit: {})", query, limit).bold());
    console.say(format!(
        "{:<18}  {:>10}  {:>12}  {:<24}  {}",
        "Hash", "Relevance", "Size (Bytes)", "Content Type", "Filename"
    ));
    for hit in &hits {
        console.say(format!(
            "{:<18}  {:>10.2}  {:>12}  {:<24}  {}",
            short_hash(&hit.file.hash),
            hit.similarity,
            hit.file.size,
            hit.file.content_type,
            hit.file.filename
        ));
    }
    Exit::Success
}

fn short_hash(hash: &str) -> String {
    hash.chars().take(HASH_COLUMN_WIDTH).collect()
}

fn format_timestamp(timestamp: Option<f64>) -> String {
    let Some(ts) = timestamp.filter(|ts| *ts > 0.0) else {
        return "N/A".to_string();
    };
    let secs = ts.trunc() as i64;
    let nanos = (ts.fract() * 1e9) as u32;
    match DateTime::from_timestamp(secs, nanos) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        None => "Invalid Timestamp".to_string(),
    }
}
