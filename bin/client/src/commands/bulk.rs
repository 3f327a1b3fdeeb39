//! Bulk upload of every matching file in a directory.

use super::{timed, with_timing, AttemptRecord, Exit};
use crate::error::CliError;
use crate::output::{Console, OutputFormat};
use colored::Colorize;
use serde::Serialize;
use sdk::{Client, Transport};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct BulkSummary {
    total_files: usize,
    success: usize,
    failed: usize,
}

#[derive(Debug, Serialize)]
struct SummaryRecord {
    summary: BulkSummary,
}

/// Upload every regular file in `dir` whose name matches `pattern`.
///
/// Per-file failures are reported and counted but never stop the batch.
pub fn upload_bulk<T: Transport>(
    client: &Client<T>,
    console: &mut Console,
    format: OutputFormat,
    dir: &Path,
    pattern: &str,
    delay: Duration,
) -> Exit {
    console.say(format!(
        "Uploading files matching '{}' from '{}' to {}...",
        pattern.cyan(),
        dir.display().to_string().cyan(),
        client.base_url().cyan()
    ));

    let files = match matching_files(dir, pattern) {
        Ok(files) => files,
        Err(e) => {
            console.report(&e);
            return Exit::Failure;
        }
    };
    if files.is_empty() {
        console.say("No files found matching pattern.".yellow());
        return Exit::Success;
    }
    console.say(format!("Found {} file(s).", files.len()));

    let progress = console.progress(files.len() as u64);
    let mut records = Vec::with_capacity(files.len());
    let mut succeeded = 0;
    let mut failed = 0;

    for (i, path) in files.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }
        let source_file = path.display().to_string();
        progress.set_message(format!(
            "Uploading {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));

        let (result, millis) = timed(|| client.upload(path));
        match result {
            Ok(result) => {
                let mut value = with_timing(&result, "upload_time_ms", millis);
                if let Some(map) = value.as_object_mut() {
                    map.insert("source_file".to_string(), source_file.into());
                }
                records.push(AttemptRecord::succeeded(value));
                succeeded += 1;
            }
            Err(e) => {
                let message = progress.suspend(|| console.report(&e.into()));
                let mut record = AttemptRecord::failed(message, millis);
                record.source_file = Some(source_file);
                records.push(record);
                failed += 1;
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    console.say(format!(
        "Bulk upload complete. Success: {}, Failed: {}",
        succeeded.to_string().green(),
        failed.to_string().red()
    ));
    if format == OutputFormat::Json {
        console.record(&SummaryRecord {
            summary: BulkSummary {
                total_files: files.len(),
                success: succeeded,
                failed,
            },
        });
        for record in &records {
            console.record(record);
        }
    }
    Exit::Success
}

/// Regular files directly inside `dir` whose names match `pattern`, sorted
fn matching_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, CliError> {
    let scan_error = |source| CliError::Scan {
        dir: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !matches_pattern(pattern, name) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Shell-style wildcard match: `*` any run, `?` any one character.
/// Hidden names only match patterns that start with a dot.
pub fn matches_pattern(pattern: &str, name: &str) -> bool {
    if name.starts_with('.') && !pattern.starts_with('.') {
        return false;
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();
    let (mut p, mut n) = (0, 0);
    // Position of the last '*' and the name index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(&c) if c == '?' || c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    n = absorbed + 1;
                    backtrack = Some((star, absorbed + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}
