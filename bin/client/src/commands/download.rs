use super::{run_repeated, timed, Exit};
use crate::config::RepeatArgs;
use crate::error::CliError;
use crate::output::{Console, OutputFormat};
use colored::Colorize;
use common::digest::sha256_file;
use log::warn;
use sdk::{Client, Transport};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Options of the download command besides the hash
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub out_dir: PathBuf,
    pub name: Option<String>,
    pub repeat: RepeatArgs,
    /// Check the saved file hashes to the requested content hash
    pub verify: bool,
}

/// Download a file by hash, optionally several times.
/// Repeated attempts save to `NAME.i` so they do not overwrite each other.
pub fn download<T: Transport>(
    client: &Client<T>,
    console: &mut Console,
    format: OutputFormat,
    hash: &str,
    options: &DownloadOptions,
) -> Exit {
    let base_name = options.name.as_deref().unwrap_or(hash);
    let count = options.repeat.repeat;
    console.say(format!(
        "Downloading hash '{}' from {} to '{}' ({}x, delay {}s)...",
        hash.cyan(),
        client.base_url().cyan(),
        options.out_dir.display().to_string().cyan(),
        count,
        options.repeat.delay.as_secs_f64()
    ));

    run_repeated(console, format, options.repeat, |console, i| {
        let save_name = if count > 1 {
            format!("{}.{}", base_name, i)
        } else {
            base_name.to_string()
        };

        let (result, millis) =
            timed(|| client.download(hash, &options.out_dir, Some(save_name.as_str())));
        let path = result?;
        let verified = if options.verify {
            verify_content(&path, hash)?;
            Some(true)
        } else {
            None
        };

        if format == OutputFormat::Text {
            console.say(format!("Download Result {}", i + 1).bold());
            console.say(format!(
                "  File downloaded to: {}",
                path.display().to_string().green()
            ));
            if verified.is_some() {
                console.say(format!("  Content hash: {}", "verified".green()));
            }
            console.say(format!("  Time: {:.2} ms", millis));
        }

        let mut record = json!({
            "downloaded_path": path.display().to_string(),
            "download_time_ms": millis,
        });
        if let Some(verified) = verified {
            record["verified"] = verified.into();
        }
        Ok(record)
    })
}

/// Compare the SHA-256 of the saved file with the requested hash.
/// A file that does not match is removed.
fn verify_content(path: &Path, expected: &str) -> Result<(), CliError> {
    let actual = sha256_file(path).map_err(|source| CliError::Verify {
        path: path.to_path_buf(),
        source,
    })?;
    if !actual.eq_ignore_ascii_case(expected) {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove mismatching file {}: {}", path.display(), e);
        }
        return Err(CliError::HashMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
