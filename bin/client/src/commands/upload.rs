use super::{run_repeated, timed, with_timing, Exit};
use crate::config::RepeatArgs;
use crate::output::{Console, OutputFormat};
use colored::Colorize;
use common::UploadResult;
use sdk::{Client, Transport};
use std::path::Path;

/// Upload one file, optionally several times in a row
pub fn upload<T: Transport>(
    client: &Client<T>,
    console: &mut Console,
    format: OutputFormat,
    path: &Path,
    repeat: RepeatArgs,
) -> Exit {
    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    console.say(format!(
        "Uploading '{}' to {} ({}x, delay {}s)...",
        display_name.cyan(),
        client.base_url().cyan(),
        repeat.repeat,
        repeat.delay.as_secs_f64()
    ));

    run_repeated(console, format, repeat, |console, i| {
        let (result, millis) = timed(|| client.upload(path));
        let result = result?;
        if format == OutputFormat::Text {
            render_upload(console, &result, millis, i + 1);
        }
        Ok(with_timing(&result, "upload_time_ms", millis))
    })
}

pub(crate) fn render_upload(console: &mut Console, result: &UploadResult, millis: f64, n: u32) {
    let status = result.status.to_uppercase();
    let status = if result.is_new() {
        status.green().bold()
    } else {
        status.yellow().bold()
    };
    console.say(format!("{}", format!("Upload Result {}", n).bold()));
    console.say(format!("  Status: {}", status));
    console.say(format!("  Hash: {}", result.hash.cyan()));
    console.say(format!("  Size: {} bytes", result.size));
    if let Some(content_type) = &result.content_type {
        console.say(format!("  Type: {}", content_type));
    }
    console.say(format!(
        "  ZKP: {}",
        if result.zkp_available { "Available" } else { "N/A" }
    ));
    console.say(format!("  Time: {:.2} ms", millis));
    console.say(format!("  Message: {}", result.message));
}
