//! One module per command. Each command calls the client, times the call,
//! renders the outcome and returns the process exit status.

pub mod bulk;
pub mod download;
pub mod node;
pub mod query;
pub mod upload;
pub mod zkp;

use crate::config::RepeatArgs;
use crate::error::CliError;
use crate::output::{Console, OutputFormat};
use serde::Serialize;
use serde_json::Value;
use std::thread;
use std::time::Instant;

/// Process exit status of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
    /// Node answered but reported itself unhealthy
    Unhealthy,
}

impl Exit {
    pub fn code(self) -> i32 {
        match self {
            Exit::Success => 0,
            Exit::Failure => 1,
            Exit::Unhealthy => 2,
        }
    }
}

/// Run `f`, returning its result and the elapsed wall-clock milliseconds
pub fn timed<R>(f: impl FnOnce() -> R) -> (R, f64) {
    let started = Instant::now();
    let result = f();
    (result, elapsed_ms(started))
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Serialize `result` and attach a timing field to it
pub fn with_timing<T: Serialize>(result: &T, key: &str, millis: f64) -> Value {
    match serde_json::to_value(result) {
        Ok(Value::Object(mut map)) => {
            map.insert(key.to_string(), Value::from(millis));
            Value::Object(map)
        }
        Ok(other) => serde_json::json!({ "result": other, key: millis }),
        Err(e) => serde_json::json!({ "error": e.to_string(), key: millis }),
    }
}

/// Outcome of one attempt of a repeatable or bulk operation
#[derive(Debug, Serialize)]
pub struct AttemptRecord {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<f64>,
}

impl AttemptRecord {
    pub fn succeeded(result: Value) -> Self {
        Self {
            success: true,
            source_file: None,
            result: Some(result),
            error: None,
            time_ms: None,
        }
    }

    pub fn failed(error: String, time_ms: f64) -> Self {
        Self {
            success: false,
            source_file: None,
            result: None,
            error: Some(error),
            time_ms: Some(time_ms),
        }
    }
}

/// Run `attempt` `repeat.repeat` times, pausing `repeat.delay` in between.
///
/// With a single attempt a failure ends the command at once. When
/// repeating, failures are recorded and the loop carries on; the command
/// fails at the end if any attempt failed. In JSON mode one record per
/// attempt is written after the loop.
pub fn run_repeated<F>(
    console: &mut Console,
    format: OutputFormat,
    repeat: RepeatArgs,
    mut attempt: F,
) -> Exit
where
    F: FnMut(&mut Console, u32) -> Result<Value, CliError>,
{
    let count = repeat.repeat;
    let mut records = Vec::new();
    let mut any_failed = false;

    for i in 0..count {
        if i > 0 && !repeat.delay.is_zero() {
            thread::sleep(repeat.delay);
        }
        if count > 1 {
            console.say(format!("-- Attempt {}/{} --", i + 1, count));
        }

        let started = Instant::now();
        match attempt(console, i) {
            Ok(result) => records.push(AttemptRecord::succeeded(result)),
            Err(e) => {
                let time_ms = elapsed_ms(started);
                let message = console.report(&e);
                if count == 1 {
                    return Exit::Failure;
                }
                any_failed = true;
                records.push(AttemptRecord::failed(message, time_ms));
            }
        }
    }

    if format == OutputFormat::Json {
        for record in &records {
            console.record(record);
        }
    }
    if any_failed {
        Exit::Failure
    } else {
        Exit::Success
    }
}

/// Report a failure from a single-shot command
pub fn fail(console: &mut Console, error: impl Into<CliError>) -> Exit {
    console.report(&error.into());
    Exit::Failure
}
