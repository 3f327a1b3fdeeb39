//! Where command output goes.
//!
//! Machine-readable records (one JSON object per line) go to the data
//! stream; everything meant for humans, including progress, goes to the
//! diagnostic stream, so the two can be separated by redirection.

use crate::commands::Exit;
use crate::error::CliError;
use clap::ValueEnum;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct Console {
    data: Box<dyn Write>,
    diag: Box<dyn Write>,
    /// Diagnostic stream is a terminal, so progress bars may be drawn
    interactive: bool,
    /// A record could not be written to the data stream
    data_lost: bool,
}

impl Console {
    /// Data to stdout, diagnostics to stderr
    pub fn stdio() -> Self {
        Self {
            data: Box::new(io::stdout()),
            diag: Box::new(io::stderr()),
            interactive: io::stderr().is_terminal(),
            data_lost: false,
        }
    }

    /// Console writing into in-memory buffers
    #[cfg(test)]
    pub fn captured() -> (Self, capture::Captured) {
        let captured = capture::Captured::default();
        let console = Self {
            data: Box::new(captured.data.clone()),
            diag: Box::new(captured.diag.clone()),
            interactive: false,
            data_lost: false,
        };
        (console, captured)
    }

    /// Emit one self-contained JSON record on the data stream
    pub fn record<T: Serialize>(&mut self, record: &T) {
        match serde_json::to_string(record) {
            Ok(line) => {
                if let Err(e) = writeln!(self.data, "{}", line) {
                    warn!("Failed to write record to output: {}", e);
                    self.data_lost = true;
                }
            }
            Err(e) => self.say(format!("{} failed to encode record: {}", "Error:".red().bold(), e)),
        }
    }

    /// Write a line for humans on the diagnostic stream
    pub fn say(&mut self, line: impl Display) {
        let _ = writeln!(self.diag, "{}", line);
    }

    /// Pretty-print a value for humans
    pub fn show<T: Serialize>(&mut self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => self.say(text),
            Err(e) => self.say(format!("{} failed to render result: {}", "Error:".red().bold(), e)),
        }
    }

    /// Show `value` in the requested format
    pub fn output<T: Serialize>(&mut self, format: OutputFormat, value: &T) {
        match format {
            OutputFormat::Json => self.record(value),
            OutputFormat::Text => self.show(value),
        }
    }

    /// Render a failure with its kind-specific wording and return the
    /// plain message for result records
    pub fn report(&mut self, error: &CliError) -> String {
        let (heading, message) = error.describe();
        let label = format!("{}:", heading);
        let label = if error.is_warning() {
            label.yellow().bold()
        } else {
            label.red().bold()
        };
        self.say(format!("{} {}", label, message));
        message
    }

    /// Flush the data stream. A command whose records did not all reach
    /// it fails even if the operation itself succeeded.
    pub fn finish(&mut self, exit: Exit) -> Exit {
        if let Err(e) = self.data.flush() {
            warn!("Failed to flush output: {}", e);
            self.data_lost = true;
        }
        if self.data_lost && exit == Exit::Success {
            self.say(format!(
                "{} results could not be written to standard output",
                "Error:".red().bold()
            ));
            return Exit::Failure;
        }
        exit
    }

    /// Progress bar on the diagnostic stream, hidden unless it is a terminal
    pub fn progress(&self, len: u64) -> ProgressBar {
        if !self.interactive {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template(
            "{msg:30!} [{bar:30.cyan/blue}] {pos}/{len} ({percent}%) {elapsed_precise} ETA {eta}",
        ) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    }
}
