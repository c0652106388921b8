//! Result envelope and printers for the two output formats.

mod data;
mod format;
mod model;

use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;

pub use data::*;
pub use format::OutputFormat;
pub use model::*;

use crate::error::CliError;

/// Builder for constructing command results.
pub struct ResultBuilder<T> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			start_time: Instant::now(),
		}
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, code: ErrorCode, message: impl Into<String>) -> Self {
		self.error = Some(CommandError {
			code,
			message: message.into(),
		});
		self
	}

	pub fn build(self) -> CommandResult<T> {
		CommandResult {
			ok: self.error.is_none() && self.data.is_some(),
			command: self.command,
			data: self.data,
			error: self.error,
			duration_ms: Some(self.start_time.elapsed().as_millis() as u64),
		}
	}
}

/// Print a command result to stdout in the specified format.
pub fn print_result<T: Serialize + Summary>(result: &CommandResult<T>, format: OutputFormat) {
	let mut stdout = io::stdout().lock();
	match format {
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				let _ = writeln!(stdout, "{json}");
			}
		}
		OutputFormat::Text => {
			if let Some(ref data) = result.data {
				let _ = writeln!(stdout, "{}", data.summary());
			} else if let Some(ref error) = result.error {
				let _ = writeln!(stdout, "Error [{}]: {}", error.code, error.message);
			}
		}
	}
}

/// Reports a failed command.
///
/// JSON mode prints a failure envelope on stdout; text mode prints one line on
/// stderr.
pub fn print_failure(command: &str, err: &CliError, format: OutputFormat) {
	match format {
		OutputFormat::Json => {
			let result: CommandResult<()> = ResultBuilder::new(command).error(err.code(), err.to_string()).build();
			if let Ok(json) = serde_json::to_string_pretty(&result) {
				println!("{json}");
			}
		}
		OutputFormat::Text => eprintln!("Error [{}]: {err}", err.code()),
	}
}
