use std::path::PathBuf;
use std::time::Duration;

use bugyo::{CancellationToken, Client, ClientConfig};
use tracing::{debug, warn};

use crate::config::{self, FileConfig};
use crate::error::{CliError, Result};
use crate::output::OutputFormat;

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
	pub config_path: PathBuf,
	pub debug: bool,
	pub timeout: Option<Duration>,
	pub format: OutputFormat,
}

impl CommandContext {
	pub fn new(config: Option<PathBuf>, debug: bool, timeout_secs: Option<u64>, format: OutputFormat) -> Result<Self> {
		let config_path = config::resolve_path(config)?;
		debug!(target = "bugyo-cli", path = %config_path.display(), "config path resolved");
		Ok(Self {
			config_path,
			debug,
			timeout: timeout_secs.map(Duration::from_secs),
			format,
		})
	}

	/// Loads (or captures) the config file and builds a client from it.
	///
	/// The `--timeout` deadline starts here and covers every request the
	/// returned client sends.
	pub fn connect(&self) -> Result<Client> {
		let file = config::load_or_capture(&self.config_path)?;
		self.client_from(&file)
	}

	pub fn client_from(&self, file: &FileConfig) -> Result<Client> {
		let mut client_config = file.apply(ClientConfig::default().with_debug(self.debug))?;
		if let Some(token) = self.arm_deadline() {
			client_config = client_config.with_cancellation(token);
		}
		Ok(Client::new(file.credentials()?, client_config)?)
	}

	fn arm_deadline(&self) -> Option<CancellationToken> {
		let timeout = self.timeout?;
		let token = CancellationToken::new();
		let trigger = token.clone();
		tokio::spawn(async move {
			tokio::time::sleep(timeout).await;
			warn!(target = "bugyo-cli", timeout_secs = timeout.as_secs(), "deadline reached, cancelling");
			trigger.cancel();
		});
		Some(token)
	}

	/// Converts a portal error, reporting a fired deadline as [`CliError::Timeout`].
	pub fn portal_error(&self, err: bugyo::Error) -> CliError {
		match self.timeout {
			Some(timeout) if err.is_cancelled() => CliError::Timeout(timeout),
			_ => CliError::Portal(err),
		}
	}
}
