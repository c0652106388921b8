use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::output::ErrorCode;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Portal(#[from] bugyo::Error),

	#[error("{message} [{}]", path.display())]
	Config { path: PathBuf, message: String },

	#[error("malformed config [{}]: {source}", path.display())]
	Yaml {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("prompt failed: {0}")]
	Prompt(#[from] dialoguer::Error),

	#[error("timed out after {}s", .0.as_secs())]
	Timeout(Duration),

	#[error("logged in, but the portal no longer recognises the session")]
	SessionLost,

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl CliError {
	pub(crate) fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
		CliError::Config {
			path: path.into(),
			message: message.into(),
		}
	}

	/// Machine-readable category for output envelopes.
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Config { .. } | CliError::Yaml { .. } => ErrorCode::InvalidInput,
			CliError::Prompt(_) | CliError::Io(_) => ErrorCode::IoError,
			CliError::Timeout(_) => ErrorCode::Timeout,
			CliError::SessionLost => ErrorCode::AuthError,
			CliError::Portal(err) => match err {
				bugyo::Error::Config(_) | bugyo::Error::InvalidUrl { .. } => ErrorCode::InvalidInput,
				bugyo::Error::Network { .. } => ErrorCode::NetworkError,
				bugyo::Error::Cancelled { .. } => ErrorCode::Timeout,
				bugyo::Error::Status { status: 401 | 403, .. } | bugyo::Error::LoginRequired | bugyo::Error::NoUserCode { .. } => ErrorCode::AuthError,
				bugyo::Error::Status { .. } | bugyo::Error::NoToken { .. } => ErrorCode::PortalError,
				_ => ErrorCode::InternalError,
			},
		}
	}
}

pub type Result<T> = std::result::Result<T, CliError>;
