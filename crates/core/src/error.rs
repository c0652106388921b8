use thiserror::Error;

use crate::transport::Method;

/// Boxed cause of a network failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the session driver.
///
/// Nothing is retried internally: every failure aborts the current flow and is
/// returned as-is. The caller decides whether to restart the flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
	/// The portal answered with anything other than `200 OK`.
	#[error("{method} {url} returned {status} {reason}")]
	Status {
		method: Method,
		url: String,
		status: u16,
		reason: String,
	},

	/// The request never produced a response.
	#[error("{method} {url} failed: {source}")]
	Network {
		method: Method,
		url: String,
		#[source]
		source: BoxError,
	},

	/// The page did not carry an anti-forgery token.
	#[error("no token on {url}")]
	NoToken { url: String },

	/// The post-login page did not expose a usable user code.
	#[error("no user code on {url}")]
	NoUserCode { url: String },

	/// A punch was attempted before a successful login.
	#[error("login required")]
	LoginRequired,

	/// Credentials or client configuration are invalid.
	#[error("invalid argument: {0}")]
	Config(String),

	/// An endpoint produced something that is not a URL.
	#[error("invalid url {url}: {source}")]
	InvalidUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	/// The caller's cancellation token fired while the request was pending.
	#[error("{method} {url} cancelled")]
	Cancelled { method: Method, url: String },
}

impl Error {
	/// `true` for the non-200 and network-failure shapes.
	pub fn is_transport(&self) -> bool {
		matches!(self, Error::Status { .. } | Error::Network { .. })
	}

	pub fn is_cancelled(&self) -> bool {
		matches!(self, Error::Cancelled { .. })
	}
}
