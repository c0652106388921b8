//! Credentials and client options.

use bugyo_protocol::Position;
use tokio_util::sync::CancellationToken;

use crate::DEFAULT_USER_AGENT;
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};

/// Account identifier (OBCiD).
///
/// Opaque text on the wire. Numeric identifiers are accepted and kept in
/// their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<String> for AccountId {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for AccountId {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<u64> for AccountId {
	fn from(value: u64) -> Self {
		Self(value.to_string())
	}
}

impl std::fmt::Display for AccountId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Password whose `Debug` output is masked.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl From<String> for Password {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for Password {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl std::fmt::Debug for Password {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(bugyo_protocol::REDACTED)
	}
}

/// Login credentials for one tenant account. Immutable once built.
#[derive(Debug, Clone)]
pub struct Credentials {
	tenant_code: String,
	account_id: AccountId,
	password: Password,
}

impl Credentials {
	/// Validates and bundles the three login values.
	///
	/// # Errors
	///
	/// Returns [`Error::Config`] naming the first empty value.
	pub fn new(tenant_code: impl Into<String>, account_id: impl Into<AccountId>, password: impl Into<Password>) -> Result<Self> {
		let tenant_code = tenant_code.into();
		let account_id = account_id.into();
		let password = password.into();

		if tenant_code.trim().is_empty() {
			return Err(Error::Config("tenant code required".into()));
		}
		if account_id.as_str().trim().is_empty() {
			return Err(Error::Config("OBCiD required".into()));
		}
		if password.expose().is_empty() {
			return Err(Error::Config("password required".into()));
		}

		Ok(Self {
			tenant_code,
			account_id,
			password,
		})
	}

	pub fn tenant_code(&self) -> &str {
		&self.tenant_code
	}

	pub fn account_id(&self) -> &AccountId {
		&self.account_id
	}

	pub fn password(&self) -> &Password {
		&self.password
	}
}

/// Options recognised by [`Client`](crate::Client).
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ClientConfig {
	/// Dump every request and response through `tracing` at debug level.
	pub debug: bool,
	pub endpoints: Endpoints,
	/// Geolocation reported with each punch.
	pub position: Position,
	pub user_agent: String,
	/// Aborts the in-flight request when cancelled.
	pub cancellation: Option<CancellationToken>,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			debug: false,
			endpoints: Endpoints::default(),
			position: Position::default(),
			user_agent: DEFAULT_USER_AGENT.to_string(),
			cancellation: None,
		}
	}
}

impl ClientConfig {
	#[must_use]
	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}

	#[must_use]
	pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = endpoints;
		self
	}

	#[must_use]
	pub fn with_position(mut self, position: Position) -> Self {
		self.position = position;
		self
	}

	#[must_use]
	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();
		self
	}

	#[must_use]
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = Some(token);
		self
	}
}
