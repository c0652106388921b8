//! Client facade owning one portal session.

use bugyo_protocol::ClockType;
use tracing::debug;

use crate::auth;
use crate::config::{ClientConfig, Credentials};
use crate::error::Result;
use crate::punch;
use crate::session::Session;
use crate::transport::{HttpTransport, Navigator, Transport};

/// One logical portal session: credentials, options, session state and the
/// transport that carries its cookies.
///
/// Calls take `&mut self`, so a client cannot be driven from two places at
/// once. Use one client per session.
pub struct Client {
	credentials: Credentials,
	config: ClientConfig,
	session: Session,
	navigator: Navigator,
}

impl Client {
	/// Creates a client over a fresh `reqwest` transport and cookie jar.
	///
	/// # Errors
	///
	/// Returns [`Error::Config`](crate::Error::Config) if the HTTP client
	/// cannot be built. No request is sent.
	pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
		let transport = HttpTransport::new()?;
		Ok(Self::with_transport(credentials, config, Box::new(transport)))
	}

	/// Creates a client over any transport, e.g. a
	/// [`FakeTransportBuilder`](crate::fake_transport::FakeTransportBuilder) one.
	pub fn with_transport(credentials: Credentials, config: ClientConfig, transport: Box<dyn Transport>) -> Self {
		debug!(target = "bugyo", tenant = credentials.tenant_code(), verbose = config.debug, "client created");
		let navigator = Navigator::new(transport, &config);
		Self {
			credentials,
			config,
			session: Session::new(),
			navigator,
		}
	}

	/// Logs in, leaving the session with a user code and a fresh token.
	pub async fn login(&mut self) -> Result<()> {
		auth::login(&mut self.navigator, &mut self.session, &self.credentials, &self.config.endpoints).await
	}

	/// Probes the post-login page; see [`auth::is_logged_in`] for side effects.
	pub async fn is_logged_in(&mut self) -> bool {
		auth::is_logged_in(&mut self.navigator, &mut self.session, &self.credentials, &self.config.endpoints).await
	}

	/// Records a clock event. Requires a prior successful [`Client::login`].
	pub async fn punchmark(&mut self, clock_type: ClockType) -> Result<()> {
		punch::punchmark(
			&mut self.navigator,
			&mut self.session,
			&self.config.endpoints,
			self.credentials.tenant_code(),
			clock_type,
			self.config.position,
		)
		.await
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}
}
