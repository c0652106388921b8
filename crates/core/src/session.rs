//! Per-client session state threaded through every request.
//!
//! Write-sets:
//! - [`Navigator`](crate::Navigator) sets `last_url` after every request that
//!   was sent, whatever its outcome, and skips it on cancellation.
//! - The flows in [`auth`](crate::auth) and [`punch`](crate::punch) set
//!   `csrf_token`, `user_code` and `auth_state` from scraped pages.
//!
//! Callers only ever get a shared reference.

use url::Url;

/// Progress through the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
	#[default]
	Unauthenticated,
	/// Landing page served its token.
	TokenAcquired,
	/// Authentication method check was accepted.
	AuthMethodChecked,
	/// Credentials were accepted.
	Authenticated,
	/// User code resolved from the post-login page. Terminal success state.
	UserCodeResolved,
}

/// Mutable state of one logical portal session.
///
/// Not shareable between concurrent callers: each step depends on what the
/// previous one left behind.
#[derive(Debug, Default)]
pub struct Session {
	csrf_token: String,
	user_code: Option<String>,
	last_url: Option<Url>,
	auth_state: AuthState,
}

impl Session {
	pub fn new() -> Self {
		Self::default()
	}

	/// Current anti-forgery token; empty until the first page is scraped.
	pub fn csrf_token(&self) -> &str {
		&self.csrf_token
	}

	pub fn user_code(&self) -> Option<&str> {
		self.user_code.as_deref()
	}

	/// URL of the previous request, sent as the next `Referer`.
	pub fn last_url(&self) -> Option<&Url> {
		self.last_url.as_ref()
	}

	pub fn auth_state(&self) -> AuthState {
		self.auth_state
	}

	pub(crate) fn set_csrf_token(&mut self, token: String) {
		self.csrf_token = token;
	}

	/// Empty codes are stored as absent.
	pub(crate) fn set_user_code(&mut self, user_code: Option<String>) {
		self.user_code = user_code.filter(|code| !code.is_empty());
	}

	pub(crate) fn set_last_url(&mut self, url: Url) {
		self.last_url = Some(url);
	}

	pub(crate) fn set_auth_state(&mut self, state: AuthState) {
		self.auth_state = state;
	}
}
