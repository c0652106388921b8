//! Endpoint table for the login and punch flows.

use url::Url;

use crate::error::{Error, Result};

const IDENTITY_BASE: &str = "https://id.obc.jp";
const TIMECLOCK_BASE: &str = "https://hromssp.obc.jp";

/// Base URLs of the two portal hosts, one method per flow step.
///
/// The identity host serves the login pages; the time-clock host serves the
/// per-user punch pages once the user code is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
	identity_base: Url,
	timeclock_base: Url,
}

impl Default for Endpoints {
	fn default() -> Self {
		Self {
			identity_base: Url::parse(IDENTITY_BASE).expect("IDENTITY_BASE should parse"),
			timeclock_base: Url::parse(TIMECLOCK_BASE).expect("TIMECLOCK_BASE should parse"),
		}
	}
}

impl Endpoints {
	pub fn new(identity_base: Url, timeclock_base: Url) -> Self {
		Self {
			identity_base,
			timeclock_base,
		}
	}

	/// Parses both bases.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidUrl`] for the first base that does not parse.
	pub fn parse(identity_base: &str, timeclock_base: &str) -> Result<Self> {
		Ok(Self::new(parse_base(identity_base)?, parse_base(timeclock_base)?))
	}

	/// Serves both hosts from one origin.
	pub fn single_host(base: Url) -> Self {
		Self::new(base.clone(), base)
	}

	pub fn identity_base(&self) -> &Url {
		&self.identity_base
	}

	pub fn timeclock_base(&self) -> &Url {
		&self.timeclock_base
	}

	/// Tenant landing page carrying the first token.
	pub fn login_page(&self, tenant: &str) -> String {
		format!("{}/{tenant}", trimmed(&self.identity_base))
	}

	pub fn check_authentication_method(&self, tenant: &str) -> String {
		format!("{}/{tenant}/login/CheckAuthenticationMethod", trimmed(&self.identity_base))
	}

	pub fn login(&self, tenant: &str) -> String {
		format!("{}/{tenant}/login/login/?Length=5", trimmed(&self.identity_base))
	}

	/// Post-login redirect page exposing the user code.
	pub fn redirect(&self, tenant: &str) -> String {
		format!("{}/{tenant}/omredirect/redirect/", trimmed(&self.identity_base))
	}

	pub fn punchmark_page(&self, tenant: &str, user_code: &str) -> String {
		format!("{}/{tenant}/{user_code}/timeclock/punchmark/", trimmed(&self.timeclock_base))
	}

	pub fn insert_read_date_time(&self, tenant: &str, user_code: &str) -> String {
		format!("{}/{tenant}/{user_code}/TimeClock/InsertReadDateTime/", trimmed(&self.timeclock_base))
	}
}

fn parse_base(raw: &str) -> Result<Url> {
	Url::parse(raw).map_err(|source| Error::InvalidUrl {
		url: raw.to_string(),
		source,
	})
}

fn trimmed(base: &Url) -> &str {
	base.as_str().trim_end_matches('/')
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_table_matches_portal_hosts() {
		let endpoints = Endpoints::default();
		assert_eq!(endpoints.login_page("acme"), "https://id.obc.jp/acme");
		assert_eq!(endpoints.check_authentication_method("acme"), "https://id.obc.jp/acme/login/CheckAuthenticationMethod");
		assert_eq!(endpoints.login("acme"), "https://id.obc.jp/acme/login/login/?Length=5");
		assert_eq!(endpoints.redirect("acme"), "https://id.obc.jp/acme/omredirect/redirect/");
		assert_eq!(endpoints.punchmark_page("acme", "u42"), "https://hromssp.obc.jp/acme/u42/timeclock/punchmark/");
		assert_eq!(
			endpoints.insert_read_date_time("acme", "u42"),
			"https://hromssp.obc.jp/acme/u42/TimeClock/InsertReadDateTime/"
		);
	}

	#[test]
	fn single_host_serves_both_flows() {
		let endpoints = Endpoints::single_host(Url::parse("http://127.0.0.1:8080/").unwrap());
		assert_eq!(endpoints.login_page("acme"), "http://127.0.0.1:8080/acme");
		assert_eq!(endpoints.punchmark_page("acme", "u42"), "http://127.0.0.1:8080/acme/u42/timeclock/punchmark/");
	}

	#[test]
	fn parse_rejects_relative_bases() {
		let err = Endpoints::parse("id.obc.jp", TIMECLOCK_BASE).unwrap_err();
		assert!(matches!(err, Error::InvalidUrl { .. }));
	}
}
