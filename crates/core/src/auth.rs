//! Login flow.
//!
//! Four strictly sequential steps, each depending on the token, referer and
//! cookies left by the previous one:
//!
//! 1. GET the tenant landing page and scrape the anti-forgery token.
//! 2. POST the account id to the authentication-method check.
//! 3. POST the credentials, resending the token in the body.
//! 4. GET the post-login redirect page, scrape the user code and the rotated
//!    token.
//!
//! Any failure aborts the flow. A later [`login`] starts again from step 1,
//! reusing whatever referer and cookies are left but forgetting the user
//! code, so a failed re-login leaves nothing to punch with.

use bugyo_protocol::{CheckAuthenticationMethod, Form, LoginRequest};
use tracing::{debug, info};

use crate::config::Credentials;
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use crate::markup;
use crate::session::{AuthState, Session};
use crate::transport::Navigator;

/// Runs the whole login flow.
///
/// On success the session is in [`AuthState::UserCodeResolved`] with a user
/// code and the post-login token.
///
/// # Errors
///
/// - transport errors from any step, unchanged
/// - [`Error::NoToken`] when the landing or post-login page lacks a token
/// - [`Error::NoUserCode`] when the post-login page lacks a usable user code
pub async fn login(navigator: &mut Navigator, session: &mut Session, credentials: &Credentials, endpoints: &Endpoints) -> Result<()> {
	session.set_auth_state(AuthState::Unauthenticated);
	session.set_user_code(None);
	let tenant = credentials.tenant_code();

	acquire_token(navigator, session, endpoints, tenant).await?;
	check_authentication_method(navigator, session, credentials, endpoints).await?;
	authenticate(navigator, session, credentials, endpoints).await?;
	resolve_user_code(navigator, session, endpoints, tenant).await?;

	info!(target = "bugyo", tenant, "logged in");
	Ok(())
}

/// Re-runs the user-code step and reports whether it resolved a code.
///
/// Not a pure query: it overwrites the user code, and the
/// token whenever the page carries one.
pub async fn is_logged_in(navigator: &mut Navigator, session: &mut Session, credentials: &Credentials, endpoints: &Endpoints) -> bool {
	match resolve_user_code(navigator, session, endpoints, credentials.tenant_code()).await {
		Ok(()) => session.user_code().is_some(),
		Err(err) => {
			debug!(target = "bugyo", error = %err, "login check failed");
			false
		}
	}
}

async fn acquire_token(navigator: &mut Navigator, session: &mut Session, endpoints: &Endpoints, tenant: &str) -> Result<()> {
	let url = endpoints.login_page(tenant);
	let doc = navigator.fetch(session, &url).await?;

	let token = markup::find_token_value(&doc.parse()).ok_or(Error::NoToken { url })?;
	session.set_csrf_token(token);
	session.set_auth_state(AuthState::TokenAcquired);
	debug!(target = "bugyo", "token acquired");
	Ok(())
}

async fn check_authentication_method(navigator: &mut Navigator, session: &mut Session, credentials: &Credentials, endpoints: &Endpoints) -> Result<()> {
	let url = endpoints.check_authentication_method(credentials.tenant_code());
	let form = Form::from(CheckAuthenticationMethod {
		obc_id: credentials.account_id().as_str(),
	});

	navigator.submit(session, &url, form).await?;
	session.set_auth_state(AuthState::AuthMethodChecked);
	debug!(target = "bugyo", "authentication method checked");
	Ok(())
}

async fn authenticate(navigator: &mut Navigator, session: &mut Session, credentials: &Credentials, endpoints: &Endpoints) -> Result<()> {
	let url = endpoints.login(credentials.tenant_code());
	let form = Form::from(LoginRequest {
		obc_id: credentials.account_id().as_str(),
		password: credentials.password().expose(),
		token: session.csrf_token(),
	});

	navigator.submit(session, &url, form).await?;
	session.set_auth_state(AuthState::Authenticated);
	debug!(target = "bugyo", "credentials accepted");
	Ok(())
}

/// Step 4. The user code is cleared before scraping, and the token is stored
/// whenever present, even if the user code is missing.
pub(crate) async fn resolve_user_code(navigator: &mut Navigator, session: &mut Session, endpoints: &Endpoints, tenant: &str) -> Result<()> {
	let url = endpoints.redirect(tenant);
	let doc = navigator.fetch(session, &url).await?;

	let (user_code, token) = {
		let html = doc.parse();
		(markup::find_user_code(&html), markup::find_token_value(&html))
	};

	let resolved = user_code.is_some();
	session.set_user_code(user_code);
	let has_token = token.is_some();
	if let Some(token) = token {
		session.set_csrf_token(token);
	}

	if !resolved {
		if session.auth_state() == AuthState::UserCodeResolved {
			session.set_auth_state(AuthState::Unauthenticated);
		}
		return Err(Error::NoUserCode { url });
	}
	if !has_token {
		return Err(Error::NoToken { url });
	}

	session.set_auth_state(AuthState::UserCodeResolved);
	debug!(target = "bugyo", user_code = session.user_code().unwrap_or_default(), "user code resolved");
	Ok(())
}
