//! Punch flow: open the punch page for its token, then post the clock event.

use bugyo_protocol::{ClockType, Form, InsertReadDateTime, Position};
use tracing::{debug, info};

use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use crate::markup;
use crate::session::Session;
use crate::transport::Navigator;

/// Records `clock_type` for the logged-in user.
///
/// # Errors
///
/// - [`Error::LoginRequired`] without a user code; nothing is sent
/// - [`Error::NoToken`] when the punch page lacks a token
/// - transport errors from either request, unchanged
pub async fn punchmark(
	navigator: &mut Navigator,
	session: &mut Session,
	endpoints: &Endpoints,
	tenant: &str,
	clock_type: ClockType,
	position: Position,
) -> Result<()> {
	let user_code = session.user_code().ok_or(Error::LoginRequired)?.to_string();

	open_punch_page(navigator, session, endpoints, tenant, &user_code).await?;
	insert_read_date_time(navigator, session, endpoints, tenant, &user_code, clock_type, position).await?;

	info!(target = "bugyo", tenant, %clock_type, "punch recorded");
	Ok(())
}

async fn open_punch_page(navigator: &mut Navigator, session: &mut Session, endpoints: &Endpoints, tenant: &str, user_code: &str) -> Result<()> {
	let url = endpoints.punchmark_page(tenant, user_code);
	let doc = navigator.fetch(session, &url).await?;

	let token = markup::find_token_value(&doc.parse()).ok_or(Error::NoToken { url })?;
	session.set_csrf_token(token);
	debug!(target = "bugyo", "punch page token acquired");
	Ok(())
}

async fn insert_read_date_time(
	navigator: &mut Navigator,
	session: &mut Session,
	endpoints: &Endpoints,
	tenant: &str,
	user_code: &str,
	clock_type: ClockType,
	position: Position,
) -> Result<()> {
	let url = endpoints.insert_read_date_time(tenant, user_code);
	let form = Form::from(InsertReadDateTime { clock_type, position });

	navigator.submit(session, &url, form).await?;
	Ok(())
}
