//! Form bodies posted by the login and punch pages.
//!
//! Field names and fixed values match what the portal's own pages submit.

use crate::clock::ClockType;
use crate::form::Form;
use crate::headers::{REQUEST_VERIFICATION_TOKEN, X_REQUESTED_WITH, XML_HTTP_REQUEST};
use crate::position::Position;

/// Form field carrying the account id (OBCiD).
pub const OBC_ID_FIELD: &str = "OBCiD";

/// Form field carrying the password.
pub const PASSWORD_FIELD: &str = "Password";

/// Form fields masked in any diagnostic output.
pub const SENSITIVE_FIELDS: &[&str] = &[OBC_ID_FIELD, PASSWORD_FIELD];

/// Body of `login/CheckAuthenticationMethod`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckAuthenticationMethod<'a> {
	pub obc_id: &'a str,
}

impl From<CheckAuthenticationMethod<'_>> for Form {
	fn from(req: CheckAuthenticationMethod<'_>) -> Self {
		Form::new().with(OBC_ID_FIELD, req.obc_id).with("isBugyoCloud", "false")
	}
}

/// Body of `login/login/`.
///
/// The anti-forgery token travels in the body as well as in the header.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest<'a> {
	pub obc_id: &'a str,
	pub password: &'a str,
	pub token: &'a str,
}

impl std::fmt::Debug for LoginRequest<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LoginRequest")
			.field("obc_id", &self.obc_id)
			.field("password", &crate::form::REDACTED)
			.field("token", &self.token)
			.finish()
	}
}

impl From<LoginRequest<'_>> for Form {
	fn from(req: LoginRequest<'_>) -> Self {
		Form::new()
			.with(OBC_ID_FIELD, req.obc_id)
			.with(PASSWORD_FIELD, req.password)
			.with(REQUEST_VERIFICATION_TOKEN, req.token)
			.with(X_REQUESTED_WITH, XML_HTTP_REQUEST)
	}
}

/// Body of `TimeClock/InsertReadDateTime/`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertReadDateTime {
	pub clock_type: ClockType,
	pub position: Position,
}

impl From<InsertReadDateTime> for Form {
	fn from(req: InsertReadDateTime) -> Self {
		Form::new()
			.with("ClockType", req.clock_type.as_str())
			.with("LaborSystemID", "0")
			.with("LaborSystemCode", "")
			.with("LaborSystemName", "")
			.with("PositionLatitude", req.position.latitude.to_string())
			.with("PositionLongitude", req.position.longitude.to_string())
			.with("PositionAccuracy", req.position.accuracy.to_string())
	}
}
