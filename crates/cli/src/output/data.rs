//! Payloads carried in the `data` field of successful results.

use std::path::PathBuf;

use bugyo::{ClockType, Position};
use serde::{Deserialize, Serialize};

use super::model::Summary;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchData {
	pub tenant_code: String,
	pub user_code: String,
	pub clock_type: ClockType,
}

impl Summary for PunchData {
	fn summary(&self) -> String {
		format!("{} recorded for {} ({})", self.clock_type, self.user_code, self.tenant_code)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckData {
	pub tenant_code: String,
	pub user_code: String,
	pub logged_in: bool,
}

impl Summary for CheckData {
	fn summary(&self) -> String {
		format!("session live for {} ({})", self.user_code, self.tenant_code)
	}
}

/// Resolved config with the password masked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigData {
	pub path: PathBuf,
	pub tenant_code: String,
	pub obc_id: String,
	pub password: String,
	pub position: Position,
	pub identity_base_url: String,
	pub timeclock_base_url: String,
}

impl Summary for ConfigData {
	fn summary(&self) -> String {
		format!(
			"{}\n  tenant_code: {}\n  obc_id: {}\n  password: {}\n  position: {}, {} (±{})\n  identity: {}\n  timeclock: {}",
			self.path.display(),
			self.tenant_code,
			self.obc_id,
			self.password,
			self.position.latitude,
			self.position.longitude,
			self.position.accuracy,
			self.identity_base_url,
			self.timeclock_base_url,
		)
	}
}
