//! `bugyoclient.yaml`: where it lives, what it holds, and how it is captured.
//!
//! ```yaml
//! tenant_code: acme
//! obc_id: 1234
//! password: secret
//! position:            # optional, defaults to the portal's placeholder
//!   latitude: 35.6812
//!   longitude: 139.7671
//!   accuracy: 0
//! endpoints:           # optional, for staging portals
//!   identity_base_url: https://id.obc.jp
//!   timeclock_base_url: https://hromssp.obc.jp
//! ```

use std::ffi::OsString;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use bugyo::{ClientConfig, Credentials, Endpoints, Position};
use bugyo_protocol::REDACTED;
use dialoguer::{Input, Password};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, Result};
use crate::output::ConfigData;

pub const CONFIG_FILE_NAME: &str = "bugyoclient.yaml";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "BUGYO_CONFIG";

/// On-disk shape of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
	#[serde(default)]
	pub tenant_code: String,
	#[serde(default, deserialize_with = "text_or_number")]
	pub obc_id: String,
	#[serde(default)]
	pub password: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position: Option<Position>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub endpoints: Option<EndpointsFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointsFile {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub identity_base_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeclock_base_url: Option<String>,
}

// OBCiDs are numeric, so hand-written files often leave them unquoted.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Text(String),
		Number(u64),
	}

	Ok(match Raw::deserialize(deserializer)? {
		Raw::Text(text) => text,
		Raw::Number(number) => number.to_string(),
	})
}

impl FileConfig {
	/// Checks the three required keys, in file order.
	pub fn validate(&self, path: &Path) -> Result<()> {
		for (key, value) in [("tenant_code", &self.tenant_code), ("obc_id", &self.obc_id), ("password", &self.password)] {
			if value.trim().is_empty() {
				return Err(CliError::config(path, format!("{key} is required")));
			}
		}
		Ok(())
	}

	pub fn credentials(&self) -> Result<Credentials> {
		Ok(Credentials::new(self.tenant_code.as_str(), self.obc_id.as_str(), self.password.as_str())?)
	}

	/// Endpoint table with the file's overrides applied over the defaults.
	pub fn endpoints(&self) -> Result<Endpoints> {
		let defaults = Endpoints::default();
		let Some(overrides) = &self.endpoints else {
			return Ok(defaults);
		};
		let identity = overrides.identity_base_url.as_deref().unwrap_or(defaults.identity_base().as_str());
		let timeclock = overrides.timeclock_base_url.as_deref().unwrap_or(defaults.timeclock_base().as_str());
		Ok(Endpoints::parse(identity, timeclock)?)
	}

	/// Applies position and endpoint overrides to `config`.
	pub fn apply(&self, config: ClientConfig) -> Result<ClientConfig> {
		let config = config.with_endpoints(self.endpoints()?);
		Ok(match self.position {
			Some(position) => config.with_position(position),
			None => config,
		})
	}

	/// Masked view for `config show`.
	pub fn describe(&self, path: &Path) -> Result<ConfigData> {
		let endpoints = self.endpoints()?;
		Ok(ConfigData {
			path: path.to_path_buf(),
			tenant_code: self.tenant_code.clone(),
			obc_id: self.obc_id.clone(),
			password: masked(&self.password),
			position: self.position.unwrap_or_default(),
			identity_base_url: endpoints.identity_base().to_string(),
			timeclock_base_url: endpoints.timeclock_base().to_string(),
		})
	}
}

fn masked(password: &str) -> String {
	if password.is_empty() { String::new() } else { REDACTED.to_string() }
}

/// Picks the config path: `--config`, then `$BUGYO_CONFIG`, then next to the executable.
pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
	let exe = std::env::current_exe()?;
	resolve_path_from(explicit, std::env::var_os(CONFIG_ENV), &exe)
}

fn resolve_path_from(explicit: Option<PathBuf>, env: Option<OsString>, exe: &Path) -> Result<PathBuf> {
	if let Some(path) = explicit {
		return Ok(path);
	}
	if let Some(path) = env.filter(|value| !value.is_empty()) {
		return Ok(PathBuf::from(path));
	}
	let dir = exe.parent().ok_or_else(|| CliError::config(exe, "executable has no parent directory"))?;
	Ok(dir.join(CONFIG_FILE_NAME))
}

/// Reads and validates an existing config file.
pub fn load(path: &Path) -> Result<FileConfig> {
	let content = fs::read_to_string(path).map_err(|err| match err.kind() {
		std::io::ErrorKind::NotFound => CliError::config(path, "config file not found; run `bugyo config init`"),
		_ => CliError::Io(err),
	})?;
	let config = parse(&content, path)?;
	debug!(target = "bugyo-cli", path = %path.display(), "config loaded");
	Ok(config)
}

fn parse(content: &str, path: &Path) -> Result<FileConfig> {
	let config: FileConfig = serde_yaml::from_str(content).map_err(|source| CliError::Yaml {
		path: path.to_path_buf(),
		source,
	})?;
	config.validate(path)?;
	Ok(config)
}

/// Writes `config` as YAML, creating parent directories. Owner-only on Unix.
pub fn save(path: &Path, config: &FileConfig) -> Result<()> {
	let yaml = serde_yaml::to_string(config).map_err(|source| CliError::Yaml {
		path: path.to_path_buf(),
		source,
	})?;
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}
	fs::write(path, yaml)?;
	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
	}
	info!(target = "bugyo-cli", path = %path.display(), "config written");
	Ok(())
}

/// Loads `path`, or captures and writes a new config when it does not exist.
pub fn load_or_capture(path: &Path) -> Result<FileConfig> {
	if path.exists() {
		return load(path);
	}
	if !std::io::stdin().is_terminal() {
		return Err(CliError::config(
			path,
			"no config file and stdin is not a terminal; create it with `bugyo config init`",
		));
	}
	capture_and_save(path)
}

/// Prompts for credentials, keeping optional sections of any existing file.
pub fn capture_and_save(path: &Path) -> Result<FileConfig> {
	if !std::io::stdin().is_terminal() {
		return Err(CliError::config(path, "cannot prompt for credentials: stdin is not a terminal"));
	}
	let existing = if path.exists() { load(path).ok() } else { None };
	let mut config = prompt(existing.as_ref())?;
	if let Some(existing) = existing {
		config.position = existing.position;
		config.endpoints = existing.endpoints;
	}
	save(path, &config)?;
	Ok(config)
}

fn prompt(existing: Option<&FileConfig>) -> Result<FileConfig> {
	let mut tenant = Input::<String>::new().with_prompt("Tenant code").validate_with(|input: &String| validate_tenant_code(input));
	if let Some(existing) = existing {
		tenant = tenant.default(existing.tenant_code.clone());
	}
	let tenant_code = tenant.interact_text()?;

	let mut obc = Input::<String>::new().with_prompt("OBCiD").validate_with(|input: &String| validate_obc_id(input));
	if let Some(existing) = existing {
		obc = obc.default(existing.obc_id.clone());
	}
	let obc_id = obc.interact_text()?;

	let password = Password::new().with_prompt("Password").interact()?;

	Ok(FileConfig {
		tenant_code: tenant_code.trim().to_string(),
		obc_id: obc_id.trim().to_string(),
		password,
		..FileConfig::default()
	})
}

fn validate_tenant_code(input: &str) -> std::result::Result<(), &'static str> {
	if input.trim().is_empty() { Err("tenant code is required") } else { Ok(()) }
}

fn validate_obc_id(input: &str) -> std::result::Result<(), &'static str> {
	let input = input.trim();
	if input.is_empty() {
		return Err("OBCiD is required");
	}
	if !input.chars().all(|c| c.is_ascii_digit()) {
		return Err("OBCiD must be numeric");
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn unquoted_obc_id_is_read_as_text() {
		let config = parse("tenant_code: acme\nobc_id: 1234\npassword: secret\n", Path::new("c.yaml")).unwrap();
		assert_eq!(config.obc_id, "1234");
		assert_eq!(config.credentials().unwrap().account_id().as_str(), "1234");
	}

	#[test]
	fn missing_keys_are_reported_with_the_path() {
		let err = parse("tenant_code: acme\nobc_id: \"1234\"\n", Path::new("/etc/bugyoclient.yaml")).unwrap_err();
		assert_eq!(err.to_string(), "password is required [/etc/bugyoclient.yaml]");

		let err = parse("obc_id: 1234\npassword: secret\n", Path::new("c.yaml")).unwrap_err();
		assert_eq!(err.to_string(), "tenant_code is required [c.yaml]");
	}

	#[test]
	fn malformed_yaml_is_a_yaml_error() {
		let err = parse("tenant_code: [unterminated", Path::new("c.yaml")).unwrap_err();
		assert!(matches!(err, CliError::Yaml { .. }), "unexpected error: {err}");
	}

	#[test]
	fn saved_config_loads_back() {
		let tmp = TempDir::new().expect("temp dir should be created");
		let path = tmp.path().join("nested").join(CONFIG_FILE_NAME);
		let config = FileConfig {
			tenant_code: "acme".into(),
			obc_id: "1234".into(),
			password: "secret".into(),
			position: Some(Position::new(34.7025, 135.4959)),
			endpoints: None,
		};

		save(&path, &config).unwrap();
		assert_eq!(load(&path).unwrap(), config);

		let written = fs::read_to_string(&path).unwrap();
		assert!(!written.contains("endpoints"));
	}

	#[cfg(unix)]
	#[test]
	fn saved_config_is_owner_only() {
		use std::os::unix::fs::PermissionsExt;

		let tmp = TempDir::new().expect("temp dir should be created");
		let path = tmp.path().join(CONFIG_FILE_NAME);
		save(&path, &FileConfig::default()).unwrap();

		let mode = fs::metadata(&path).unwrap().permissions().mode();
		assert_eq!(mode & 0o777, 0o600);
	}

	#[test]
	fn loading_a_missing_file_points_at_init() {
		let tmp = TempDir::new().expect("temp dir should be created");
		let err = load(&tmp.path().join(CONFIG_FILE_NAME)).unwrap_err();
		assert!(err.to_string().contains("bugyo config init"));
	}

	#[test]
	fn path_resolution_order() {
		let exe = Path::new("/opt/bugyo/bin/bugyo");

		let explicit = resolve_path_from(Some("/tmp/a.yaml".into()), Some("/tmp/b.yaml".into()), exe).unwrap();
		assert_eq!(explicit, PathBuf::from("/tmp/a.yaml"));

		let from_env = resolve_path_from(None, Some("/tmp/b.yaml".into()), exe).unwrap();
		assert_eq!(from_env, PathBuf::from("/tmp/b.yaml"));

		let beside_exe = resolve_path_from(None, Some(OsString::new()), exe).unwrap();
		assert_eq!(beside_exe, PathBuf::from("/opt/bugyo/bin/bugyoclient.yaml"));
	}

	#[test]
	fn endpoint_overrides_are_partial() {
		let config = FileConfig {
			endpoints: Some(EndpointsFile {
				identity_base_url: Some("http://127.0.0.1:8080".into()),
				timeclock_base_url: None,
			}),
			..FileConfig::default()
		};

		let endpoints = config.endpoints().unwrap();
		assert_eq!(endpoints.identity_base().as_str(), "http://127.0.0.1:8080/");
		assert_eq!(endpoints.timeclock_base(), Endpoints::default().timeclock_base());
	}

	#[test]
	fn bad_endpoint_is_rejected() {
		let config = FileConfig {
			endpoints: Some(EndpointsFile {
				identity_base_url: Some("not a url".into()),
				timeclock_base_url: None,
			}),
			..FileConfig::default()
		};
		assert!(config.endpoints().is_err());
	}

	#[test]
	fn position_override_reaches_client_config() {
		let config = FileConfig {
			position: Some(Position::new(34.7025, 135.4959).with_accuracy(12.0)),
			..FileConfig::default()
		};
		let client_config = config.apply(ClientConfig::default()).unwrap();
		assert_eq!(client_config.position, Position::new(34.7025, 135.4959).with_accuracy(12.0));
	}

	#[test]
	fn describe_masks_the_password() {
		let config = FileConfig {
			tenant_code: "acme".into(),
			obc_id: "1234".into(),
			password: "hunter2".into(),
			..FileConfig::default()
		};
		let data = config.describe(Path::new("c.yaml")).unwrap();
		assert_eq!(data.password, "********");
		assert_eq!(data.position, Position::default());
	}

	#[test]
	fn obc_id_prompt_accepts_digits_only() {
		assert!(validate_obc_id("12345").is_ok());
		assert_eq!(validate_obc_id(" "), Err("OBCiD is required"));
		assert_eq!(validate_obc_id("12a4"), Err("OBCiD must be numeric"));
		assert!(validate_tenant_code("").is_err());
	}
}
