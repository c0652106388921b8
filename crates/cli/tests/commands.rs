use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

fn run_bugyo(args: &[&str], config_env: Option<&Path>) -> (Option<i32>, String, String) {
	let mut command = Command::new(env!("CARGO_BIN_EXE_bugyo"));
	command.args(args).env_remove("BUGYO_CONFIG").env_remove("RUST_LOG").stdin(Stdio::null());
	if let Some(path) = config_env {
		command.env("BUGYO_CONFIG", path);
	}
	let output = command.output().expect("failed to execute bugyo");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	(output.status.code(), stdout, stderr)
}

fn parse_json(stdout: &str) -> Value {
	serde_json::from_str(stdout).unwrap_or_else(|err| panic!("stdout is not JSON ({err}): {stdout}"))
}

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
	let path = dir.path().join("bugyoclient.yaml");
	std::fs::write(&path, body).expect("config should be written");
	path
}

#[test]
fn version_names_the_binary() {
	let (code, stdout, _) = run_bugyo(&["--version"], None);
	assert_eq!(code, Some(0));
	assert!(stdout.starts_with("bugyo "), "unexpected version line: {stdout}");
}

#[test]
fn unknown_clock_type_is_a_usage_error() {
	let (code, _, stderr) = run_bugyo(&["punch", "lunch"], None);
	assert_eq!(code, Some(2));
	assert!(stderr.contains("invalid value"), "stderr: {stderr}");
}

#[test]
fn config_show_masks_password() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let path = write_config(&tmp, "tenant_code: acme\nobc_id: 1234\npassword: hunter2\n");

	let (code, stdout, stderr) = run_bugyo(&["config", "show", "-f", "json", "--config", path.to_str().unwrap()], None);
	assert_eq!(code, Some(0), "stderr: {stderr}");
	assert!(!stdout.contains("hunter2"));

	let json = parse_json(&stdout);
	assert_eq!(json["ok"], true);
	assert_eq!(json["command"], "config.show");
	assert_eq!(json["data"]["tenantCode"], "acme");
	assert_eq!(json["data"]["obcId"], "1234");
	assert_eq!(json["data"]["password"], "********");
	assert_eq!(json["data"]["identityBaseUrl"], "https://id.obc.jp/");
}

#[test]
fn config_path_can_come_from_the_environment() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let path = write_config(&tmp, "tenant_code: envco\nobc_id: \"42\"\npassword: pw\n");

	let (code, stdout, stderr) = run_bugyo(&["config", "show"], Some(&path));
	assert_eq!(code, Some(0), "stderr: {stderr}");
	assert!(stdout.contains("tenant_code: envco"));
	assert!(stdout.contains("password: ********"));
}

#[test]
fn missing_config_fails_without_prompting() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let path = tmp.path().join("absent.yaml");

	let (code, stdout, _) = run_bugyo(&["-f", "json", "config", "show", "--config", path.to_str().unwrap()], None);
	assert_eq!(code, Some(1));

	let json = parse_json(&stdout);
	assert_eq!(json["ok"], false);
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
	assert!(json["error"]["message"].as_str().unwrap().contains("absent.yaml"));

	let (code, _, stderr) = run_bugyo(&["punch", "in", "--config", path.to_str().unwrap()], None);
	assert_eq!(code, Some(1));
	assert!(stderr.contains("stdin is not a terminal"), "stderr: {stderr}");
	assert!(stderr.contains("bugyo config init"), "stderr: {stderr}");
	assert!(!path.exists());
}

#[test]
fn incomplete_config_names_the_missing_key() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let path = write_config(&tmp, "tenant_code: acme\nobc_id: 1234\n");

	let (code, stdout, _) = run_bugyo(&["-f", "json", "punch", "out", "--config", path.to_str().unwrap()], None);
	assert_eq!(code, Some(1));

	let json = parse_json(&stdout);
	assert_eq!(json["command"], "punch");
	assert!(json["error"]["message"].as_str().unwrap().starts_with("password is required ["));
}

#[test]
fn unreachable_portal_is_reported_as_network_error() {
	let listener = TcpListener::bind("127.0.0.1:0").expect("port should bind");
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let tmp = TempDir::new().expect("temp dir should be created");
	let path = write_config(
		&tmp,
		&format!("tenant_code: acme\nobc_id: 1234\npassword: secret\nendpoints:\n  identity_base_url: http://{addr}\n  timeclock_base_url: http://{addr}\n"),
	);

	let (code, stdout, _) = run_bugyo(&["-f", "json", "check", "--config", path.to_str().unwrap()], None);
	assert_eq!(code, Some(1));
	assert_eq!(parse_json(&stdout)["error"]["code"], "NETWORK_ERROR");
}

#[test]
fn silent_portal_hits_the_deadline() {
	// Bound but never accepted: the connection sits in the backlog and no reply ever comes.
	let listener = TcpListener::bind("127.0.0.1:0").expect("port should bind");
	let addr = listener.local_addr().unwrap();

	let tmp = TempDir::new().expect("temp dir should be created");
	let path = write_config(
		&tmp,
		&format!("tenant_code: acme\nobc_id: 1234\npassword: secret\nendpoints:\n  identity_base_url: http://{addr}\n  timeclock_base_url: http://{addr}\n"),
	);

	let (code, stdout, _) = run_bugyo(&["-f", "json", "--timeout", "1", "punch", "go", "--config", path.to_str().unwrap()], None);
	assert_eq!(code, Some(1));

	let json = parse_json(&stdout);
	assert_eq!(json["error"]["code"], "TIMEOUT");
	assert_eq!(json["error"]["message"], "timed out after 1s");
	drop(listener);
}
