use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber.
///
/// `RUST_LOG` wins over `-v`; `--debug` always adds `bugyo=debug` so the
/// request dumps it enables are actually printed.
pub fn init_logging(verbose: u8, debug: bool) {
	let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
	if debug {
		if let Ok(directive) = "bugyo=debug".parse() {
			filter = filter.add_directive(directive);
		}
	}

	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).try_init();
}

fn default_directives(verbose: u8) -> String {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	format!("bugyo={level},bugyo_cli={level}")
}
