use bugyo_cli::cli::Cli;
use bugyo_cli::context::CommandContext;
use bugyo_cli::{commands, logging, output};
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose, cli.debug);

	let command = cli.command.name();
	let format = cli.format;

	let result = match CommandContext::new(cli.config, cli.debug, cli.timeout, format) {
		Ok(ctx) => commands::dispatch(cli.command, &ctx).await,
		Err(err) => Err(err),
	};

	if let Err(err) = result {
		error!(target = "bugyo-cli", error = %err, "command failed");
		output::print_failure(command, &err, format);
		std::process::exit(1);
	}
}
