use std::path::PathBuf;

use bugyo::ClockType;
use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "bugyo")]
#[command(about = "Bugyo cloud time clock from the command line")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Config file (defaults to $BUGYO_CONFIG, then bugyoclient.yaml next to the executable)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Dump every request and response to the log (passwords masked)
	#[arg(long, global = true)]
	pub debug: bool,

	/// Abort the command after this many seconds
	#[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
	pub timeout: Option<u64>,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Log in and record a clock event
	Punch {
		#[arg(value_enum)]
		clock: ClockArg,
	},

	/// Log in and confirm the session is live
	Check,

	/// Inspect or (re)create the config file
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

impl Commands {
	/// Name used in output envelopes.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Punch { .. } => "punch",
			Commands::Check => "check",
			Commands::Config { action: ConfigAction::Show } => "config.show",
			Commands::Config { action: ConfigAction::Init } => "config.init",
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
	/// Print the resolved config with the password masked
	Show,
	/// Prompt for credentials and write the config file
	Init,
}

/// Clock event as typed on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ClockArg {
	/// Clock in (出勤)
	In,
	/// Clock out (退勤)
	Out,
	/// Step out (外出)
	Go,
	/// Come back (再入)
	#[value(alias = "returned")]
	Return,
}

impl From<ClockArg> for ClockType {
	fn from(arg: ClockArg) -> Self {
		match arg {
			ClockArg::In => ClockType::ClockIn,
			ClockArg::Out => ClockType::ClockOut,
			ClockArg::Go => ClockType::GoOut,
			ClockArg::Return => ClockType::Returned,
		}
	}
}
