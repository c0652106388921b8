mod check;
mod config;
mod punch;

use crate::cli::{Commands, ConfigAction};
use crate::context::CommandContext;
use crate::error::Result;

pub async fn dispatch(command: Commands, ctx: &CommandContext) -> Result<()> {
	match command {
		Commands::Punch { clock } => punch::execute(clock.into(), ctx).await,
		Commands::Check => check::execute(ctx).await,
		Commands::Config { action } => match action {
			ConfigAction::Show => config::show(ctx),
			ConfigAction::Init => config::init(ctx),
		},
	}
}
