use crate::config;
use crate::context::CommandContext;
use crate::error::Result;
use crate::output::{ResultBuilder, print_result};

/// Prints the resolved config. Never prompts.
pub fn show(ctx: &CommandContext) -> Result<()> {
	let file = config::load(&ctx.config_path)?;
	let data = file.describe(&ctx.config_path)?;
	print_result(&ResultBuilder::new("config.show").data(data).build(), ctx.format);
	Ok(())
}

/// Prompts for credentials and (over)writes the config file.
pub fn init(ctx: &CommandContext) -> Result<()> {
	let file = config::capture_and_save(&ctx.config_path)?;
	let data = file.describe(&ctx.config_path)?;
	print_result(&ResultBuilder::new("config.init").data(data).build(), ctx.format);
	Ok(())
}
