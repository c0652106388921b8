use bugyo::ClockType;
use tracing::info;

use crate::context::CommandContext;
use crate::error::{CliError, Result};
use crate::output::{PunchData, ResultBuilder, print_result};

pub async fn execute(clock_type: ClockType, ctx: &CommandContext) -> Result<()> {
	let builder = ResultBuilder::new("punch");
	let mut client = ctx.connect()?;

	client.login().await.map_err(|err| ctx.portal_error(err))?;
	client.punchmark(clock_type).await.map_err(|err| ctx.portal_error(err))?;

	let user_code = client.session().user_code().ok_or(CliError::SessionLost)?.to_string();
	info!(target = "bugyo-cli", %clock_type, user_code = %user_code, "punched");

	let data = PunchData {
		tenant_code: client.credentials().tenant_code().to_string(),
		user_code,
		clock_type,
	};
	print_result(&builder.data(data).build(), ctx.format);
	Ok(())
}
