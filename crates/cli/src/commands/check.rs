use crate::context::CommandContext;
use crate::error::{CliError, Result};
use crate::output::{CheckData, ResultBuilder, print_result};

/// Logs in, then asks the portal whether it still recognises the session.
pub async fn execute(ctx: &CommandContext) -> Result<()> {
	let builder = ResultBuilder::new("check");
	let mut client = ctx.connect()?;

	client.login().await.map_err(|err| ctx.portal_error(err))?;
	let user_code = client.session().user_code().unwrap_or_default().to_string();

	if !client.is_logged_in().await {
		return Err(CliError::SessionLost);
	}

	let data = CheckData {
		tenant_code: client.credentials().tenant_code().to_string(),
		user_code,
		logged_in: true,
	};
	print_result(&builder.data(data).build(), ctx.format);
	Ok(())
}
