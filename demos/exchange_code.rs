//! Walks through the Feishu sign-in: print the redirect URL, then exchange the code returned on
//! the callback and look up the signed-in user.
//!
//! ```sh
//! LARK_APP_ID=cli_xxx LARK_APP_SECRET=xxx cargo run --example exchange_code
//! LARK_APP_ID=cli_xxx LARK_APP_SECRET=xxx LARK_CODE=<code> cargo run --example exchange_code
//! ```

// std
use std::{env, time::Duration};
// crates.io
use color_eyre::{Result, eyre::WrapErr};
use url::Url;
// self
use oauth2_lark::{
	config::ClientConfig, context::CallContext, flows::LarkClient, provider::ProviderDescriptor,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let app_id = env::var("LARK_APP_ID").wrap_err("LARK_APP_ID is not set")?;
	let app_secret = env::var("LARK_APP_SECRET").wrap_err("LARK_APP_SECRET is not set")?;
	let config = ClientConfig::new(app_id, app_secret)
		.with_redirect_uri(Url::parse("https://app.example.com/login/lark")?)
		.with_scopes(["contact:user.email:readonly"]);
	let client = LarkClient::new(ProviderDescriptor::feishu()?, config);
	let Ok(code) = env::var("LARK_CODE") else {
		let request = client.start_authorization();

		println!("Send your user to {}.", request.authorize_url);
		println!("Keep state `{}` to validate the callback.", request.state);

		return Ok(());
	};
	let ctx = CallContext::new().with_timeout(Duration::from_secs(10));
	let token = client.exchange_code(&ctx, &code).await?;

	println!("User token expires at {}.", token.expires_at);

	let identity = client.user_info(&ctx, &token).await?;

	println!("Signed in as {} <{}> (id {}).", identity.name, identity.email, identity.id);

	Ok(())
}
