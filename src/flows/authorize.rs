//! Browser redirect for the authorization step.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*, config::ClientConfig, flows::LarkClient, http::LarkHttpClient,
	oauth::TransportErrorMapper,
};

const STATE_LEN: usize = 32;

/// Redirect URL paired with the `state` value it carries.
///
/// Persist the request (e.g. in the user's session) and call
/// [`AuthorizationRequest::validate_state`] when the provider redirects back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
	/// Opaque value echoed back by the provider.
	pub state: String,
	/// URL the user agent should be sent to.
	pub authorize_url: Url,
}
impl AuthorizationRequest {
	/// Checks the `state` returned on the callback against the issued value.
	pub fn validate_state(&self, returned: &str) -> Result<()> {
		if self.state == returned { Ok(()) } else { Err(Error::StateMismatch) }
	}
}

impl<C, M> LarkClient<C, M>
where
	C: ?Sized + LarkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the URL the user agent is redirected to.
	///
	/// An empty `state` is omitted from the query.
	pub fn authorize_url(&self, state: &str) -> Url {
		build_authorize_url(&self.descriptor.endpoints.authorization, &self.config, state)
	}

	/// Generates a random `state` and the matching authorization URL.
	pub fn start_authorization(&self) -> AuthorizationRequest {
		let state = random_state();
		let authorize_url = self.authorize_url(&state);

		AuthorizationRequest { state, authorize_url }
	}
}

pub(crate) fn build_authorize_url(base: &Url, config: &ClientConfig, state: &str) -> Url {
	let mut url = base.clone();

	{
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("response_type", "code").append_pair("app_id", config.client_id.as_str());

		if let Some(redirect_uri) = &config.redirect_uri {
			pairs.append_pair("redirect_uri", redirect_uri.as_str());
		}
		if let Some(scope) = config.scope_param() {
			pairs.append_pair("scope", &scope);
		}
		if !state.is_empty() {
			pairs.append_pair("state", state);
		}
	}

	url
}

fn random_state() -> String {
	rand::rng().sample_iter(&Alphanumeric).take(STATE_LEN).map(char::from).collect()
}
