//! Application credentials and redirect settings supplied by the embedding service.

// crates.io
use oauth2::{ClientId, ClientSecret, Scope};
// self
use crate::_prelude::*;

/// Static OAuth client configuration for one Lark/Feishu application.
///
/// The struct deserializes from the usual config formats, e.g.
///
/// ```json
/// { "client_id": "cli_a1b2", "client_secret": "…", "redirect_uri": "https://app/cb", "scopes": ["contact:user.email:readonly"] }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Application identifier (`app_id`).
	pub client_id: ClientId,
	/// Application secret (`app_secret`); redacted in `Debug` output.
	pub client_secret: ClientSecret,
	/// Redirect URI registered with the provider.
	#[serde(default)]
	pub redirect_uri: Option<Url>,
	/// Requested scopes, sent in the configured order.
	#[serde(default)]
	pub scopes: Vec<Scope>,
}
impl ClientConfig {
	/// Creates a configuration without redirect URI or scopes.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: ClientId::new(client_id.into()),
			client_secret: ClientSecret::new(client_secret.into()),
			redirect_uri: None,
			scopes: Vec::new(),
		}
	}

	/// Sets the redirect URI.
	pub fn with_redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Appends scopes in order.
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes.extend(scopes.into_iter().map(|scope| Scope::new(scope.into())));

		self
	}

	/// Space-joined scope parameter, or `None` when no scope is configured.
	pub fn scope_param(&self) -> Option<String> {
		if self.scopes.is_empty() {
			return None;
		}

		Some(self.scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(" "))
	}
}
