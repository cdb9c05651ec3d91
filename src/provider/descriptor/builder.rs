// self
use crate::{
	_prelude::*,
	http::DEFAULT_RESPONSE_BODY_LIMIT,
	provider::{ProviderDescriptor, ProviderEndpoints},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// A required endpoint was not configured.
	#[error("Missing {endpoint} endpoint.")]
	MissingEndpoint {
		/// Which endpoint is missing.
		endpoint: &'static str,
	},
	/// A URL could not be parsed.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidUrl {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTP(S).
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Query parameters cannot be appended after a fragment.
	#[error("The authorization endpoint must not carry a fragment: {url}.")]
	AuthorizationFragment {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// A zero cap would reject every response.
	#[error("Response body limit must be greater than zero.")]
	ZeroBodyLimit,
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Browser-facing authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Application access token endpoint.
	pub app_access_token_endpoint: Option<Url>,
	/// User access token endpoint.
	pub token_endpoint: Option<Url>,
	/// User info endpoint.
	pub user_info_endpoint: Option<Url>,
	/// Maximum accepted response body size in bytes.
	pub response_body_limit: usize,
}
impl ProviderDescriptorBuilder {
	/// Creates an empty builder with the default body cap.
	pub fn new() -> Self {
		Self {
			authorization_endpoint: None,
			app_access_token_endpoint: None,
			token_endpoint: None,
			user_info_endpoint: None,
			response_body_limit: DEFAULT_RESPONSE_BODY_LIMIT,
		}
	}

	/// Fills every endpoint from an `open-apis` base URL using the standard paths.
	pub fn open_apis_base(self, base: &str) -> Result<Self, ProviderDescriptorError> {
		let join = |endpoint: &'static str, path: &str| {
			Url::parse(base)
				.and_then(|base| base.join(path))
				.map_err(|source| ProviderDescriptorError::InvalidUrl { endpoint, source })
		};

		Ok(self
			.authorization_endpoint(join("authorization", "authen/v1/index")?)
			.app_access_token_endpoint(join(
				"app_access_token",
				"auth/v3/app_access_token/internal",
			)?)
			.token_endpoint(join("token", "authen/v1/access_token")?)
			.user_info_endpoint(join("user_info", "authen/v1/user_info")?))
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the application access token endpoint.
	pub fn app_access_token_endpoint(mut self, url: Url) -> Self {
		self.app_access_token_endpoint = Some(url);

		self
	}

	/// Sets the user access token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the user info endpoint.
	pub fn user_info_endpoint(mut self, url: Url) -> Self {
		self.user_info_endpoint = Some(url);

		self
	}

	/// Overrides the response body cap.
	pub fn response_body_limit(mut self, limit: usize) -> Self {
		self.response_body_limit = limit;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let missing = |endpoint| ProviderDescriptorError::MissingEndpoint { endpoint };
		let endpoints = ProviderEndpoints {
			authorization: self.authorization_endpoint.ok_or_else(|| missing("authorization"))?,
			app_access_token: self
				.app_access_token_endpoint
				.ok_or_else(|| missing("app_access_token"))?,
			token: self.token_endpoint.ok_or_else(|| missing("token"))?,
			user_info: self.user_info_endpoint.ok_or_else(|| missing("user_info"))?,
		};
		let descriptor =
			ProviderDescriptor { endpoints, response_body_limit: self.response_body_limit };

		descriptor.validate()?;

		Ok(descriptor)
	}
}
impl Default for ProviderDescriptorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	///
	/// Builders call this automatically; descriptors loaded through serde should call it
	/// before use.
	pub fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_endpoint("app_access_token", &self.endpoints.app_access_token)?;
		validate_endpoint("token", &self.endpoints.token)?;
		validate_endpoint("user_info", &self.endpoints.user_info)?;

		if self.endpoints.authorization.fragment().is_some() {
			return Err(ProviderDescriptorError::AuthorizationFragment {
				url: self.endpoints.authorization.to_string(),
			});
		}
		if self.response_body_limit == 0 {
			return Err(ProviderDescriptorError::ZeroBodyLimit);
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	match url.scheme() {
		"https" | "http" => Ok(()),
		_ => Err(ProviderDescriptorError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}
