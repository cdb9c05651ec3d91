//! Provider descriptor data structures shared by all phases.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, http::DEFAULT_RESPONSE_BODY_LIMIT};

const FEISHU_BASE: &str = "https://open.feishu.cn/open-apis/";
const LARK_SUITE_BASE: &str = "https://open.larksuite.com/open-apis/";

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Browser-facing authorization endpoint.
	pub authorization: Url,
	/// Endpoint exchanging application credentials for an application access token.
	pub app_access_token: Url,
	/// Endpoint exchanging an authorization code for a user access token.
	pub token: Url,
	/// Endpoint returning the authenticated user's profile.
	pub user_info: Url,
}

/// Immutable provider descriptor consumed by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Maximum accepted response body size in bytes.
	#[serde(default = "default_response_body_limit")]
	pub response_body_limit: usize,
}
impl ProviderDescriptor {
	/// Creates a new builder.
	pub fn builder() -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new()
	}

	/// Descriptor for the mainland Feishu deployment (`open.feishu.cn`).
	pub fn feishu() -> Result<Self, ProviderDescriptorError> {
		Self::builder().open_apis_base(FEISHU_BASE)?.build()
	}

	/// Descriptor for the international Lark Suite deployment (`open.larksuite.com`).
	pub fn lark_suite() -> Result<Self, ProviderDescriptorError> {
		Self::builder().open_apis_base(LARK_SUITE_BASE)?.build()
	}
}

fn default_response_body_limit() -> usize {
	DEFAULT_RESPONSE_BODY_LIMIT
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn presets_point_at_open_apis() {
		let feishu = ProviderDescriptor::feishu().expect("Feishu preset should be valid.");

		assert_eq!(
			feishu.endpoints.authorization.as_str(),
			"https://open.feishu.cn/open-apis/authen/v1/index"
		);
		assert_eq!(
			feishu.endpoints.app_access_token.as_str(),
			"https://open.feishu.cn/open-apis/auth/v3/app_access_token/internal"
		);
		assert_eq!(
			feishu.endpoints.token.as_str(),
			"https://open.feishu.cn/open-apis/authen/v1/access_token"
		);
		assert_eq!(
			feishu.endpoints.user_info.as_str(),
			"https://open.feishu.cn/open-apis/authen/v1/user_info"
		);
		assert_eq!(feishu.response_body_limit, DEFAULT_RESPONSE_BODY_LIMIT);

		let lark = ProviderDescriptor::lark_suite().expect("Lark Suite preset should be valid.");

		assert_eq!(lark.endpoints.token.host_str(), Some("open.larksuite.com"));
	}

	#[test]
	fn descriptor_deserializes_with_default_limit() {
		let payload = r#"{"endpoints":{
			"authorization":"https://sso.example.com/authen/v1/index",
			"app_access_token":"https://sso.example.com/auth/v3/app_access_token/internal",
			"token":"https://sso.example.com/authen/v1/access_token",
			"user_info":"https://sso.example.com/authen/v1/user_info"}}"#;
		let descriptor: ProviderDescriptor =
			serde_json::from_str(payload).expect("Descriptor should deserialize from JSON.");

		assert_eq!(descriptor.response_body_limit, DEFAULT_RESPONSE_BODY_LIMIT);
		assert_eq!(descriptor.endpoints.user_info.path(), "/authen/v1/user_info");
	}
}
