//! Provider response envelopes and the decoder shared by every phase.
//!
//! Lark wraps every payload in `{"code": <i64>, "msg": <string>, ...}`. A zero `code` is the
//! only success signal; the HTTP status alone says nothing about whether the payload can be
//! trusted. Absent and `null` fields decode as their zero value, so an envelope without a
//! `code` counts as successful.

// crates.io
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::{_prelude::*, auth::NormalizedIdentity, obs::Phase};

/// Provider status code signalling success.
pub const SUCCESS_CODE: i64 = 0;

/// Decodes `body` as `T`, reporting the JSON path of any mismatch.
pub fn decode<T>(phase: Phase, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(body))
		.map_err(|source| Error::Decode { phase, source })
}

fn ensure_code(phase: Phase, code: i64, msg: &str) -> Result<()> {
	if code == SUCCESS_CODE {
		Ok(())
	} else {
		Err(Error::ProviderStatus { phase, code, message: msg.to_owned() })
	}
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(<Option<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope returned by the application access token endpoint.
#[derive(Clone, Deserialize)]
pub struct AppAccessTokenResponse {
	/// Provider status code.
	#[serde(default, deserialize_with = "null_as_default")]
	pub code: i64,
	/// Provider status message.
	#[serde(default, deserialize_with = "null_as_default")]
	pub msg: String,
	/// Application access token.
	#[serde(default, deserialize_with = "null_as_default")]
	pub app_access_token: String,
	/// Token lifetime in seconds (informational).
	#[serde(default, deserialize_with = "null_as_default")]
	pub expire: i64,
}
impl AppAccessTokenResponse {
	/// Fails with [`Error::ProviderStatus`] unless `code` is the success sentinel.
	pub fn ensure_success(&self, phase: Phase) -> Result<()> {
		ensure_code(phase, self.code, &self.msg)
	}
}
impl Debug for AppAccessTokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppAccessTokenResponse")
			.field("code", &self.code)
			.field("msg", &self.msg)
			.field("app_access_token", &"<redacted>")
			.field("expire", &self.expire)
			.finish()
	}
}

/// Envelope returned by the user access token and user info endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct UserTokenResponse {
	/// Provider status code.
	#[serde(default, deserialize_with = "null_as_default")]
	pub code: i64,
	/// Provider status message.
	#[serde(default, deserialize_with = "null_as_default")]
	pub msg: String,
	/// Token and profile payload.
	#[serde(default, deserialize_with = "null_as_default")]
	pub data: UserProfile,
}
impl UserTokenResponse {
	/// Fails with [`Error::ProviderStatus`] unless `code` is the success sentinel.
	pub fn ensure_success(&self, phase: Phase) -> Result<()> {
		ensure_code(phase, self.code, &self.msg)
	}
}

/// Flat provider profile; the token fields are only populated by the code exchange.
///
/// Every field tolerates being absent or `null`.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
	/// Stable user identifier within the tenant.
	#[serde(deserialize_with = "null_as_default")]
	pub user_id: String,
	/// App-scoped user identifier.
	#[serde(deserialize_with = "null_as_default")]
	pub open_id: String,
	/// Developer-scoped user identifier.
	#[serde(deserialize_with = "null_as_default")]
	pub union_id: String,
	/// Tenant identifier.
	#[serde(deserialize_with = "null_as_default")]
	pub tenant_key: String,
	/// Display name.
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	/// English display name.
	#[serde(deserialize_with = "null_as_default")]
	pub en_name: String,
	/// Email address.
	#[serde(deserialize_with = "null_as_default")]
	pub email: String,
	/// Enterprise email address.
	#[serde(deserialize_with = "null_as_default")]
	pub enterprise_email: String,
	/// Mobile number.
	#[serde(deserialize_with = "null_as_default")]
	pub mobile: String,
	/// Avatar URL.
	#[serde(deserialize_with = "null_as_default")]
	pub avatar_url: String,
	/// Avatar thumbnail URL.
	#[serde(deserialize_with = "null_as_default")]
	pub avatar_thumb: String,
	/// Medium avatar URL.
	#[serde(deserialize_with = "null_as_default")]
	pub avatar_middle: String,
	/// Large avatar URL.
	#[serde(deserialize_with = "null_as_default")]
	pub avatar_big: String,
	/// User access token.
	#[serde(deserialize_with = "null_as_default")]
	pub access_token: String,
	/// User refresh token.
	#[serde(deserialize_with = "null_as_default")]
	pub refresh_token: String,
	/// Token type reported by the provider.
	#[serde(deserialize_with = "null_as_default")]
	pub token_type: String,
	/// Access token lifetime in seconds.
	#[serde(deserialize_with = "null_as_default")]
	pub expires_in: i64,
	/// Refresh token lifetime in seconds.
	#[serde(deserialize_with = "null_as_default")]
	pub refresh_expires_in: i64,
}
impl UserProfile {
	/// Projects the profile onto the identity consumed by the rest of the system.
	pub fn to_identity(&self) -> NormalizedIdentity {
		NormalizedIdentity {
			id: self.user_id.clone(),
			name: self.name.clone(),
			email: self.email.clone(),
			login: self.email.clone(),
		}
	}
}
impl Debug for UserProfile {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let redact = |value: &str| if value.is_empty() { "" } else { "<redacted>" };

		f.debug_struct("UserProfile")
			.field("user_id", &self.user_id)
			.field("open_id", &self.open_id)
			.field("union_id", &self.union_id)
			.field("tenant_key", &self.tenant_key)
			.field("name", &self.name)
			.field("en_name", &self.en_name)
			.field("email", &self.email)
			.field("enterprise_email", &self.enterprise_email)
			.field("mobile", &self.mobile)
			.field("avatar_url", &self.avatar_url)
			.field("access_token", &redact(&self.access_token))
			.field("refresh_token", &redact(&self.refresh_token))
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.field("refresh_expires_in", &self.refresh_expires_in)
			.finish_non_exhaustive()
	}
}
