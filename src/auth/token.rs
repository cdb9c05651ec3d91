//! Standard bearer token produced by the code exchange, with its builder.

// crates.io
use oauth2::{AccessToken, RefreshToken};
// self
use crate::_prelude::*;

const BEARER: &str = "Bearer";

/// Errors produced by [`StandardTokenBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum StandardTokenBuilderError {
	/// No access token, or an empty one, was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// No expiry (absolute or relative) was configured.
	#[error("Expiry must be supplied via expires_at or expires_in.")]
	MissingExpiry,
	/// The relative expiry overflows the supported date range.
	#[error("Expiry falls outside the supported date range.")]
	ExpiryOutOfRange,
}

/// Access/refresh token pair returned to the caller after a successful exchange.
///
/// Only [`StandardToken::builder`] creates values, and it refuses empty access tokens.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StandardToken {
	/// User access token; redacted in `Debug` output.
	pub access_token: AccessToken,
	/// Refresh token, if the provider issued one.
	pub refresh_token: Option<RefreshToken>,
	/// Token type as reported by the provider (may be empty).
	pub token_type: String,
	/// Instant the token was assembled.
	pub issued_at: OffsetDateTime,
	/// Expiry instant derived from issued_at plus the provider's relative lifetime.
	pub expires_at: OffsetDateTime,
	/// Expiry of the refresh token, when the provider reports one.
	pub refresh_expires_at: Option<OffsetDateTime>,
}
impl StandardToken {
	/// Returns a builder.
	pub fn builder() -> StandardTokenBuilder {
		StandardTokenBuilder::default()
	}

	/// Token type used in the `Authorization` header.
	///
	/// Empty and case-variant `bearer` values normalize to `Bearer`.
	pub fn auth_scheme(&self) -> &str {
		if self.token_type.is_empty() || self.token_type.eq_ignore_ascii_case(BEARER) {
			BEARER
		} else {
			&self.token_type
		}
	}

	/// Full `Authorization` header value.
	pub fn authorization_header(&self) -> String {
		format!("{} {}", self.auth_scheme(), self.access_token.secret())
	}

	/// Returns `true` if the token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}

	/// Returns `true` if the token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}
}

/// Builder for [`StandardToken`].
#[derive(Clone, Debug, Default)]
pub struct StandardTokenBuilder {
	access_token: Option<String>,
	refresh_token: Option<String>,
	token_type: String,
	issued_at: Option<OffsetDateTime>,
	expires_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
	refresh_expires_in: Option<Duration>,
}
impl StandardTokenBuilder {
	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(token.into());

		self
	}

	/// Provides the refresh token value; empty strings are ignored.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		let token = token.into();

		self.refresh_token = (!token.is_empty()).then_some(token);

		self
	}

	/// Sets the provider token type.
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = token_type.into();

		self
	}

	/// Sets the issued-at instant (defaults to now).
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets an absolute expiry instant.
	pub fn expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Sets a relative expiry duration from the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Sets the refresh token lifetime relative to the issued instant.
	pub fn refresh_expires_in(mut self, duration: Duration) -> Self {
		self.refresh_expires_in = Some(duration);

		self
	}

	/// Consumes the builder and produces a [`StandardToken`].
	pub fn build(self) -> Result<StandardToken, StandardTokenBuilderError> {
		let access_token = self
			.access_token
			.filter(|token| !token.is_empty())
			.ok_or(StandardTokenBuilderError::MissingAccessToken)?;
		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);
		let expires_at = match (self.expires_at, self.expires_in) {
			(Some(instant), _) => instant,
			(None, Some(delta)) =>
				issued_at.checked_add(delta).ok_or(StandardTokenBuilderError::ExpiryOutOfRange)?,
			(None, None) => return Err(StandardTokenBuilderError::MissingExpiry),
		};
		let refresh_expires_at = match self.refresh_expires_in {
			Some(delta) => Some(
				issued_at.checked_add(delta).ok_or(StandardTokenBuilderError::ExpiryOutOfRange)?,
			),
			None => None,
		};

		Ok(StandardToken {
			access_token: AccessToken::new(access_token),
			refresh_token: self.refresh_token.map(RefreshToken::new),
			token_type: self.token_type,
			issued_at,
			expires_at,
			refresh_expires_at,
		})
	}
}
