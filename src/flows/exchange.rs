//! Two-phase authorization code exchange.
//!
//! Phase 1 trades the application credentials for a short-lived application access token;
//! phase 2 presents that token as a bearer credential while exchanging the user's
//! authorization code. Phase 2 never runs when phase 1 fails.

// crates.io
use oauth2::AccessToken;
// self
use crate::{
	_prelude::*,
	auth::{StandardToken, StandardTokenBuilderError},
	context::CallContext,
	envelope::{self, AppAccessTokenResponse, UserProfile, UserTokenResponse},
	flows::{LarkClient, common},
	http::LarkHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, Phase},
};

const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";

#[derive(Serialize)]
struct AppAccessTokenRequest<'a> {
	app_id: &'a str,
	app_secret: &'a str,
}

#[derive(Serialize)]
struct UserAccessTokenRequest<'a> {
	grant_type: &'static str,
	code: &'a str,
}

/// Application access token obtained in phase 1.
///
/// The value is consumed by [`LarkClient::exchange_user_code`] so it never outlives the
/// exchange it was fetched for.
#[derive(Debug)]
pub struct AppAccessToken {
	token: AccessToken,
	lifetime: Duration,
}
impl AppAccessToken {
	/// Raw token value.
	pub fn secret(&self) -> &str {
		self.token.secret()
	}

	/// Lifetime reported by the provider (informational).
	pub fn lifetime(&self) -> Duration {
		self.lifetime
	}

	fn authorization_header(&self) -> String {
		format!("Bearer {}", self.token.secret())
	}
}

impl<C, M> LarkClient<C, M>
where
	C: ?Sized + LarkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges an authorization code for a user token, running both phases in order.
	pub async fn exchange_code(&self, ctx: &CallContext, code: &str) -> Result<StandardToken> {
		let app_token = self.fetch_app_access_token(ctx).await?;

		self.exchange_user_code(ctx, code, app_token).await
	}

	/// Phase 1: obtains an application access token with the configured credentials.
	///
	/// The token is otherwise opaque, but an empty one fails with
	/// [`Error::MissingAccessToken`] so phase 2 never sends an empty bearer credential.
	pub async fn fetch_app_access_token(&self, ctx: &CallContext) -> Result<AppAccessToken> {
		const PHASE: Phase = Phase::AppAccessToken;

		obs::observe(PHASE, "fetch_app_access_token", async move {
			let payload = AppAccessTokenRequest {
				app_id: self.config.client_id.as_str(),
				app_secret: self.config.client_secret.secret(),
			};
			let request =
				common::post_json(&self.descriptor.endpoints.app_access_token, &payload, None)?;
			let body = self.round_trip(ctx, PHASE, request).await?;
			let envelope = envelope::decode::<AppAccessTokenResponse>(PHASE, &body)?;

			envelope.ensure_success(PHASE)?;
			common::ensure_access_token(PHASE, &envelope.app_access_token)?;

			Ok(AppAccessToken {
				token: AccessToken::new(envelope.app_access_token),
				lifetime: Duration::seconds(envelope.expire),
			})
		})
		.await
	}

	/// Phase 2: exchanges `code` for a user token, authenticated by `app_token`.
	pub async fn exchange_user_code(
		&self,
		ctx: &CallContext,
		code: &str,
		app_token: AppAccessToken,
	) -> Result<StandardToken> {
		const PHASE: Phase = Phase::UserAccessToken;

		obs::observe(PHASE, "exchange_user_code", async move {
			let payload = UserAccessTokenRequest { grant_type: GRANT_TYPE_AUTHORIZATION_CODE, code };
			let request = common::post_json(
				&self.descriptor.endpoints.token,
				&payload,
				Some(app_token.authorization_header().as_str()),
			)?;

			drop(app_token);

			let body = self.round_trip(ctx, PHASE, request).await?;
			let envelope = envelope::decode::<UserTokenResponse>(PHASE, &body)?;

			envelope.ensure_success(PHASE)?;
			common::ensure_access_token(PHASE, &envelope.data.access_token)?;

			build_standard_token(PHASE, envelope.data, OffsetDateTime::now_utc())
		})
		.await
	}
}

fn build_standard_token(
	phase: Phase,
	profile: UserProfile,
	issued_at: OffsetDateTime,
) -> Result<StandardToken> {
	let mut builder = StandardToken::builder()
		.access_token(profile.access_token)
		.refresh_token(profile.refresh_token)
		.token_type(profile.token_type)
		.issued_at(issued_at)
		.expires_in(Duration::seconds(profile.expires_in));

	if profile.refresh_expires_in > 0 {
		builder = builder.refresh_expires_in(Duration::seconds(profile.refresh_expires_in));
	}

	builder.build().map_err(|e| match e {
		StandardTokenBuilderError::MissingAccessToken => Error::MissingAccessToken { phase },
		StandardTokenBuilderError::MissingExpiry | StandardTokenBuilderError::ExpiryOutOfRange =>
			Error::InvalidExpiry { phase, expires_in: profile.expires_in },
	})
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn profile(expires_in: i64, refresh_expires_in: i64) -> UserProfile {
		UserProfile {
			access_token: "u-1".into(),
			refresh_token: "ur-1".into(),
			token_type: "Bearer".into(),
			expires_in,
			refresh_expires_in,
			..Default::default()
		}
	}

	#[test]
	fn token_expiry_is_relative_to_issue_time() {
		let issued_at = macros::datetime!(2025-01-01 00:00 UTC);
		let token = build_standard_token(Phase::UserAccessToken, profile(7200, 2_592_000), issued_at)
			.expect("Valid profile should produce a token.");

		assert_eq!(token.access_token.secret(), "u-1");
		assert_eq!(token.refresh_token.as_ref().map(|t| t.secret().as_str()), Some("ur-1"));
		assert_eq!(token.expires_at, macros::datetime!(2025-01-01 02:00 UTC));
		assert_eq!(token.refresh_expires_at, Some(macros::datetime!(2025-01-31 00:00 UTC)));
	}

	#[test]
	fn missing_refresh_lifetime_leaves_refresh_expiry_unset() {
		let token = build_standard_token(
			Phase::UserAccessToken,
			profile(60, 0),
			macros::datetime!(2025-01-01 00:00 UTC),
		)
		.expect("Valid profile should produce a token.");

		assert!(token.refresh_expires_at.is_none());
	}

	#[test]
	fn unrepresentable_lifetime_is_invalid_expiry() {
		let err = build_standard_token(
			Phase::UserAccessToken,
			profile(i64::MAX, 0),
			macros::datetime!(2025-01-01 00:00 UTC),
		)
		.expect_err("Overflowing lifetime must be rejected.");

		assert!(matches!(
			err,
			Error::InvalidExpiry { phase: Phase::UserAccessToken, expires_in: i64::MAX }
		));
	}

	#[test]
	fn app_token_debug_is_redacted() {
		let token =
			AppAccessToken { token: AccessToken::new("a-secret".into()), lifetime: Duration::HOUR };

		assert_eq!(token.authorization_header(), "Bearer a-secret");
		assert!(!format!("{token:?}").contains("a-secret"));
	}
}
