//! Authenticated user profile retrieval.

// self
use crate::{
	_prelude::*,
	auth::{NormalizedIdentity, StandardToken},
	context::CallContext,
	envelope::{self, UserProfile, UserTokenResponse},
	flows::{LarkClient, common},
	http::LarkHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, Phase},
};

impl<C, M> LarkClient<C, M>
where
	C: ?Sized + LarkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the full provider profile for `token`.
	pub async fn user_profile(&self, ctx: &CallContext, token: &StandardToken) -> Result<UserProfile> {
		const PHASE: Phase = Phase::UserInfo;

		obs::observe(PHASE, "user_profile", async move {
			let request =
				common::get(&self.descriptor.endpoints.user_info, &token.authorization_header())?;
			let body = self.round_trip(ctx, PHASE, request).await?;
			let envelope = envelope::decode::<UserTokenResponse>(PHASE, &body)?;

			envelope.ensure_success(PHASE)?;

			Ok(envelope.data)
		})
		.await
	}

	/// Fetches the profile for `token` and projects it onto a [`NormalizedIdentity`].
	pub async fn user_info(
		&self,
		ctx: &CallContext,
		token: &StandardToken,
	) -> Result<NormalizedIdentity> {
		Ok(self.user_profile(ctx, token).await?.to_identity())
	}
}
