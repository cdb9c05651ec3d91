//! Shared request construction and response checks for the provider round trips.

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	context::CallContext,
	error::ConfigError,
	flows::LarkClient,
	http::{self, LarkHttpClient},
	oauth::TransportErrorMapper,
	obs::Phase,
};

const JSON: &str = "application/json";
const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Builds a JSON `POST`, optionally carrying an `Authorization` header.
pub(crate) fn post_json<B>(url: &Url, payload: &B, authorization: Option<&str>) -> Result<HttpRequest>
where
	B: Serialize,
{
	let body =
		serde_json::to_vec(payload).map_err(|source| ConfigError::RequestEncode { source })?;
	let mut builder = Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(CONTENT_TYPE, JSON_UTF8)
		.header(ACCEPT, JSON);

	if let Some(value) = authorization {
		builder = builder.header(AUTHORIZATION, value);
	}

	Ok(builder.body(body).map_err(ConfigError::from)?)
}

/// Builds an authenticated `GET`.
pub(crate) fn get(url: &Url, authorization: &str) -> Result<HttpRequest> {
	Ok(Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(ACCEPT, JSON)
		.header(AUTHORIZATION, authorization)
		.body(Vec::new())
		.map_err(ConfigError::from)?)
}

pub(crate) fn ensure_body_within_limit(phase: Phase, body: &[u8], limit: usize) -> Result<()> {
	if http::exceeds_limit(body, limit) {
		Err(Error::BodyTooLarge { phase, limit })
	} else {
		Ok(())
	}
}

pub(crate) fn ensure_http_success(phase: Phase, status: u16) -> Result<()> {
	if (200..=299).contains(&status) { Ok(()) } else { Err(Error::HttpStatus { phase, status }) }
}

/// Last line of defense: a zero status code with an empty token is still a failure.
pub(crate) fn ensure_access_token(phase: Phase, token: &str) -> Result<()> {
	if token.is_empty() { Err(Error::MissingAccessToken { phase }) } else { Ok(()) }
}

impl<C, M> LarkClient<C, M>
where
	C: ?Sized + LarkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Performs one bounded round trip and returns the body of a 2xx response.
	///
	/// The body cap is checked before the status so an oversized error page is reported as
	/// such instead of as an HTTP failure.
	pub(crate) async fn round_trip(
		&self,
		ctx: &CallContext,
		phase: Phase,
		request: HttpRequest,
	) -> Result<Vec<u8>> {
		let limit = self.descriptor.response_body_limit;
		let handle = self.http_client.with_body_limit(limit);
		let response = ctx
			.run(phase, handle.call(request))
			.await?
			.map_err(|e| self.transport_mapper.map_transport_error(phase, e))?;
		let status = response.status().as_u16();
		let body = response.into_body();

		ensure_body_within_limit(phase, &body, limit)?;
		ensure_http_success(phase, status)?;

		Ok(body)
	}
}
