//! Transport primitives for provider round trips.
//!
//! The module exposes [`LarkHttpClient`], the client's only dependency on an HTTP stack.
//! Implementations hand out short-lived [`AsyncHttpClient`] handles bound to a response-body
//! cap. The cap contract is simple: a handle may stop reading once the body grows past the
//! cap, but it must return at least `limit + 1` bytes in that case so the caller can tell an
//! oversized body from one that fits exactly.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
// self
use crate::_prelude::*;

/// Hard cap applied to provider response bodies (1 MiB).
pub const DEFAULT_RESPONSE_BODY_LIMIT: usize = 1 << 20;

/// Abstraction over HTTP transports capable of executing provider calls.
///
/// Callers provide an implementation (typically behind `Arc<T>`) and the client requests
/// a handle per round trip. Implementations must be `Send + Sync + 'static` so they can be
/// shared across client instances, and the handles they return must own whatever state is
/// required so their request futures remain `Send` for the lifetime of the call.
pub trait LarkHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle bound to a body cap.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle that stops reading response bodies shortly after `limit` bytes.
	///
	/// # Body Cap Contract
	///
	/// - Bodies up to `limit` bytes must be returned in full.
	/// - For larger bodies the handle may truncate, but must keep at least `limit + 1` bytes.
	fn with_body_limit(&self, limit: usize) -> Self::Handle;
}

/// Returns `true` when `body` is longer than the cap.
pub(crate) fn exceeds_limit(body: &[u8], limit: usize) -> bool {
	body.len() > limit
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Provider endpoints answer directly, so configure any custom [`ReqwestClient`] to disable
/// redirect following.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl LarkHttpClient for ReqwestHttpClient {
	type Handle = BoundedHandle;
	type TransportError = ReqwestError;

	fn with_body_limit(&self, limit: usize) -> Self::Handle {
		BoundedHandle::new(self.0.clone(), limit)
	}
}

#[cfg(feature = "reqwest")]
struct BoundedHttpClient {
	client: ReqwestClient,
	limit: usize,
}

/// Handle returned by [`ReqwestHttpClient`] that streams bodies up to a cap.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct BoundedHandle(Arc<BoundedHttpClient>);
#[cfg(feature = "reqwest")]
impl BoundedHandle {
	fn new(client: ReqwestClient, limit: usize) -> Self {
		Self(Arc::new(BoundedHttpClient { client, limit }))
	}
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for BoundedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let inner = Arc::clone(&self.0);

		Box::pin(async move {
			let mut response = inner
				.client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let keep = inner.limit.saturating_add(1);
			let mut body = Vec::new();

			while let Some(chunk) = response.chunk().await.map_err(Box::new)? {
				let room = keep - body.len();

				if chunk.len() >= room {
					body.extend_from_slice(&chunk[..room]);

					break;
				}

				body.extend_from_slice(&chunk);
			}

			let mut response_new = HttpResponse::new(body);

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
