//! Flow orchestrators for the Lark/Feishu two-phase authorization.
//!
//! [`LarkClient`] owns the provider descriptor, client configuration, and the injected
//! transport + error mapper. The individual modules implement the browser redirect URL,
//! the two-phase code exchange, and the user info fetch on top of it.

pub mod authorize;
pub mod exchange;
pub mod user_info;

mod common;

pub use authorize::*;
pub use exchange::*;

// self
use crate::{
	_prelude::*, config::ClientConfig, http::LarkHttpClient, oauth::TransportErrorMapper,
	provider::ProviderDescriptor,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestLarkClient = LarkClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Runs the Lark/Feishu authorization flow against a single provider descriptor.
///
/// The client holds no per-exchange state: every call builds fresh requests, so a single
/// instance can be cloned and shared across concurrent users. The transport is injected at
/// construction time instead of being looked up per call.
pub struct LarkClient<C, M>
where
	C: ?Sized + LarkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Provider descriptor that defines endpoints and the body cap.
	pub descriptor: ProviderDescriptor,
	/// Application credentials, redirect URI, and scopes.
	pub config: ClientConfig,
}
impl<C, M> LarkClient<C, M>
where
	C: ?Sized + LarkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			config,
		}
	}
}
#[cfg(feature = "reqwest")]
impl LarkClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a new client backed by a default reqwest transport.
	pub fn new(descriptor: ProviderDescriptor, config: ClientConfig) -> Self {
		Self::with_http_client(
			descriptor,
			config,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Clone for LarkClient<C, M>
where
	C: ?Sized + LarkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			descriptor: self.descriptor.clone(),
			config: self.config.clone(),
		}
	}
}
impl<C, M> Debug for LarkClient<C, M>
where
	C: ?Sized + LarkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LarkClient")
			.field("descriptor", &self.descriptor)
			.field("client_id", &self.config.client_id)
			.finish_non_exhaustive()
	}
}
