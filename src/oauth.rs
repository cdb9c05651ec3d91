//! Transport error mapping on top of the `oauth2` HTTP client contracts.

pub use oauth2;

// crates.io
use oauth2::HttpClientError;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	obs::Phase,
};

/// Maps HTTP transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a client error.
	fn map_transport_error(&self, phase: Phase, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, phase: Phase, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(phase, *inner),
			other => map_generic_transport_error(phase, other),
		}
	}
}

/// Maps the transport-agnostic [`HttpClientError`] variants.
///
/// Custom mappers can delegate here after handling their own `Reqwest(_)` payloads.
pub fn map_generic_transport_error<E>(phase: Phase, err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(phase, *inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::network(phase, inner).into(),
		HttpClientError::Other(message) => TransportError::Other { phase, message }.into(),
		_ => TransportError::Other { phase, message: "unrecognized transport failure".into() }
			.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(phase: Phase, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::TimedOut { phase }.into();
	}

	TransportError::network(phase, err).into()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug)]
	struct Refused;
	impl Display for Refused {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.write_str("connection refused")
		}
	}
	impl StdError for Refused {}

	#[test]
	fn generic_mapping_keeps_phase_and_source() {
		let err = map_generic_transport_error(
			Phase::AppAccessToken,
			HttpClientError::Reqwest(Box::new(Refused)),
		);

		match err {
			Error::Transport(TransportError::Network { phase, source }) => {
				assert_eq!(phase, Phase::AppAccessToken);
				assert_eq!(source.to_string(), "connection refused");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn other_variant_becomes_transport_other() {
		let err = map_generic_transport_error::<Refused>(
			Phase::UserInfo,
			HttpClientError::Other("socket closed".into()),
		);

		assert!(matches!(
			err,
			Error::Transport(TransportError::Other { phase: Phase::UserInfo, ref message })
				if message == "socket closed"
		));
	}
}
