//! Client-level error types shared across the exchange phases, decoder, and transports.

// self
use crate::{_prelude::*, obs::Phase};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every variant that originates from a provider round trip names the [`Phase`] it failed in,
/// so callers can tell a rejected application credential apart from a rejected user code.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, cancellation, deadline).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Response body exceeded the read cap before it could be decoded.
	#[error("The {phase} response body exceeded the {limit} byte limit.")]
	BodyTooLarge {
		/// Phase whose response was rejected.
		phase: Phase,
		/// Configured cap in bytes.
		limit: usize,
	},
	/// HTTP status code outside the 2xx range.
	#[error("The {phase} endpoint returned HTTP status {status}.")]
	HttpStatus {
		/// Phase whose response was rejected.
		phase: Phase,
		/// HTTP status code returned by the provider.
		status: u16,
	},
	/// Response body is not a well-formed envelope.
	#[error("The {phase} endpoint returned a malformed envelope.")]
	Decode {
		/// Phase whose response was rejected.
		phase: Phase,
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Envelope carried a non-zero provider status code.
	#[error("The {phase} endpoint reported provider code {code}: {message}.")]
	ProviderStatus {
		/// Phase whose response was rejected.
		phase: Phase,
		/// Provider status code (zero means success).
		code: i64,
		/// Provider-supplied message.
		message: String,
	},
	/// Envelope reported success but carried no usable access token.
	#[error("The {phase} response is missing the access token.")]
	MissingAccessToken {
		/// Phase whose response was rejected.
		phase: Phase,
	},
	/// Provider lifetime cannot be turned into an expiry instant.
	#[error("The {phase} response carries an unusable lifetime: {expires_in}s.")]
	InvalidExpiry {
		/// Phase whose response was rejected.
		phase: Phase,
		/// Raw relative lifetime in seconds.
		expires_in: i64,
	},
	/// Callback `state` does not match the value issued with the authorization URL.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}
impl Error {
	/// Returns the phase that produced the error, when the error came from a provider call.
	pub fn phase(&self) -> Option<Phase> {
		match self {
			Self::Transport(e) => e.phase(),
			Self::BodyTooLarge { phase, .. }
			| Self::HttpStatus { phase, .. }
			| Self::Decode { phase, .. }
			| Self::ProviderStatus { phase, .. }
			| Self::MissingAccessToken { phase }
			| Self::InvalidExpiry { phase, .. } => Some(*phase),
			Self::Config(_) | Self::StateMismatch => None,
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// JSON request body could not be encoded.
	#[error("Request body could not be encoded.")]
	RequestEncode {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, cancellation, deadline).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {phase} endpoint.")]
	Network {
		/// Phase whose request failed.
		phase: Phase,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The caller's [`CallContext`](crate::context::CallContext) was cancelled.
	#[error("The {phase} request was cancelled.")]
	Cancelled {
		/// Phase whose request was aborted.
		phase: Phase,
	},
	/// The caller's deadline elapsed before the provider answered.
	#[error("The {phase} request timed out.")]
	TimedOut {
		/// Phase whose request was aborted.
		phase: Phase,
	},
	/// Transport reported a failure without a structured source.
	#[error("HTTP client error occurred while calling the {phase} endpoint: {message}.")]
	Other {
		/// Phase whose request failed.
		phase: Phase,
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(phase: Phase, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { phase, source: Box::new(src) }
	}

	/// Phase whose request failed.
	pub fn phase(&self) -> Option<Phase> {
		match self {
			Self::Network { phase, .. }
			| Self::Cancelled { phase }
			| Self::TimedOut { phase }
			| Self::Other { phase, .. } => Some(*phase),
		}
	}
}
