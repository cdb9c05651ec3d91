//! Per-call execution context carrying cancellation and an optional deadline.
//!
//! Every provider round trip runs through [`CallContext::run`], so a caller can abort an
//! exchange that is stuck on a slow or unresponsive endpoint without dropping the whole
//! future tree. Dropping the future still works as usual; the context only adds a way to
//! cancel from elsewhere (a shutdown signal, a request guard, etc.).

// std
use std::time::Duration as StdDuration;
// crates.io
use tokio_util::sync::CancellationToken;
// self
use crate::{_prelude::*, error::TransportError, obs::Phase};

/// Cancellation + deadline scope for one or more provider calls.
///
/// Cloning a context shares its cancellation token, so cancelling any clone aborts every
/// call still running under it.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
	cancellation: CancellationToken,
	timeout: Option<StdDuration>,
}
impl CallContext {
	/// Creates a context with a fresh token and no deadline.
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds the context to an existing cancellation token.
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = token;

		self
	}

	/// Limits each provider round trip to `timeout`.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Token observed by every call under this context.
	pub fn cancellation(&self) -> &CancellationToken {
		&self.cancellation
	}

	/// Per-call deadline, if any.
	pub fn timeout(&self) -> Option<StdDuration> {
		self.timeout
	}

	/// Cancels every call running under this context.
	pub fn cancel(&self) {
		self.cancellation.cancel();
	}

	/// Returns `true` once the context has been cancelled.
	pub fn is_cancelled(&self) -> bool {
		self.cancellation.is_cancelled()
	}

	/// Drives `fut` to completion unless the context is cancelled or its deadline elapses.
	///
	/// Cancellation wins over a future that is ready at the same time, and an already
	/// cancelled context never polls `fut` at all.
	pub async fn run<Fut>(&self, phase: Phase, fut: Fut) -> Result<Fut::Output, TransportError>
	where
		Fut: Future,
	{
		if self.is_cancelled() {
			return Err(TransportError::Cancelled { phase });
		}

		let guarded = self.cancellation.run_until_cancelled(fut);
		let outcome = match self.timeout {
			Some(timeout) => tokio::time::timeout(timeout, guarded)
				.await
				.map_err(|_| TransportError::TimedOut { phase })?,
			None => guarded.await,
		};

		outcome.ok_or(TransportError::Cancelled { phase })
	}
}
