//! Optional observability helpers for the exchange phases.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_lark.phase` with the `phase` (provider
//!   call) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `oauth2_lark_phase_total` counter for every
//!   attempt/success/failure, labeled by `phase` + `outcome`, and to record call latency in the
//!   `oauth2_lark_phase_duration_seconds` histogram.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Provider round trips performed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
	/// Application credentials exchanged for an application access token.
	AppAccessToken,
	/// Authorization code exchanged for a user access token.
	UserAccessToken,
	/// Authenticated fetch of the user profile.
	UserInfo,
}
impl Phase {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Phase::AppAccessToken => "app_access_token",
			Phase::UserAccessToken => "user_access_token",
			Phase::UserInfo => "user_info",
		}
	}
}
impl Display for Phase {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseOutcome {
	/// Entry to a provider call.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl PhaseOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			PhaseOutcome::Attempt => "attempt",
			PhaseOutcome::Success => "success",
			PhaseOutcome::Failure => "failure",
		}
	}
}
impl Display for PhaseOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside a phase span and times it with a [`PhaseTimer`].
pub(crate) async fn observe<T, Fut>(phase: Phase, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = PhaseSpan::new(phase, stage);
	let timer = PhaseTimer::start(phase);
	let result = span.instrument(fut).await;
	let outcome = if result.is_ok() { PhaseOutcome::Success } else { PhaseOutcome::Failure };
	let _elapsed = timer.finish(outcome);

	#[cfg(feature = "tracing")]
	if let Err(e) = &result {
		::tracing::warn!(
			parent: span.span(),
			error = %e,
			elapsed_ms = _elapsed.as_millis() as u64,
			"provider call failed"
		);
	}

	result
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn phase_labels_are_stable() {
		assert_eq!(Phase::AppAccessToken.to_string(), "app_access_token");
		assert_eq!(Phase::UserAccessToken.as_str(), "user_access_token");
		assert_eq!(
			serde_json::to_string(&Phase::UserInfo).expect("Phase should serialize to JSON."),
			"\"user_info\""
		);
	}

	#[tokio::test]
	async fn observe_passes_results_through() {
		let ok = observe(Phase::UserInfo, "test", async { Ok(7) }).await;

		assert_eq!(ok.expect("Successful future should pass through."), 7);

		let err = observe::<(), _>(Phase::UserInfo, "test", async { Err(Error::StateMismatch) })
			.await
			.expect_err("Failing future should pass through.");

		assert!(matches!(err, Error::StateMismatch));
	}
}
