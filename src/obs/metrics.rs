// std
use std::time::{Duration as StdDuration, Instant};
// self
use crate::obs::{Phase, PhaseOutcome};

/// Counter incremented for every attempt and outcome.
pub const PHASE_TOTAL: &str = "oauth2_lark_phase_total";
/// Histogram of provider call latency in seconds, labeled by outcome.
pub const PHASE_DURATION_SECONDS: &str = "oauth2_lark_phase_duration_seconds";

/// Records a phase outcome via the global metrics recorder (when enabled).
pub fn record_phase_outcome(phase: Phase, outcome: PhaseOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(PHASE_TOTAL, "phase" => phase.as_str(), "outcome" => outcome.as_str())
		.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (phase, outcome);
}

/// Measures one provider call from its attempt to its outcome.
///
/// Starting the timer records the attempt; [`PhaseTimer::finish`] records the outcome and the
/// elapsed time. A timer dropped without finishing (e.g. a cancelled future) records nothing
/// further.
#[derive(Debug)]
pub struct PhaseTimer {
	phase: Phase,
	started: Instant,
}
impl PhaseTimer {
	/// Records an attempt for `phase` and starts the clock.
	pub fn start(phase: Phase) -> Self {
		record_phase_outcome(phase, PhaseOutcome::Attempt);

		Self { phase, started: Instant::now() }
	}

	/// Records `outcome` along with the call duration, returning the duration.
	pub fn finish(self, outcome: PhaseOutcome) -> StdDuration {
		let elapsed = self.started.elapsed();

		record_phase_outcome(self.phase, outcome);

		#[cfg(feature = "metrics")]
		metrics::histogram!(
			PHASE_DURATION_SECONDS,
			"phase" => self.phase.as_str(),
			"outcome" => outcome.as_str()
		)
		.record(elapsed.as_secs_f64());

		elapsed
	}
}
