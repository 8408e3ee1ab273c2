//! Session loop runner with host controls.
//!
//! [`run_simulation`] drives the tick loop with support for:
//!
//! - **Bounded sessions**: stop after `max_ticks`
//! - **Real-time pacing**: ticks start at most once per interval
//! - **Clean stop**: the loop finishes the current tick and returns
//!
//! The runner wraps the single-tick [`run_tick`] function and adds the
//! control plane around it. Pacing never changes simulated time: every
//! tick advances the clock by the same fixed step, and a tick that takes
//! longer than its interval is only logged.
//!
//! [`run_tick`]: crate::tick::run_tick

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::control::{RunControl, SimulationEndReason};
use crate::source::SituationSource;
use crate::tick::{self, SimulationState, TickError, TickSummary};

/// Errors that can occur during the session run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Result of the session run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the session ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// Implementations forward the summary to whatever consumes it
/// (animation, speech, audio, scoring, a log).
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Run the session loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails. The state keeps every tick
/// that completed before the failure.
pub async fn run_simulation(
    state: &mut SimulationState,
    source: &mut dyn SituationSource,
    control: &Arc<RunControl>,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = control.max_ticks(),
        tick_interval_ms = control.tick_interval_ms(),
        step_seconds = state.clock.step_seconds(),
        children = state.population.len(),
        "Session starting"
    );

    loop {
        // --- Check stop request (before tick) ---
        if control.is_stop_requested() {
            info!("Stop requested");
            let reason = SimulationEndReason::OperatorStop;
            control.set_end_reason(reason).await;
            return Ok(SimulationResult {
                end_reason: reason,
                final_summary: last_summary,
                total_ticks,
            });
        }

        // --- Execute tick ---
        let started = Instant::now();
        let summary = tick::run_tick(state, source)?;
        total_ticks = total_ticks.saturating_add(1);

        // --- Notify callback ---
        callback.on_tick(&summary, state);

        // --- Check tick limit (after tick) ---
        if control.tick_limit_reached(summary.tick) {
            info!(
                tick = summary.tick,
                max_ticks = control.max_ticks(),
                "Tick limit reached"
            );
            let reason = SimulationEndReason::MaxTicksReached;
            control.set_end_reason(reason).await;
            return Ok(SimulationResult {
                end_reason: reason,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        // --- Sleep for the rest of the tick interval ---
        let interval = Duration::from_millis(control.tick_interval_ms());
        let spent = started.elapsed();
        if interval.is_zero() {
            tokio::task::yield_now().await;
        } else if let Some(remaining) = interval.checked_sub(spent) {
            tokio::time::sleep(remaining).await;
        } else {
            warn!(
                tick = summary.tick,
                spent_ms = u64::try_from(spent.as_millis()).unwrap_or(u64::MAX),
                interval_ms = control.tick_interval_ms(),
                "Tick overran its interval"
            );
        }

        last_summary = Some(summary);
    }
}

/// Log the end of a session.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Session ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            regimes = ?summary.regime_counts,
            mean_wellbeing = summary.mean_wellbeing,
            "Final tick summary"
        );
    } else {
        warn!("Session ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nursery_agents::{BehaviorConfig, Population};

    use super::*;
    use crate::clock::SimClock;
    use crate::source::StaticSituation;

    fn make_state() -> SimulationState {
        let config = Arc::new(BehaviorConfig::default());
        SimulationState::new(
            SimClock::new(0.5).unwrap(),
            Population::spawn(42, 3, 2, &config),
            config,
        )
    }

    #[tokio::test]
    async fn bounded_by_max_ticks() {
        let mut state = make_state();
        let control = Arc::new(RunControl::new(0, 5));
        let result = run_simulation(
            &mut state,
            &mut StaticSituation::new(),
            &control,
            &mut NoOpCallback,
        )
        .await
        .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(state.clock.tick(), 5);
        assert_eq!(
            control.end_reason().await,
            Some(SimulationEndReason::MaxTicksReached)
        );
    }

    #[tokio::test]
    async fn operator_stop() {
        let mut state = make_state();
        let control = Arc::new(RunControl::new(0, 0));
        control.request_stop();

        let result = run_simulation(
            &mut state,
            &mut StaticSituation::new(),
            &control,
            &mut NoOpCallback,
        )
        .await
        .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test]
    async fn tick_callback_is_called() {
        struct CountCallback {
            count: u64,
        }
        impl TickCallback for CountCallback {
            fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {
                self.count = self.count.saturating_add(1);
            }
        }

        let mut state = make_state();
        let control = Arc::new(RunControl::new(0, 3));
        let mut cb = CountCallback { count: 0 };

        let _ = run_simulation(&mut state, &mut StaticSituation::new(), &control, &mut cb)
            .await
            .unwrap();

        assert_eq!(cb.count, 3);
    }

    #[tokio::test]
    async fn callback_can_stop_the_loop() {
        struct StopAfter {
            control: Arc<RunControl>,
            after: u64,
        }
        impl TickCallback for StopAfter {
            fn on_tick(&mut self, summary: &TickSummary, _state: &SimulationState) {
                if summary.tick >= self.after {
                    self.control.request_stop();
                }
            }
        }

        let mut state = make_state();
        let control = Arc::new(RunControl::new(0, 0));
        let mut cb = StopAfter {
            control: Arc::clone(&control),
            after: 4,
        };
        let result = run_simulation(&mut state, &mut StaticSituation::new(), &control, &mut cb)
            .await
            .unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 4);
        assert_eq!(result.final_summary.map(|s| s.tick), Some(4));
    }
}
