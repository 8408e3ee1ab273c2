//! Runtime control of a running session.
//!
//! [`RunControl`] is shared between the tick loop and whoever drives it
//! (a signal handler, a tick callback, a test). The host can request a
//! clean stop without tearing the loop down; the loop reads the request
//! lock-free before every tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Reason why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// The host asked the loop to stop.
    OperatorStop,
}

/// Shared control state for the tick loop.
#[derive(Debug)]
pub struct RunControl {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Real-time milliseconds between ticks (0 = flat out).
    tick_interval_ms: u64,

    /// Maximum number of ticks (0 = unlimited).
    max_ticks: u64,

    /// When the control was created.
    started_at: Instant,

    /// Reason the session ended, if it has.
    end_reason: Mutex<Option<SimulationEndReason>>,
}

impl RunControl {
    /// Create control state for a new session.
    pub fn new(tick_interval_ms: u64, max_ticks: u64) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            tick_interval_ms,
            max_ticks,
            started_at: Instant::now(),
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop before the next tick.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Record the reason the session ended.
    pub async fn set_end_reason(&self, reason: SimulationEndReason) {
        let mut guard = self.end_reason.lock().await;
        *guard = Some(reason);
    }

    /// Get the reason the session ended, if it has.
    pub async fn end_reason(&self) -> Option<SimulationEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Pacing
    // -----------------------------------------------------------------------

    /// Real-time milliseconds between tick starts.
    ///
    /// Pacing only affects wall-clock speed. Simulated time per tick is
    /// fixed by the clock.
    pub const fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Returns `true` if `max_ticks > 0` and `current_tick >= max_ticks`.
    pub const fn tick_limit_reached(&self, current_tick: u64) -> bool {
        self.max_ticks > 0 && current_tick >= self.max_ticks
    }

    /// Configured tick limit.
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Wall-clock seconds since the control was created.
    pub fn elapsed_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_limit_zero_means_unlimited() {
        let control = RunControl::new(0, 0);
        assert!(!control.tick_limit_reached(u64::MAX));
        let bounded = RunControl::new(0, 10);
        assert!(!bounded.tick_limit_reached(9));
        assert!(bounded.tick_limit_reached(10));
    }

    #[test]
    fn stop_request_is_sticky() {
        let control = RunControl::new(100, 0);
        assert!(!control.is_stop_requested());
        control.request_stop();
        control.request_stop();
        assert!(control.is_stop_requested());
        assert_eq!(control.tick_interval_ms(), 100);
    }

    #[tokio::test]
    async fn end_reason_is_recorded() {
        let control = RunControl::new(0, 0);
        assert_eq!(control.end_reason().await, None);
        control.set_end_reason(SimulationEndReason::OperatorStop).await;
        assert_eq!(
            control.end_reason().await,
            Some(SimulationEndReason::OperatorStop)
        );
    }
}
