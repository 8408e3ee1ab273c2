//! Fixed-timestep simulation clock.
//!
//! Every tick advances simulated time by the same `step_seconds`, however
//! long the tick took in real time. The tick counter is the source of
//! truth; elapsed simulated time is derived from it.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// The step length is zero, negative, or not finite.
    #[error("invalid step length: {step_seconds}s (must be finite and > 0)")]
    InvalidStep {
        /// The rejected step length.
        step_seconds: f32,
    },
}

/// Simulation clock with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    /// Ticks completed so far (0 before the first tick).
    tick: u64,
    /// Simulated seconds per tick.
    step_seconds: f32,
}

impl SimClock {
    /// Create a clock at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidStep`] unless `step_seconds` is finite
    /// and positive.
    pub fn new(step_seconds: f32) -> Result<Self, ClockError> {
        Self::from_parts(0, step_seconds)
    }

    /// Create a clock at an arbitrary tick (useful for restoring sessions).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidStep`] unless `step_seconds` is finite
    /// and positive.
    pub fn from_parts(tick: u64, step_seconds: f32) -> Result<Self, ClockError> {
        if !step_seconds.is_finite() || step_seconds <= 0.0 {
            return Err(ClockError::InvalidStep { step_seconds });
        }
        Ok(Self { tick, step_seconds })
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }

    /// Current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds per tick.
    pub const fn step_seconds(&self) -> f32 {
        self.step_seconds
    }

    /// Simulated seconds since tick 0.
    #[allow(clippy::cast_precision_loss)]
    pub fn elapsed_seconds(&self) -> f64 {
        // Precision loss only past 2^53 ticks.
        self.tick as f64 * f64::from(self.step_seconds)
    }
}
