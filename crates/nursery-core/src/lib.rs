//! Clock, configuration, tick cycle, and session runner for the Nursery
//! simulation.
//!
//! This crate drives the behavior core in `nursery-agents` on a fixed
//! timestep. Every tick advances the clock, lets the outside world update
//! each child's situation, updates every agent, resolves interactions, and
//! reports a [`TickSummary`].
//!
//! # Modules
//!
//! - [`clock`] -- Fixed-step simulation clock.
//! - [`config`] -- Configuration loading from `nursery-config.yaml` into
//!   strongly-typed structs.
//! - [`control`] -- Pacing, tick limit, and stop for a running session.
//! - [`runner`] -- The async session loop and tick callbacks.
//! - [`source`] -- [`SituationSource`] trait and [`StaticSituation`].
//! - [`tick`] -- The per-tick phase cycle.
//!
//! [`SituationSource`]: source::SituationSource
//! [`StaticSituation`]: source::StaticSituation
//! [`TickSummary`]: tick::TickSummary

pub mod clock;
pub mod config;
pub mod control;
pub mod runner;
pub mod source;
pub mod tick;

pub use clock::{ClockError, SimClock};
pub use config::{ConfigError, LoggingConfig, SimulationConfig, WorldConfig};
pub use control::{RunControl, SimulationEndReason};
pub use runner::{
    NoOpCallback, RunnerError, SimulationResult, TickCallback, log_simulation_end, run_simulation,
};
pub use source::{SituationSource, SourceError, StaticSituation};
pub use tick::{SimulationState, TickError, TickSummary, run_tick};
