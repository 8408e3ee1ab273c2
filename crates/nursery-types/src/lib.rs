//! Shared type definitions for the Nursery simulation.
//!
//! This crate is the single source of truth for the types that cross the
//! boundary between the behavior core and its collaborators (animation,
//! speech, audio, scoring, UI). Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for the status panel.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe index wrappers for agents and rooms
//! - [`enums`] -- Regimes, actions, needs, age tiers, tantrum phases, preferences
//! - [`personality`] -- Static per-child personality traits
//! - [`events`] -- Outbound signals drained by the driver each tick

pub mod enums;
pub mod events;
pub mod ids;
pub mod personality;

// Re-export all public types at crate root for convenience.
pub use enums::{Action, Activity, AgeTier, Food, Need, Regime, TantrumPhase};
pub use events::{EventKind, SimEvent};
pub use ids::{AgentId, RoomId};
pub use personality::{Personality, Preferences};
