//! Emotional state, regimes, action selection, and interactions for the
//! Nursery simulation.
//!
//! This crate is the behavior core. It operates on agent state without
//! touching I/O and sits between `nursery-types` (plain data) and
//! `nursery-core` (the tick driver).
//!
//! # Modules
//!
//! - [`agent`] -- One simulated child ([`Agent`]), care operations, speech
//! - [`config`] -- Tunable rates and thresholds ([`BehaviorConfig`])
//! - [`emotion`] -- The six-scalar emotional model ([`EmotionalState`])
//! - [`error`] -- Error types for agent operations ([`AgentError`])
//! - [`interaction`] -- Pairwise rules between co-located children
//! - [`machine`] -- Generic guarded, prioritized state-machine engine
//! - [`population`] -- The ordered set of agents in a session
//! - [`profile`] -- Seeded personality and starting mood
//! - [`regime`] -- The five regimes and the nested tantrum machine
//! - [`selector`] -- Utility-based action selection per regime
//! - [`situation`] -- Externally-owned facts about each child
//! - [`snapshot`] -- Serializable agent snapshots and restore

pub mod agent;
pub mod config;
pub mod emotion;
pub mod error;
pub mod interaction;
pub mod machine;
pub mod population;
pub mod profile;
pub mod regime;
pub mod selector;
pub mod situation;
pub mod snapshot;

// Re-export primary types at crate root for convenience.
pub use agent::{Agent, Utterance};
pub use config::{
    BehaviorConfig, CareConfig, InteractionConfig, MoodConfig, RegimeConfig, SelectorConfig,
};
pub use emotion::{EmotionalState, MoodDelta};
pub use error::AgentError;
pub use interaction::{
    Encounter, EncounterKind, InteractionOutcome, Participant, resolve_interactions,
};
pub use machine::{MachineState, StateMachine, Transition, Transitioned};
pub use population::Population;
pub use profile::{Profile, generate_profile};
pub use regime::{AgentContext, TantrumState};
pub use selector::select_action;
pub use situation::{Position, Situation};
pub use snapshot::{AgentSnapshot, TantrumSnapshot};
