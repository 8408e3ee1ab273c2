//! Outbound signals emitted by the behavior core.
//!
//! Agents push [`EventKind`] values into a private queue as they change
//! regime or action. The driver drains every queue once per tick, stamps
//! each entry with the tick and agent, and hands the resulting
//! [`SimEvent`] list to animation, speech, audio, and scoring consumers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Action, Regime};
use crate::ids::AgentId;

/// What happened to a single child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventKind {
    /// The child moved to a different behavioral regime.
    RegimeChanged {
        /// Regime that was left.
        from: Regime,
        /// Regime that was entered.
        to: Regime,
    },
    /// The child started a different action.
    ActionChanged {
        /// Previous action.
        from: Action,
        /// New action.
        to: Action,
    },
    /// The child entered a tantrum.
    TantrumEntered {
        /// The tantrum action chosen on entry.
        action: Action,
    },
    /// Periodic pulse while a tantrum continues.
    TantrumTick {
        /// Seconds spent in the tantrum so far.
        elapsed_seconds: f32,
    },
    /// The child's crying is loud enough to upset others in the room.
    ContagiousCry,
}

/// An [`EventKind`] stamped with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimEvent {
    /// Tick during which the event was emitted.
    pub tick: u64,
    /// Child that emitted the event.
    pub agent_id: AgentId,
    /// What happened.
    pub kind: EventKind,
}
