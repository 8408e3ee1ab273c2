//! Error types for the nursery-agents crate.
//!
//! The behavior core is a closed numeric simulation, so almost nothing in
//! it can fail at runtime. What can fail is wiring: a configuration with
//! nonsensical rates, a snapshot naming a regime that does not exist, or
//! a caller addressing an agent that was never spawned. Those fail loudly
//! with an [`AgentError`] rather than being papered over.

use nursery_types::AgentId;

/// Errors that can occur while configuring, spawning, or restoring agents.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A configuration value is out of range or not finite.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A snapshot or caller referenced a regime name that does not exist.
    #[error("unknown regime: {0}")]
    UnknownRegime(String),

    /// A snapshot or caller referenced an action label that does not exist.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// A snapshot carried values that cannot describe a live agent.
    #[error("invalid snapshot for agent {agent_id}: {reason}")]
    InvalidSnapshot {
        /// The agent the snapshot claims to describe.
        agent_id: AgentId,
        /// What is wrong with it.
        reason: String,
    },

    /// Agent with the given ID was not found.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// Two agents were registered under the same ID.
    #[error("duplicate agent id: {0}")]
    DuplicateAgent(AgentId),
}
