//! Serializable snapshots of agents.
//!
//! Regime and action are stored by their stable names so a snapshot stays
//! readable by tools that never link this crate. Restoring parses them
//! back and refuses anything it does not recognise; a restored agent then
//! continues exactly where the original left off.

use std::sync::Arc;

use nursery_types::{Action, AgentId, Personality, Regime, TantrumPhase};
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::config::BehaviorConfig;
use crate::emotion::EmotionalState;
use crate::error::AgentError;
use crate::machine::StateMachine;
use crate::regime::{AgentContext, TantrumState};
use crate::situation::Situation;

/// Saved progress of an ongoing tantrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TantrumSnapshot {
    /// Current phase.
    pub phase: TantrumPhase,
    /// Seconds spent in `phase`.
    pub time_in_phase: f32,
    /// Seconds since the tantrum began.
    pub elapsed: f32,
    /// Seconds since the last tantrum tick.
    pub tick_timer: f32,
}

/// Everything needed to rebuild an [`Agent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// Agent identifier.
    pub id: AgentId,
    /// Immutable traits.
    pub personality: Personality,
    /// The six emotional scalars.
    pub mood: EmotionalState,
    /// Regime name, e.g. `"needy"`.
    pub regime: String,
    /// Action label, e.g. `"request_food"`.
    pub action: String,
    /// Seconds spent in the current regime.
    pub time_in_regime: f32,
    /// Seconds since the selector last ran.
    pub since_evaluation: f32,
    /// Tantrum progress, present only while in a tantrum.
    pub tantrum: Option<TantrumSnapshot>,
    /// Situation at the time of the snapshot.
    pub situation: Situation,
}

fn check_time(id: AgentId, field: &str, value: f32) -> Result<f32, AgentError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AgentError::InvalidSnapshot {
            agent_id: id,
            reason: format!("{field} must be a finite, non-negative number of seconds, got {value}"),
        })
    }
}

impl Agent {
    /// Capture this agent's full state. Pending signals are not included.
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            personality: self.ctx.personality,
            mood: self.ctx.mood,
            regime: self.machine.current().as_str().to_owned(),
            action: self.ctx.action.as_str().to_owned(),
            time_in_regime: self.machine.time_in_state(),
            since_evaluation: self.ctx.since_evaluation,
            tantrum: self.ctx.tantrum.map(|t| TantrumSnapshot {
                phase: t.phase.current(),
                time_in_phase: t.phase.time_in_state(),
                elapsed: t.elapsed,
                tick_timer: t.tick_timer,
            }),
            situation: self.ctx.situation,
        }
    }

    /// Rebuild an agent from a snapshot. No hooks run and no signals are
    /// emitted.
    ///
    /// # Errors
    ///
    /// - [`AgentError::UnknownRegime`] / [`AgentError::UnknownAction`] for
    ///   names this build does not know.
    /// - [`AgentError::InvalidSnapshot`] for out-of-range personality
    ///   traits, negative or non-finite timers, or tantrum data that does
    ///   not match the regime.
    pub fn restore(
        snapshot: &AgentSnapshot,
        config: Arc<BehaviorConfig>,
    ) -> Result<Self, AgentError> {
        let id = snapshot.id;
        let regime = Regime::from_name(&snapshot.regime)
            .ok_or_else(|| AgentError::UnknownRegime(snapshot.regime.clone()))?;
        let action = Action::from_name(&snapshot.action)
            .ok_or_else(|| AgentError::UnknownAction(snapshot.action.clone()))?;

        if !snapshot.personality.is_valid() {
            return Err(AgentError::InvalidSnapshot {
                agent_id: id,
                reason: "personality traits must lie in [0, 1]".to_owned(),
            });
        }
        let time_in_regime = check_time(id, "time_in_regime", snapshot.time_in_regime)?;
        let since_evaluation = check_time(id, "since_evaluation", snapshot.since_evaluation)?;

        let tantrum = match (regime, snapshot.tantrum) {
            (Regime::Tantrum, Some(saved)) => Some(TantrumState {
                phase: StateMachine::resume(
                    saved.phase,
                    check_time(id, "tantrum.time_in_phase", saved.time_in_phase)?,
                ),
                elapsed: check_time(id, "tantrum.elapsed", saved.elapsed)?,
                tick_timer: check_time(id, "tantrum.tick_timer", saved.tick_timer)?,
            }),
            (Regime::Tantrum, None) => {
                return Err(AgentError::InvalidSnapshot {
                    agent_id: id,
                    reason: "tantrum regime without tantrum progress".to_owned(),
                });
            }
            (_, Some(_)) => {
                return Err(AgentError::InvalidSnapshot {
                    agent_id: id,
                    reason: format!("tantrum progress outside a tantrum (regime {regime})"),
                });
            }
            (_, None) => None,
        };

        let mut ctx = AgentContext::new(
            snapshot.mood,
            snapshot.personality,
            snapshot.situation,
            config,
        );
        ctx.action = action;
        ctx.since_evaluation = since_evaluation;
        ctx.tantrum = tantrum;

        Ok(Self {
            id,
            machine: StateMachine::resume(regime, time_in_regime),
            ctx,
        })
    }
}
