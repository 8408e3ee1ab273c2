//! Tick cycle: the phase loop that drives a Nursery session.
//!
//! Each tick runs through these phases:
//!
//! 1. **Clock** -- advance the fixed-step clock.
//!
//! 2. **Situation** -- let the [`SituationSource`] move children around,
//!    toggle flags, and perform care. The engine then recomputes
//!    `sibling_nearby` from who is within reach.
//!
//! 3. **Agents** -- update every agent in ascending id order and drain
//!    their signals, stamping each with the tick and agent id.
//!
//! 4. **Interaction** -- snapshot every agent into a
//!    [`Participant`](nursery_agents::Participant), run the pairwise scan,
//!    and apply the summed deltas.
//!
//! 5. **Summary** -- count regimes and report what happened.
//!
//! Interaction deltas land after every agent has updated, so they shape
//! the next tick's transitions rather than this one's. Given the same
//! seed and the same source, two runs produce identical summaries.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use nursery_agents::{
    Agent, BehaviorConfig, Encounter, Population, Transitioned, resolve_interactions,
};
use nursery_types::{AgentId, EventKind, Regime, SimEvent};
use serde::Serialize;
use tracing::{debug, warn};

use crate::clock::SimClock;
use crate::source::SituationSource;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: crate::clock::ClockError,
    },

    /// The situation source failed.
    #[error("situation error: {source}")]
    Source {
        /// The underlying source error.
        #[from]
        source: crate::source::SourceError,
    },
}

/// The mutable session state passed through the tick cycle.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// The session clock.
    pub clock: SimClock,
    /// Every child in the house.
    pub population: Population,
    /// Shared behavior tuning.
    pub config: Arc<BehaviorConfig>,
}

impl SimulationState {
    /// Bundle a clock, a population, and their shared configuration.
    pub const fn new(clock: SimClock, population: Population, config: Arc<BehaviorConfig>) -> Self {
        Self {
            clock,
            population,
            config,
        }
    }
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// How many agents ended the tick in each regime.
    pub regime_counts: BTreeMap<Regime, u32>,
    /// Every signal emitted this tick, in agent id order.
    pub events: Vec<SimEvent>,
    /// Every interaction rule that fired.
    pub encounters: Vec<Encounter>,
    /// Number of regime transitions this tick.
    pub regime_changes: u32,
    /// Mean wellbeing after interaction deltas, `None` for an empty house.
    pub mean_wellbeing: Option<f32>,
}

impl TickSummary {
    /// Number of agents currently in `regime`.
    pub fn count(&self, regime: Regime) -> u32 {
        self.regime_counts.get(&regime).copied().unwrap_or(0)
    }
}

/// Execute one complete tick of the session.
pub fn run_tick(
    state: &mut SimulationState,
    source: &mut dyn SituationSource,
) -> Result<TickSummary, TickError> {
    // --- Phase 1: Clock ---
    let tick = state.clock.advance()?;
    let dt = state.clock.step_seconds();

    // --- Phase 2: Situation ---
    source.prepare(tick, dt, &mut state.population)?;
    state
        .population
        .refresh_sibling_presence(state.config.interaction.proximity_radius);

    // --- Phase 3: Agents ---
    let mut events = Vec::new();
    let mut criers = BTreeSet::new();
    let mut regime_changes: u32 = 0;
    for agent in state.population.iter_mut() {
        if let Some(Transitioned { from, to }) = agent.update(dt) {
            regime_changes = regime_changes.saturating_add(1);
            if to == Regime::Tantrum {
                debug!(tick, agent_id = %agent.id(), %from, "tantrum started");
            }
        }
        let agent_id = agent.id();
        for kind in agent.drain_events() {
            if kind == EventKind::ContagiousCry {
                criers.insert(agent_id);
            }
            events.push(SimEvent {
                tick,
                agent_id,
                kind,
            });
        }
    }

    // --- Phase 4: Interaction ---
    let participants: Vec<_> = state.population.iter().map(Agent::participant).collect();
    let outcome = resolve_interactions(&participants, &criers, dt, &state.config.interaction);
    for (agent_id, delta) in &outcome.deltas {
        apply_delta(&mut state.population, tick, *agent_id, delta);
    }

    // --- Phase 5: Summary ---
    let mut regime_counts = BTreeMap::new();
    for agent in state.population.iter() {
        let count: &mut u32 = regime_counts.entry(agent.regime()).or_insert(0);
        *count = count.saturating_add(1);
    }

    debug!(
        tick,
        events = events.len(),
        encounters = outcome.encounters.len(),
        regime_changes,
        "tick complete"
    );

    Ok(TickSummary {
        tick,
        regime_counts,
        events,
        encounters: outcome.encounters,
        regime_changes,
        mean_wellbeing: state.population.mean_wellbeing(),
    })
}

fn apply_delta(
    population: &mut Population,
    tick: u64,
    agent_id: AgentId,
    delta: &nursery_agents::MoodDelta,
) {
    match population.get_mut(agent_id) {
        Ok(agent) => agent.apply(delta),
        Err(err) => warn!(tick, %agent_id, error = %err, "dropping interaction delta"),
    }
}
