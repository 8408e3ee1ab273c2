//! Tick callback that turns summaries into a structured log.
//!
//! In the game, the outbound signals feed animation, speech, audio, and
//! scoring. Headless, [`LogObserver`] stands in for all of them: every
//! signal becomes a log line with the agent and tick attached, and a
//! periodic status line reports the regime mix and mean wellbeing.

use std::collections::BTreeMap;

use nursery_agents::Utterance;
use nursery_core::{SimulationState, TickCallback, TickSummary};
use nursery_types::{EventKind, Regime, SimEvent};
use tracing::{debug, info, warn};

/// Running totals over a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Signals seen, keyed by kind name.
    pub signals: BTreeMap<&'static str, u64>,
    /// Tantrums started.
    pub tantrums: u64,
    /// Interaction encounters seen.
    pub encounters: u64,
}

/// Logs each tick's signals and a periodic household status.
#[derive(Debug)]
pub struct LogObserver {
    status_every: u64,
    stats: SessionStats,
}

impl LogObserver {
    /// Create an observer that logs a status line every `status_every`
    /// ticks (0 = never).
    pub fn new(status_every: u64) -> Self {
        Self {
            status_every,
            stats: SessionStats::default(),
        }
    }

    /// Totals so far.
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    fn record(&mut self, event: &SimEvent) {
        let name = kind_name(&event.kind);
        let count = self.stats.signals.entry(name).or_insert(0);
        *count = count.saturating_add(1);

        match serde_json::to_string(event) {
            Ok(json) => debug!(tick = event.tick, agent_id = %event.agent_id, signal = %json, "signal"),
            Err(e) => warn!(tick = event.tick, agent_id = %event.agent_id, error = %e, "unserializable signal"),
        }

        match event.kind {
            EventKind::TantrumEntered { action } => {
                self.stats.tantrums = self.stats.tantrums.saturating_add(1);
                info!(tick = event.tick, agent_id = %event.agent_id, %action, "tantrum started");
            }
            EventKind::ContagiousCry => {
                info!(tick = event.tick, agent_id = %event.agent_id, "crying spreads through the room");
            }
            EventKind::RegimeChanged { from, to } if to > from => {
                info!(tick = event.tick, agent_id = %event.agent_id, %from, %to, "escalated");
            }
            _ => {}
        }
    }

    fn log_status(summary: &TickSummary, state: &SimulationState) {
        info!(
            tick = summary.tick,
            simulated_seconds = state.clock.elapsed_seconds(),
            sleeping = summary.count(Regime::Sleeping),
            content = summary.count(Regime::Content),
            needy = summary.count(Regime::Needy),
            upset = summary.count(Regime::Upset),
            tantrum = summary.count(Regime::Tantrum),
            mean_wellbeing = summary.mean_wellbeing,
            "household status"
        );
        for agent in state.population.iter() {
            if let Some(utterance) = agent.vocalize() {
                let said = match utterance {
                    Utterance::Distress => "*cries*",
                    Utterance::Token(text) | Utterance::Phrase(text) => text,
                };
                info!(
                    tick = summary.tick,
                    agent_id = %agent.id(),
                    tier = ?agent.personality().age_tier,
                    regime = %agent.regime(),
                    said,
                    "vocalized"
                );
            }
        }
    }
}

const fn kind_name(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::RegimeChanged { .. } => "regime_changed",
        EventKind::ActionChanged { .. } => "action_changed",
        EventKind::TantrumEntered { .. } => "tantrum_entered",
        EventKind::TantrumTick { .. } => "tantrum_tick",
        EventKind::ContagiousCry => "contagious_cry",
    }
}

impl TickCallback for LogObserver {
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState) {
        for event in &summary.events {
            self.record(event);
        }
        self.stats.encounters = self
            .stats
            .encounters
            .saturating_add(u64::try_from(summary.encounters.len()).unwrap_or(u64::MAX));

        if summary.tick.checked_rem(self.status_every) == Some(0) {
            Self::log_status(summary, state);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use nursery_agents::{BehaviorConfig, Population};
    use nursery_core::{SimClock, StaticSituation, run_tick};

    use super::*;

    #[test]
    fn counts_every_signal() {
        let config = Arc::new(BehaviorConfig::default());
        let mut state = SimulationState::new(
            SimClock::new(0.5).unwrap(),
            Population::spawn(5, 4, 1, &config),
            config,
        );
        let mut observer = LogObserver::new(50);
        let mut seen: u64 = 0;
        for _ in 0..600 {
            let summary = run_tick(&mut state, &mut StaticSituation::new()).unwrap();
            seen += u64::try_from(summary.events.len()).unwrap();
            observer.on_tick(&summary, &state);
        }
        assert_eq!(observer.stats().signals.values().sum::<u64>(), seen);
        assert_eq!(
            observer.stats().tantrums,
            observer
                .stats()
                .signals
                .get("tantrum_entered")
                .copied()
                .unwrap_or(0)
        );
    }
}
