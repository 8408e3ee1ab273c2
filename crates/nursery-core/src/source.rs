//! Situation source trait and a static implementation.
//!
//! Before agents update each tick, the driver gives the outside world a
//! chance to change what the children perceive: rooms, positions, whether
//! they are held or playing, and any care the player performs. The
//! [`SituationSource`] trait abstracts that world. It could be the game's
//! scene graph, a scripted household, or a test stub.

use nursery_agents::Population;

/// Errors that can occur while preparing a tick's situation.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// An internal error in the situation source.
    #[error("situation source error: {message}")]
    Internal {
        /// Description of the error.
        message: String,
    },
}

/// Whatever feeds the agents their surroundings and care.
///
/// The engine calls [`prepare`](SituationSource::prepare) once per tick,
/// after the clock advances and before any agent updates.
pub trait SituationSource {
    /// Update situations and apply care for the given tick.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the source cannot produce a situation
    /// for this tick at all. The tick is abandoned in that case.
    fn prepare(
        &mut self,
        tick: u64,
        step_seconds: f32,
        population: &mut Population,
    ) -> Result<(), SourceError>;
}

/// A source that never changes anything.
///
/// Children stay where they spawned, nobody is held, and the player never
/// intervenes. Useful for watching the unattended drift of a household.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSituation;

impl StaticSituation {
    /// Create a new static source.
    pub const fn new() -> Self {
        Self
    }
}

impl SituationSource for StaticSituation {
    fn prepare(
        &mut self,
        _tick: u64,
        _step_seconds: f32,
        _population: &mut Population,
    ) -> Result<(), SourceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nursery_agents::BehaviorConfig;

    use super::*;

    #[test]
    fn static_source_leaves_population_untouched() {
        let config = Arc::new(BehaviorConfig::default());
        let mut population = Population::spawn(3, 2, 1, &config);
        let before: Vec<_> = population.iter().map(nursery_agents::Agent::snapshot).collect();
        let mut source = StaticSituation::new();
        assert!(source.prepare(1, 0.5, &mut population).is_ok());
        let after: Vec<_> = population.iter().map(nursery_agents::Agent::snapshot).collect();
        assert_eq!(before, after);
    }
}
