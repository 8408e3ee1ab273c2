//! The set of children in a session.
//!
//! A [`Population`] owns every [`Agent`] keyed by [`AgentId`], so iteration
//! is always in ascending id order. Agents never reference each other;
//! anything that needs two of them goes through the population by id.

use std::collections::BTreeMap;
use std::sync::Arc;

use nursery_types::{AgentId, RoomId};
use tracing::info;

use crate::agent::Agent;
use crate::config::BehaviorConfig;
use crate::error::AgentError;
use crate::interaction::Participant;
use crate::profile::generate_profile;
use crate::situation::Situation;

/// Every agent in the session, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct Population {
    agents: BTreeMap<AgentId, Agent>,
}

impl Population {
    /// An empty population.
    pub const fn new() -> Self {
        Self {
            agents: BTreeMap::new(),
        }
    }

    /// Spawn `count` children from `seed`.
    ///
    /// Child `i` gets id `i`, the profile `generate_profile(seed, i)`, and
    /// starts in room `i % rooms` (room 0 when `rooms` is zero).
    pub fn spawn(seed: u64, count: u32, rooms: u32, config: &Arc<BehaviorConfig>) -> Self {
        let mut population = Self::new();
        for index in 0..count {
            let id = AgentId::new(index);
            let room = RoomId::new(index.checked_rem(rooms).unwrap_or(0));
            let agent = Agent::new(
                id,
                generate_profile(seed, index),
                Situation::in_room(room),
                Arc::clone(config),
            );
            population.agents.insert(id, agent);
        }
        info!(seed, count, rooms, "spawned population");
        population
    }

    /// Add an agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::DuplicateAgent`] if the id is already taken.
    pub fn insert(&mut self, agent: Agent) -> Result<(), AgentError> {
        let id = agent.id();
        if self.agents.contains_key(&id) {
            return Err(AgentError::DuplicateAgent(id));
        }
        self.agents.insert(id, agent);
        Ok(())
    }

    /// Look up an agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentNotFound`] for an unknown id.
    pub fn get(&self, id: AgentId) -> Result<&Agent, AgentError> {
        self.agents.get(&id).ok_or(AgentError::AgentNotFound(id))
    }

    /// Look up an agent mutably.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentNotFound`] for an unknown id.
    pub fn get_mut(&mut self, id: AgentId) -> Result<&mut Agent, AgentError> {
        self.agents.get_mut(&id).ok_or(AgentError::AgentNotFound(id))
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Agents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Agents in ascending id order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.values_mut()
    }

    /// Agent ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.keys().copied()
    }

    /// Set each agent's `sibling_nearby` flag from where everyone is.
    ///
    /// A sibling counts when it shares the room and, if both have a
    /// position, stands within `radius`.
    pub fn refresh_sibling_presence(&mut self, radius: f32) {
        let views: Vec<Participant> = self.agents.values().map(Agent::participant).collect();
        for (agent, view) in self.agents.values_mut().zip(&views) {
            agent.situation_mut().sibling_nearby = views
                .iter()
                .any(|other| other.id != view.id && view.is_near(other, radius));
        }
    }

    /// Mean wellbeing across the population, or `None` if empty.
    pub fn mean_wellbeing(&self) -> Option<f32> {
        if self.agents.is_empty() {
            return None;
        }
        let (total, count) = self
            .agents
            .values()
            .fold((0.0_f32, 0.0_f32), |(total, count), agent| {
                (total + agent.wellbeing(), count + 1.0)
            });
        Some(total / count)
    }
}
