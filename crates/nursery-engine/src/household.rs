//! A scripted household standing in for the game world.
//!
//! The headless engine has no scene graph and no player, so
//! [`ScriptedHousehold`] plays both. Each tick it wanders mobile children
//! between rooms, jitters their positions, flips the television and play
//! flags, and answers distressed children with care matched to their most
//! urgent need. Falling asleep is left to the children's own regimes.
//! Every roll comes from one seeded `ChaCha12` stream, so two sessions with
//! the same seed and script are identical.

use std::collections::BTreeMap;

use nursery_agents::{Agent, Population, Position};
use nursery_core::{SituationSource, SourceError};
use nursery_types::{Activity, Food, Need, Regime, RoomId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::Deserialize;
use tracing::debug;

use crate::error::EngineError;

/// Stream offset so the household never shares a stream with profiles.
const HOUSEHOLD_STREAM: u64 = 0xA076_1D64_78BD_642F;

// -----------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------

/// Tuning for the scripted household, read from the `household` section
/// of `nursery-config.yaml`.
///
/// Every `*_per_second` value is a rate; the chance of the event during a
/// tick is `rate * step_seconds`, capped at 1.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HouseholdConfig {
    /// Side length of each square room, in world units.
    pub room_size: f32,
    /// How often a mobile child wanders to another room.
    pub wander_per_second: f64,
    /// How often a child starts or stops playing.
    pub play_toggle_per_second: f64,
    /// How often the television in a room is switched.
    pub tv_toggle_per_second: f64,
    /// How quickly the caregiver answers a needy or upset child.
    pub response_per_second: f64,
    /// How quickly the caregiver picks up an upset infant.
    pub hold_per_second: f64,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            room_size: 8.0,
            wander_per_second: 0.02,
            play_toggle_per_second: 0.05,
            tv_toggle_per_second: 0.01,
            response_per_second: 0.1,
            hold_per_second: 0.2,
        }
    }
}

impl HouseholdConfig {
    /// Read the `household` section of a YAML document, falling back to
    /// defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Household`] if the document or the section
    /// does not parse, or a value is negative or not finite.
    pub fn from_yaml(contents: &str) -> Result<Self, EngineError> {
        let raw: serde_yml::Value =
            serde_yml::from_str(contents).map_err(|e| EngineError::Household {
                message: format!("failed to parse config YAML: {e}"),
            })?;
        let config = match raw.get("household") {
            Some(section) => serde_yml::from_value(section.clone()).map_err(|e| {
                EngineError::Household {
                    message: format!("failed to parse household config: {e}"),
                }
            })?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), EngineError> {
        let rates = [
            ("wander_per_second", self.wander_per_second),
            ("play_toggle_per_second", self.play_toggle_per_second),
            ("tv_toggle_per_second", self.tv_toggle_per_second),
            ("response_per_second", self.response_per_second),
            ("hold_per_second", self.hold_per_second),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::Household {
                    message: format!("household.{field} must be finite and >= 0, got {value}"),
                });
            }
        }
        if !self.room_size.is_finite() || self.room_size <= 0.0 {
            return Err(EngineError::Household {
                message: format!("household.room_size must be > 0, got {}", self.room_size),
            });
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------
// Script
// -----------------------------------------------------------------------

/// Care handed out so far, for the end-of-session report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CareTally {
    /// Meals served.
    pub meals: u32,
    /// Play sessions.
    pub games: u32,
    /// Hugs.
    pub hugs: u32,
    /// Lullabies sung to tired children.
    pub lullabies: u32,
}

/// Seeded stand-in for the scene graph and the player.
#[derive(Debug, Clone)]
pub struct ScriptedHousehold {
    rng: ChaCha12Rng,
    rooms: u32,
    config: HouseholdConfig,
    tv: BTreeMap<RoomId, bool>,
    tally: CareTally,
}

impl ScriptedHousehold {
    /// Create a household with `rooms` rooms, seeded from the session seed.
    pub fn new(seed: u64, rooms: u32, config: HouseholdConfig) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed ^ HOUSEHOLD_STREAM),
            rooms: rooms.max(1),
            config,
            tv: BTreeMap::new(),
            tally: CareTally::default(),
        }
    }

    /// Care handed out so far.
    pub const fn tally(&self) -> CareTally {
        self.tally
    }

    /// Roll an event with the given per-second rate over `dt` seconds.
    fn roll(&mut self, per_second: f64, dt: f32) -> bool {
        let p = (per_second * f64::from(dt)).clamp(0.0, 1.0);
        p > 0.0 && self.rng.random_bool(p)
    }

    fn random_position(&mut self) -> Position {
        let size = self.config.room_size;
        Position::new(
            self.rng.random_range(0.0..size),
            self.rng.random_range(0.0..size),
        )
    }

    fn pick_food(&mut self) -> Food {
        Food::ALL
            .get(self.rng.random_range(0..Food::ALL.len()))
            .copied()
            .unwrap_or(Food::Milk)
    }

    fn pick_activity(&mut self) -> Activity {
        Activity::ALL
            .get(self.rng.random_range(0..Activity::ALL.len()))
            .copied()
            .unwrap_or(Activity::Blocks)
    }

    /// Flip televisions, then update each child in id order.
    fn step(&mut self, tick: u64, dt: f32, population: &mut Population) {
        for index in 0..self.rooms {
            let room = RoomId::new(index);
            if self.roll(self.config.tv_toggle_per_second, dt) {
                let on = self.tv.entry(room).or_insert(false);
                *on = !*on;
                debug!(tick, %room, tv_on = *on, "television switched");
            }
        }
        for agent in population.iter_mut() {
            self.arrange(agent, dt);
            self.care_for(tick, agent, dt);
        }
    }

    /// Move the child and refresh the flags the scene graph would own.
    fn arrange(&mut self, agent: &mut Agent, dt: f32) {
        let regime = agent.regime();
        let mobile = agent.personality().age_tier.can_move();

        if regime != Regime::Sleeping && mobile && self.roll(self.config.wander_per_second, dt) {
            let room = RoomId::new(self.rng.random_range(0..self.rooms));
            let position = self.random_position();
            let situation = agent.situation_mut();
            situation.room = room;
            situation.position = Some(position);
        } else if agent.situation().position.is_none() {
            let position = self.random_position();
            agent.situation_mut().position = Some(position);
        }

        let toggle_play = self.roll(self.config.play_toggle_per_second, dt);
        let room = agent.situation().room;
        let tv_on = self.tv.get(&room).copied().unwrap_or(false);
        let situation = agent.situation_mut();
        situation.tv_on = tv_on;
        if regime == Regime::Content {
            if toggle_play {
                situation.playing = !situation.playing;
            }
        } else {
            situation.playing = false;
        }
        if regime != Regime::Upset && regime != Regime::Tantrum {
            situation.held = false;
        }
    }

    /// Answer a needy or upset child, and pick up crying infants.
    fn care_for(&mut self, tick: u64, agent: &mut Agent, dt: f32) {
        let regime = agent.regime();
        if !matches!(regime, Regime::Needy | Regime::Upset | Regime::Tantrum) {
            return;
        }

        if !agent.personality().age_tier.can_move()
            && regime != Regime::Needy
            && self.roll(self.config.hold_per_second, dt)
        {
            agent.situation_mut().held = true;
        }

        if regime == Regime::Tantrum || !self.roll(self.config.response_per_second, dt) {
            return;
        }

        let need = agent.urgent_need();
        match need {
            Need::Hunger => {
                let food = self.pick_food();
                agent.feed(food);
                self.tally.meals = self.tally.meals.saturating_add(1);
            }
            Need::Boredom => {
                let activity = self.pick_activity();
                agent.play(activity);
                self.tally.games = self.tally.games.saturating_add(1);
            }
            Need::Comfort => {
                agent.comfort();
                self.tally.hugs = self.tally.hugs.saturating_add(1);
            }
            // Sleep belongs to the regime machine; a tired child is only soothed.
            Need::Fatigue => {
                agent.comfort();
                self.tally.lullabies = self.tally.lullabies.saturating_add(1);
            }
        }
        debug!(tick, agent_id = %agent.id(), need = need.as_str(), %regime, "caregiver responded");
    }
}

impl SituationSource for ScriptedHousehold {
    fn prepare(
        &mut self,
        tick: u64,
        step_seconds: f32,
        population: &mut Population,
    ) -> Result<(), SourceError> {
        self.step(tick, step_seconds, population);
        Ok(())
    }
}
