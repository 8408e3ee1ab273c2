//! A single simulated child.
//!
//! An [`Agent`] bundles the emotional state, personality, situation, and
//! regime machine of one child. Per tick the driver calls
//! [`Agent::update`], which first drifts the mood and then lets the regime
//! machine react. Outbound signals pile up in a private queue until the
//! driver calls [`Agent::drain_events`].
//!
//! Collaborators reach in only through narrow doors: the situation setter
//! and the care operations ([`feed`](Agent::feed), [`play`](Agent::play),
//! [`comfort`](Agent::comfort), [`apply`](Agent::apply)).

use std::sync::Arc;

use nursery_types::{
    Action, Activity, AgeTier, AgentId, EventKind, Food, Need, Personality, Regime, TantrumPhase,
};
use serde::Serialize;
use tracing::debug;

use crate::config::BehaviorConfig;
use crate::emotion::{EmotionalState, MoodDelta};
use crate::interaction::Participant;
use crate::machine::{StateMachine, Transitioned};
use crate::profile::Profile;
use crate::regime::AgentContext;
use crate::situation::Situation;

/// Something a child says or signals, chosen by age tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Utterance {
    /// Wordless crying or fussing.
    Distress,
    /// A short fixed toddler word.
    Token(&'static str),
    /// A full sentence.
    Phrase(&'static str),
}

const fn toddler_token(need: Need) -> &'static str {
    match need {
        Need::Hunger => "num num",
        Need::Boredom => "play!",
        Need::Fatigue => "sleepy",
        Need::Comfort => "up! up!",
    }
}

const fn child_phrase(need: Need) -> &'static str {
    match need {
        Need::Hunger => "I'm hungry, can I have something to eat?",
        Need::Boredom => "I'm bored, will you play with me?",
        Need::Fatigue => "I'm really tired.",
        Need::Comfort => "Can I have a hug?",
    }
}

/// One simulated child.
#[derive(Debug, Clone)]
pub struct Agent {
    pub(crate) id: AgentId,
    pub(crate) machine: StateMachine<Regime>,
    pub(crate) ctx: AgentContext,
}

impl Agent {
    /// Spawn an agent from its generated profile.
    ///
    /// A child whose starting fatigue exceeds `initial_sleep_fatigue`
    /// starts asleep; everyone else starts content. The initial action is
    /// chosen immediately but no signal is emitted for it.
    pub fn new(
        id: AgentId,
        profile: Profile,
        situation: Situation,
        config: Arc<BehaviorConfig>,
    ) -> Self {
        let initial = if profile.mood.fatigue() > config.regime.initial_sleep_fatigue {
            Regime::Sleeping
        } else {
            Regime::Content
        };
        let mut ctx = AgentContext::new(profile.mood, profile.personality, situation, config);
        let machine = StateMachine::start(initial, &mut ctx);
        ctx.outbox.clear();
        Self { id, machine, ctx }
    }

    /// Advance the child by `dt` simulated seconds.
    ///
    /// Mood drifts first, then the regime machine evaluates its
    /// transitions against the updated mood. Returns the regime change, if
    /// one happened.
    pub fn update(&mut self, dt: f32) -> Option<Transitioned<Regime>> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let asleep = self.machine.current() == Regime::Sleeping || self.ctx.situation.asleep;
        let engaged = self.ctx.situation.playing || self.ctx.action.is_activity();
        let held = self.ctx.situation.held;
        self.ctx
            .mood
            .update(dt, asleep, engaged, held, &self.ctx.config.mood);

        let mark = self.ctx.outbox.len();
        let fired = self.machine.update(&mut self.ctx, dt);
        if let Some(change) = fired {
            debug!(
                agent_id = %self.id,
                from = %change.from,
                to = %change.to,
                action = %self.ctx.action,
                "regime changed"
            );
            self.ctx.outbox.insert(
                mark,
                EventKind::RegimeChanged {
                    from: change.from,
                    to: change.to,
                },
            );
        }
        fired
    }

    /// Take every signal emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<EventKind> {
        std::mem::take(&mut self.ctx.outbox)
    }

    // -- Care operations --------------------------------------------------

    /// Add a bounded delta to the mood.
    pub fn apply(&mut self, delta: &MoodDelta) {
        self.ctx.mood.apply(delta);
    }

    /// Give the child something to eat.
    pub fn feed(&mut self, food: Food) {
        let care = &self.ctx.config.care;
        let bonus = if food == self.ctx.personality.preferences.favorite_food {
            care.favorite_food_comfort_bonus
        } else {
            0.0
        };
        let delta = MoodDelta {
            hunger: -care.feed_hunger_relief,
            comfort: care.feed_comfort_gain + bonus,
            ..MoodDelta::ZERO
        };
        self.ctx.mood.apply(&delta);
    }

    /// Play a round of `activity` with the child.
    pub fn play(&mut self, activity: Activity) {
        let care = &self.ctx.config.care;
        let bonus = if activity == self.ctx.personality.preferences.favorite_activity {
            care.favorite_activity_boredom_bonus
        } else {
            0.0
        };
        let delta = MoodDelta {
            boredom: -(care.play_boredom_relief + bonus),
            mischief: -care.play_mischief_relief,
            trust: care.play_trust_gain,
            ..MoodDelta::ZERO
        };
        self.ctx.mood.apply(&delta);
    }

    /// Hug and soothe the child.
    pub fn comfort(&mut self) {
        let care = &self.ctx.config.care;
        let delta = MoodDelta {
            comfort: care.comfort_gain,
            trust: care.comfort_trust_gain,
            ..MoodDelta::ZERO
        };
        self.ctx.mood.apply(&delta);
    }

    // -- Situation --------------------------------------------------------

    /// Replace everything the collaborators report about this child.
    pub const fn set_situation(&mut self, situation: Situation) {
        self.ctx.situation = situation;
    }

    /// Mutable access to the situation for piecemeal updates.
    pub const fn situation_mut(&mut self) -> &mut Situation {
        &mut self.ctx.situation
    }

    // -- Queries ----------------------------------------------------------

    /// Agent identifier.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Current regime.
    pub const fn regime(&self) -> Regime {
        self.machine.current()
    }

    /// Seconds spent in the current regime.
    pub const fn time_in_regime(&self) -> f32 {
        self.machine.time_in_state()
    }

    /// Current action.
    pub const fn action(&self) -> Action {
        self.ctx.action
    }

    /// Current emotional state.
    pub const fn mood(&self) -> &EmotionalState {
        &self.ctx.mood
    }

    /// Immutable personality.
    pub const fn personality(&self) -> &Personality {
        &self.ctx.personality
    }

    /// Current situation.
    pub const fn situation(&self) -> &Situation {
        &self.ctx.situation
    }

    /// Phase of the ongoing tantrum, if any.
    pub fn tantrum_phase(&self) -> Option<TantrumPhase> {
        self.ctx.tantrum.as_ref().map(crate::regime::TantrumState::phase)
    }

    /// Composite wellbeing.
    pub fn wellbeing(&self) -> f32 {
        self.ctx.mood.wellbeing()
    }

    /// Most pressing need.
    pub fn urgent_need(&self) -> Need {
        self.ctx.mood.urgent_need()
    }

    /// The interaction-scan view of this child.
    pub fn participant(&self) -> Participant {
        Participant {
            id: self.id,
            room: self.ctx.situation.room,
            position: self.ctx.situation.position,
            age_tier: self.ctx.personality.age_tier,
            mischief: self.ctx.mood.mischief(),
            comfort: self.ctx.mood.comfort(),
            engaged: self.ctx.situation.playing || self.ctx.action.is_activity(),
        }
    }

    /// What the child would say right now, if anything.
    ///
    /// Sleeping and content children are quiet. A tantrum is always
    /// wordless, and infants only ever fuss. Otherwise toddlers use a
    /// fixed word and children a sentence, both keyed on the urgent need.
    pub fn vocalize(&self) -> Option<Utterance> {
        match self.regime() {
            Regime::Sleeping | Regime::Content => None,
            Regime::Tantrum => Some(Utterance::Distress),
            Regime::Needy | Regime::Upset => {
                let need = self.urgent_need();
                let tier = self.ctx.personality.age_tier;
                Some(if !tier.can_speak() {
                    Utterance::Distress
                } else if tier == AgeTier::Child {
                    Utterance::Phrase(child_phrase(need))
                } else {
                    Utterance::Token(toddler_token(need))
                })
            }
        }
    }

    /// Whether the child would do as they are told right now.
    ///
    /// Only child-tier agents follow instructions, only while they trust
    /// the player enough, and never while upset or in a tantrum.
    pub fn follows_instruction(&self) -> bool {
        self.ctx.personality.age_tier.can_follow_instructions()
            && self.ctx.mood.trust() > self.ctx.config.care.instruction_trust_threshold
            && !matches!(self.regime(), Regime::Upset | Regime::Tantrum)
    }
}
