//! Tunable parameters for the behavior core.
//!
//! Every rate is expressed per simulated second and is scaled by the
//! elapsed step, so changing the tick rate never changes behavior. The
//! [`BehaviorConfig`] struct bundles every tunable; the driver builds it
//! from the `behavior` section of `nursery-config.yaml` and shares it
//! between all agents.

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject negative or non-finite rates.
fn check_non_negative(field: &str, value: f32) -> Result<(), AgentError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AgentError::InvalidConfig {
            field: field.to_owned(),
            reason: format!("expected a finite value >= 0, got {value}"),
        })
    }
}

/// Reject thresholds outside the unit interval.
fn check_unit(field: &str, value: f32) -> Result<(), AgentError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AgentError::InvalidConfig {
            field: field.to_owned(),
            reason: format!("expected a value in [0, 1], got {value}"),
        })
    }
}

/// Reject non-positive durations.
fn check_positive(field: &str, value: f32) -> Result<(), AgentError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AgentError::InvalidConfig {
            field: field.to_owned(),
            reason: format!("expected a finite value > 0, got {value}"),
        })
    }
}

// ---------------------------------------------------------------------------
// BehaviorConfig
// ---------------------------------------------------------------------------

/// Every tunable of the behavior core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Emotional drift rates.
    pub mood: MoodConfig,
    /// Regime transition thresholds and timeouts.
    pub regime: RegimeConfig,
    /// Action re-evaluation intervals.
    pub selector: SelectorConfig,
    /// Inter-agent interaction radius and deltas.
    pub interaction: InteractionConfig,
    /// Amounts applied by player care actions.
    pub care: CareConfig,
}

impl BehaviorConfig {
    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AgentError> {
        self.mood.validate()?;
        self.regime.validate()?;
        self.selector.validate()?;
        self.interaction.validate()?;
        self.care.validate()
    }
}

// ---------------------------------------------------------------------------
// MoodConfig
// ---------------------------------------------------------------------------

/// Per-second drift rates of the six emotional scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    /// Hunger growth while awake.
    pub hunger_rate: f32,
    /// Fraction of `hunger_rate` that still applies while asleep.
    pub hunger_sleep_factor: f32,
    /// Boredom growth while awake and idle.
    pub boredom_rate: f32,
    /// Boredom reduction while engaged in an activity.
    ///
    /// Must exceed `boredom_rate`: play relieves boredom faster than
    /// idling builds it.
    pub boredom_activity_recovery: f32,
    /// Boredom reduction while asleep.
    pub boredom_sleep_recovery: f32,
    /// Fatigue growth while awake.
    pub fatigue_rate: f32,
    /// Fatigue reduction while asleep.
    pub fatigue_sleep_recovery: f32,
    /// Mischief growth while bored and not yet tired.
    pub mischief_rate: f32,
    /// Mischief reduction while awake but not in a mischievous mood.
    pub mischief_decay: f32,
    /// Mischief reduction while asleep.
    pub mischief_sleep_decay: f32,
    /// Boredom above which mischief can build.
    pub mischief_boredom_threshold: f32,
    /// Fatigue below which mischief can build.
    pub mischief_fatigue_ceiling: f32,
    /// Trust decay while not being held.
    pub trust_decay: f32,
    /// Trust growth while being held.
    pub trust_held_gain: f32,
    /// Comfort decay toward zero.
    pub comfort_decay: f32,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            hunger_rate: 0.004,
            hunger_sleep_factor: 0.5,
            boredom_rate: 0.006,
            boredom_activity_recovery: 0.015,
            boredom_sleep_recovery: 0.01,
            fatigue_rate: 0.003,
            fatigue_sleep_recovery: 0.01,
            mischief_rate: 0.005,
            mischief_decay: 0.004,
            mischief_sleep_decay: 0.008,
            mischief_boredom_threshold: 0.5,
            mischief_fatigue_ceiling: 0.7,
            trust_decay: 0.001,
            trust_held_gain: 0.02,
            comfort_decay: 0.002,
        }
    }
}

impl MoodConfig {
    /// A configuration in which nothing drifts. Useful for holding an
    /// agent at a fixed emotional point.
    pub const fn frozen() -> Self {
        Self {
            hunger_rate: 0.0,
            hunger_sleep_factor: 0.0,
            boredom_rate: 0.0,
            boredom_activity_recovery: 0.0,
            boredom_sleep_recovery: 0.0,
            fatigue_rate: 0.0,
            fatigue_sleep_recovery: 0.0,
            mischief_rate: 0.0,
            mischief_decay: 0.0,
            mischief_sleep_decay: 0.0,
            mischief_boredom_threshold: 0.5,
            mischief_fatigue_ceiling: 0.7,
            trust_decay: 0.0,
            trust_held_gain: 0.0,
            comfort_decay: 0.0,
        }
    }

    /// Validate rates and thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AgentError> {
        let rates = [
            ("mood.hunger_rate", self.hunger_rate),
            ("mood.boredom_rate", self.boredom_rate),
            ("mood.boredom_activity_recovery", self.boredom_activity_recovery),
            ("mood.boredom_sleep_recovery", self.boredom_sleep_recovery),
            ("mood.fatigue_rate", self.fatigue_rate),
            ("mood.fatigue_sleep_recovery", self.fatigue_sleep_recovery),
            ("mood.mischief_rate", self.mischief_rate),
            ("mood.mischief_decay", self.mischief_decay),
            ("mood.mischief_sleep_decay", self.mischief_sleep_decay),
            ("mood.trust_decay", self.trust_decay),
            ("mood.trust_held_gain", self.trust_held_gain),
            ("mood.comfort_decay", self.comfort_decay),
        ];
        for (field, value) in rates {
            check_non_negative(field, value)?;
        }
        check_unit("mood.hunger_sleep_factor", self.hunger_sleep_factor)?;
        check_unit("mood.mischief_boredom_threshold", self.mischief_boredom_threshold)?;
        check_unit("mood.mischief_fatigue_ceiling", self.mischief_fatigue_ceiling)?;
        // Engaged boredom must shrink faster than idle boredom grows,
        // unless boredom is frozen altogether.
        let boredom_drifts = self.boredom_rate > 0.0 || self.boredom_activity_recovery > 0.0;
        if boredom_drifts && self.boredom_activity_recovery <= self.boredom_rate {
            return Err(AgentError::InvalidConfig {
                field: "mood.boredom_activity_recovery".to_owned(),
                reason: format!(
                    "must be > boredom_rate ({}), got {}",
                    self.boredom_rate, self.boredom_activity_recovery
                ),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RegimeConfig
// ---------------------------------------------------------------------------

/// Guard thresholds and timeouts of the regime machine.
///
/// The enter/leave thresholds of `Needy` are deliberately asymmetric
/// (`content_urgent_threshold` > `needy_settle_threshold`) so an agent
/// hovering near the boundary does not flap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeConfig {
    /// Initial fatigue above which a new agent starts asleep.
    pub initial_sleep_fatigue: f32,
    /// Sleeping wakes to Content once fatigue drops below this.
    pub wake_fatigue: f32,
    /// Sleeping wakes to Needy once hunger exceeds this.
    pub wake_hunger: f32,
    /// Content becomes Needy when `has_urgent_need(this)` holds.
    pub content_urgent_threshold: f32,
    /// Content falls asleep once fatigue exceeds this.
    pub content_sleep_fatigue: f32,
    /// Needy settles back to Content when `has_urgent_need(this)` no longer holds.
    pub needy_settle_threshold: f32,
    /// Threshold for `is_critical` in the Needy and Upset guards.
    pub critical_threshold: f32,
    /// Needy becomes Upset when trust drops below this.
    pub needy_trust_floor: f32,
    /// Upset calms to Needy once trust rises above this.
    pub upset_recover_trust: f32,
    /// Seconds in Upset before escalating to Tantrum.
    pub upset_timeout_seconds: f32,
    /// Upset escalates immediately when hunger exceeds this ...
    pub meltdown_hunger: f32,
    /// ... and fatigue exceeds this.
    pub meltdown_fatigue: f32,
    /// Seconds in Tantrum before subsiding to Upset.
    pub tantrum_timeout_seconds: f32,
    /// Tantrum subsides to Upset once fatigue exceeds this.
    pub tantrum_exhausted_fatigue: f32,
    /// Tantrum collapses into Sleeping once fatigue exceeds this.
    pub tantrum_collapse_fatigue: f32,
    /// Seconds of tantrum before crying becomes contagious.
    pub contagion_onset_seconds: f32,
    /// Interval between tantrum-tick signals.
    pub tantrum_tick_seconds: f32,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            initial_sleep_fatigue: 0.8,
            wake_fatigue: 0.3,
            wake_hunger: 0.8,
            content_urgent_threshold: 0.7,
            content_sleep_fatigue: 0.9,
            needy_settle_threshold: 0.5,
            critical_threshold: 0.85,
            needy_trust_floor: 0.2,
            upset_recover_trust: 0.35,
            upset_timeout_seconds: 30.0,
            meltdown_hunger: 0.9,
            meltdown_fatigue: 0.8,
            tantrum_timeout_seconds: 45.0,
            tantrum_exhausted_fatigue: 0.95,
            tantrum_collapse_fatigue: 0.98,
            contagion_onset_seconds: 2.0,
            tantrum_tick_seconds: 1.0,
        }
    }
}

impl RegimeConfig {
    /// Validate thresholds and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AgentError> {
        let thresholds = [
            ("regime.initial_sleep_fatigue", self.initial_sleep_fatigue),
            ("regime.wake_fatigue", self.wake_fatigue),
            ("regime.wake_hunger", self.wake_hunger),
            ("regime.content_urgent_threshold", self.content_urgent_threshold),
            ("regime.content_sleep_fatigue", self.content_sleep_fatigue),
            ("regime.needy_settle_threshold", self.needy_settle_threshold),
            ("regime.critical_threshold", self.critical_threshold),
            ("regime.needy_trust_floor", self.needy_trust_floor),
            ("regime.upset_recover_trust", self.upset_recover_trust),
            ("regime.meltdown_hunger", self.meltdown_hunger),
            ("regime.meltdown_fatigue", self.meltdown_fatigue),
            ("regime.tantrum_exhausted_fatigue", self.tantrum_exhausted_fatigue),
            ("regime.tantrum_collapse_fatigue", self.tantrum_collapse_fatigue),
        ];
        for (field, value) in thresholds {
            check_unit(field, value)?;
        }
        check_positive("regime.upset_timeout_seconds", self.upset_timeout_seconds)?;
        check_positive("regime.tantrum_timeout_seconds", self.tantrum_timeout_seconds)?;
        check_non_negative("regime.contagion_onset_seconds", self.contagion_onset_seconds)?;
        check_positive("regime.tantrum_tick_seconds", self.tantrum_tick_seconds)?;
        if self.needy_settle_threshold > self.content_urgent_threshold {
            return Err(AgentError::InvalidConfig {
                field: "regime.needy_settle_threshold".to_owned(),
                reason: format!(
                    "must not exceed content_urgent_threshold ({}), got {}",
                    self.content_urgent_threshold, self.needy_settle_threshold
                ),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SelectorConfig
// ---------------------------------------------------------------------------

/// How often the action selector re-scores while a regime persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Re-evaluation interval in Content.
    pub content_reevaluate_seconds: f32,
    /// Re-evaluation interval in Needy.
    pub needy_reevaluate_seconds: f32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            content_reevaluate_seconds: 10.0,
            needy_reevaluate_seconds: 15.0,
        }
    }
}

impl SelectorConfig {
    /// Validate intervals.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AgentError> {
        check_positive(
            "selector.content_reevaluate_seconds",
            self.content_reevaluate_seconds,
        )?;
        check_positive(
            "selector.needy_reevaluate_seconds",
            self.needy_reevaluate_seconds,
        )
    }
}

// ---------------------------------------------------------------------------
// InteractionConfig
// ---------------------------------------------------------------------------

/// Radius and deltas of the pairwise interaction pass.
///
/// `*_loss`/`*_relief` values suffixed per second are scaled by the step;
/// contagion losses are one-shot per cry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Maximum distance between two positioned agents for pair rules.
    pub proximity_radius: f32,
    /// Comfort lost by a bystander when someone starts crying contagiously.
    pub contagion_comfort_loss: f32,
    /// Comfort lost by an infant bystander (replaces the regular loss).
    pub contagion_infant_comfort_loss: f32,
    /// Extra comfort lost by a bystander already below `low_comfort_threshold`.
    pub contagion_low_comfort_extra: f32,
    /// Comfort below which a bystander takes the extra contagion loss.
    pub low_comfort_threshold: f32,
    /// Mischief above which playing together turns into fighting.
    pub fight_mischief_threshold: f32,
    /// Comfort lost per second by each fighter.
    pub fight_comfort_loss_per_second: f32,
    /// Boredom relieved per second by each cooperating player.
    pub cooperate_boredom_relief_per_second: f32,
    /// Mischief relieved per second by each cooperating player.
    pub cooperate_mischief_relief_per_second: f32,
    /// Mischief above which an older child bullies a younger one.
    pub bully_mischief_threshold: f32,
    /// Comfort lost per second by the bullied child.
    pub bully_comfort_loss_per_second: f32,
    /// Trust lost per second by the bullied child.
    pub bully_trust_loss_per_second: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            proximity_radius: 3.0,
            contagion_comfort_loss: 0.1,
            contagion_infant_comfort_loss: 0.2,
            contagion_low_comfort_extra: 0.05,
            low_comfort_threshold: 0.5,
            fight_mischief_threshold: 0.7,
            fight_comfort_loss_per_second: 0.05,
            cooperate_boredom_relief_per_second: 0.04,
            cooperate_mischief_relief_per_second: 0.01,
            bully_mischief_threshold: 0.7,
            bully_comfort_loss_per_second: 0.06,
            bully_trust_loss_per_second: 0.04,
        }
    }
}

impl InteractionConfig {
    /// Validate radius and deltas.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AgentError> {
        check_non_negative("interaction.proximity_radius", self.proximity_radius)?;
        let deltas = [
            ("interaction.contagion_comfort_loss", self.contagion_comfort_loss),
            (
                "interaction.contagion_infant_comfort_loss",
                self.contagion_infant_comfort_loss,
            ),
            (
                "interaction.contagion_low_comfort_extra",
                self.contagion_low_comfort_extra,
            ),
            ("interaction.low_comfort_threshold", self.low_comfort_threshold),
            ("interaction.fight_mischief_threshold", self.fight_mischief_threshold),
            (
                "interaction.bully_mischief_threshold",
                self.bully_mischief_threshold,
            ),
        ];
        for (field, value) in deltas {
            check_unit(field, value)?;
        }
        let rates = [
            (
                "interaction.fight_comfort_loss_per_second",
                self.fight_comfort_loss_per_second,
            ),
            (
                "interaction.cooperate_boredom_relief_per_second",
                self.cooperate_boredom_relief_per_second,
            ),
            (
                "interaction.cooperate_mischief_relief_per_second",
                self.cooperate_mischief_relief_per_second,
            ),
            (
                "interaction.bully_comfort_loss_per_second",
                self.bully_comfort_loss_per_second,
            ),
            (
                "interaction.bully_trust_loss_per_second",
                self.bully_trust_loss_per_second,
            ),
        ];
        for (field, value) in rates {
            check_non_negative(field, value)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CareConfig
// ---------------------------------------------------------------------------

/// One-shot deltas applied when the player cares for a child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareConfig {
    /// Hunger removed by a meal.
    pub feed_hunger_relief: f32,
    /// Comfort gained from any meal.
    pub feed_comfort_gain: f32,
    /// Extra comfort from the child's favorite food.
    pub favorite_food_comfort_bonus: f32,
    /// Boredom removed by a play session.
    pub play_boredom_relief: f32,
    /// Mischief removed by a play session.
    pub play_mischief_relief: f32,
    /// Trust gained from a play session.
    pub play_trust_gain: f32,
    /// Extra boredom removed by the child's favorite activity.
    pub favorite_activity_boredom_bonus: f32,
    /// Comfort gained from being comforted.
    pub comfort_gain: f32,
    /// Trust gained from being comforted.
    pub comfort_trust_gain: f32,
    /// Trust above which a child-tier agent follows instructions.
    pub instruction_trust_threshold: f32,
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            feed_hunger_relief: 0.5,
            feed_comfort_gain: 0.05,
            favorite_food_comfort_bonus: 0.1,
            play_boredom_relief: 0.3,
            play_mischief_relief: 0.1,
            play_trust_gain: 0.05,
            favorite_activity_boredom_bonus: 0.1,
            comfort_gain: 0.3,
            comfort_trust_gain: 0.1,
            instruction_trust_threshold: 0.5,
        }
    }
}

impl CareConfig {
    /// Validate care amounts.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AgentError> {
        let amounts = [
            ("care.feed_hunger_relief", self.feed_hunger_relief),
            ("care.feed_comfort_gain", self.feed_comfort_gain),
            ("care.favorite_food_comfort_bonus", self.favorite_food_comfort_bonus),
            ("care.play_boredom_relief", self.play_boredom_relief),
            ("care.play_mischief_relief", self.play_mischief_relief),
            ("care.play_trust_gain", self.play_trust_gain),
            (
                "care.favorite_activity_boredom_bonus",
                self.favorite_activity_boredom_bonus,
            ),
            ("care.comfort_gain", self.comfort_gain),
            ("care.comfort_trust_gain", self.comfort_trust_gain),
            ("care.instruction_trust_threshold", self.instruction_trust_threshold),
        ];
        for (field, value) in amounts {
            check_unit(field, value)?;
        }
        Ok(())
    }
}
