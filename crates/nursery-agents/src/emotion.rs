//! The continuous emotional model of a child.
//!
//! An [`EmotionalState`] holds six scalars in `[0.0, 1.0]`:
//!
//! - `hunger`, `boredom`, `fatigue` -- deficits that grow while awake
//! - `trust` -- confidence in the caregiver, eroded by neglect
//! - `mischief` -- urge to misbehave, fed by boredom
//! - `comfort` -- emotional security, always draining toward zero
//!
//! Two quantities are derived rather than stored: [`wellbeing`] (a
//! weighted composite) and [`urgent_need`] (the largest deficit).
//!
//! All drift is expressed per second and scaled by the elapsed step, so
//! one 1.0s step and ten 0.1s steps land on the same state. Every mutation
//! clamps, so no sequence of updates or deltas can leave the unit
//! interval. Non-finite inputs are treated as "no change".
//!
//! [`wellbeing`]: EmotionalState::wellbeing
//! [`urgent_need`]: EmotionalState::urgent_need

use nursery_types::Need;
use serde::{Deserialize, Serialize};

use crate::config::MoodConfig;

/// Weight of `1 - hunger` in the wellbeing composite.
const WELLBEING_HUNGER: f32 = 0.25;
/// Weight of `1 - boredom` in the wellbeing composite.
const WELLBEING_BOREDOM: f32 = 0.20;
/// Weight of `1 - fatigue` in the wellbeing composite.
const WELLBEING_FATIGUE: f32 = 0.15;
/// Weight of `trust` in the wellbeing composite.
const WELLBEING_TRUST: f32 = 0.20;
/// Weight of `comfort` in the wellbeing composite.
const WELLBEING_COMFORT: f32 = 0.20;

/// Clamp into `[0, 1]`, mapping NaN to zero.
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Move `value` by `delta` and clamp. A non-finite delta is ignored.
fn shift(value: f32, delta: f32) -> f32 {
    if delta.is_finite() {
        clamp_unit(value + delta)
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// MoodDelta
// ---------------------------------------------------------------------------

/// A bounded adjustment to an [`EmotionalState`], applied with
/// [`EmotionalState::apply`].
///
/// Deltas are additive: the interaction pass sums several of them per
/// agent before applying the total once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodDelta {
    /// Change to hunger.
    pub hunger: f32,
    /// Change to boredom.
    pub boredom: f32,
    /// Change to fatigue.
    pub fatigue: f32,
    /// Change to trust.
    pub trust: f32,
    /// Change to mischief.
    pub mischief: f32,
    /// Change to comfort.
    pub comfort: f32,
}

impl MoodDelta {
    /// The empty delta.
    pub const ZERO: Self = Self {
        hunger: 0.0,
        boredom: 0.0,
        fatigue: 0.0,
        trust: 0.0,
        mischief: 0.0,
        comfort: 0.0,
    };

    /// Whether applying this delta would change nothing.
    pub fn is_zero(&self) -> bool {
        [
            self.hunger,
            self.boredom,
            self.fatigue,
            self.trust,
            self.mischief,
            self.comfort,
        ]
        .iter()
        .all(|v| v.abs() <= f32::EPSILON)
    }
}

impl core::ops::AddAssign for MoodDelta {
    fn add_assign(&mut self, rhs: Self) {
        self.hunger += rhs.hunger;
        self.boredom += rhs.boredom;
        self.fatigue += rhs.fatigue;
        self.trust += rhs.trust;
        self.mischief += rhs.mischief;
        self.comfort += rhs.comfort;
    }
}

// ---------------------------------------------------------------------------
// EmotionalState
// ---------------------------------------------------------------------------

/// Serialized form of [`EmotionalState`]; clamped on the way in.
#[derive(Deserialize)]
struct RawEmotionalState {
    hunger: f32,
    boredom: f32,
    fatigue: f32,
    trust: f32,
    mischief: f32,
    comfort: f32,
}

impl From<RawEmotionalState> for EmotionalState {
    fn from(raw: RawEmotionalState) -> Self {
        Self {
            hunger: clamp_unit(raw.hunger),
            boredom: clamp_unit(raw.boredom),
            fatigue: clamp_unit(raw.fatigue),
            trust: clamp_unit(raw.trust),
            mischief: clamp_unit(raw.mischief),
            comfort: clamp_unit(raw.comfort),
        }
    }
}

/// Six bounded emotional scalars owned by exactly one agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEmotionalState")]
pub struct EmotionalState {
    hunger: f32,
    boredom: f32,
    fatigue: f32,
    trust: f32,
    mischief: f32,
    comfort: f32,
}

impl Default for EmotionalState {
    /// A rested, fed, reasonably secure child.
    fn default() -> Self {
        Self {
            hunger: 0.2,
            boredom: 0.2,
            fatigue: 0.2,
            trust: 0.6,
            mischief: 0.1,
            comfort: 0.7,
        }
    }
}

impl EmotionalState {
    /// Build a state from explicit values, clamping each into `[0, 1]`.
    pub fn new(
        hunger: f32,
        boredom: f32,
        fatigue: f32,
        trust: f32,
        mischief: f32,
        comfort: f32,
    ) -> Self {
        Self::from(RawEmotionalState {
            hunger,
            boredom,
            fatigue,
            trust,
            mischief,
            comfort,
        })
    }

    /// Replace hunger (clamped).
    #[must_use]
    pub fn with_hunger(mut self, value: f32) -> Self {
        self.hunger = clamp_unit(value);
        self
    }

    /// Replace boredom (clamped).
    #[must_use]
    pub fn with_boredom(mut self, value: f32) -> Self {
        self.boredom = clamp_unit(value);
        self
    }

    /// Replace fatigue (clamped).
    #[must_use]
    pub fn with_fatigue(mut self, value: f32) -> Self {
        self.fatigue = clamp_unit(value);
        self
    }

    /// Replace trust (clamped).
    #[must_use]
    pub fn with_trust(mut self, value: f32) -> Self {
        self.trust = clamp_unit(value);
        self
    }

    /// Replace mischief (clamped).
    #[must_use]
    pub fn with_mischief(mut self, value: f32) -> Self {
        self.mischief = clamp_unit(value);
        self
    }

    /// Replace comfort (clamped).
    #[must_use]
    pub fn with_comfort(mut self, value: f32) -> Self {
        self.comfort = clamp_unit(value);
        self
    }

    /// Current hunger.
    pub const fn hunger(&self) -> f32 {
        self.hunger
    }

    /// Current boredom.
    pub const fn boredom(&self) -> f32 {
        self.boredom
    }

    /// Current fatigue.
    pub const fn fatigue(&self) -> f32 {
        self.fatigue
    }

    /// Current trust.
    pub const fn trust(&self) -> f32 {
        self.trust
    }

    /// Current mischief.
    pub const fn mischief(&self) -> f32 {
        self.mischief
    }

    /// Current comfort.
    pub const fn comfort(&self) -> f32 {
        self.comfort
    }

    /// All six scalars in declaration order.
    pub const fn values(&self) -> [f32; 6] {
        [
            self.hunger,
            self.boredom,
            self.fatigue,
            self.trust,
            self.mischief,
            self.comfort,
        ]
    }

    /// Advance every scalar by `dt` simulated seconds.
    ///
    /// The branch conditions (asleep, engaged, held, and the mischief
    /// gate on boredom/fatigue) are read once at the start of the step.
    /// A negative or non-finite `dt` is treated as zero.
    pub fn update(
        &mut self,
        dt: f32,
        is_asleep: bool,
        is_engaged: bool,
        is_held: bool,
        rates: &MoodConfig,
    ) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let mischief_building = self.boredom > rates.mischief_boredom_threshold
            && self.fatigue < rates.mischief_fatigue_ceiling;

        if is_asleep {
            self.hunger = shift(self.hunger, rates.hunger_rate * rates.hunger_sleep_factor * dt);
            self.boredom = shift(self.boredom, -rates.boredom_sleep_recovery * dt);
            self.fatigue = shift(self.fatigue, -rates.fatigue_sleep_recovery * dt);
            self.mischief = shift(self.mischief, -rates.mischief_sleep_decay * dt);
        } else {
            self.hunger = shift(self.hunger, rates.hunger_rate * dt);
            let boredom_rate = if is_engaged {
                -rates.boredom_activity_recovery
            } else {
                rates.boredom_rate
            };
            self.boredom = shift(self.boredom, boredom_rate * dt);
            self.fatigue = shift(self.fatigue, rates.fatigue_rate * dt);
            let mischief_rate = if mischief_building {
                rates.mischief_rate
            } else {
                -rates.mischief_decay
            };
            self.mischief = shift(self.mischief, mischief_rate * dt);
        }

        let trust_rate = if is_held {
            rates.trust_held_gain
        } else {
            -rates.trust_decay
        };
        self.trust = shift(self.trust, trust_rate * dt);
        self.comfort = shift(self.comfort, -rates.comfort_decay * dt);
    }

    /// Add a bounded delta to every scalar, clamping each one.
    pub fn apply(&mut self, delta: &MoodDelta) {
        self.hunger = shift(self.hunger, delta.hunger);
        self.boredom = shift(self.boredom, delta.boredom);
        self.fatigue = shift(self.fatigue, delta.fatigue);
        self.trust = shift(self.trust, delta.trust);
        self.mischief = shift(self.mischief, delta.mischief);
        self.comfort = shift(self.comfort, delta.comfort);
    }

    /// Composite wellbeing in `[0, 1]`.
    ///
    /// ```text
    /// 0.25·(1−hunger) + 0.20·(1−boredom) + 0.15·(1−fatigue) + 0.20·trust + 0.20·comfort
    /// ```
    ///
    /// Mischief does not contribute.
    pub fn wellbeing(&self) -> f32 {
        WELLBEING_HUNGER * (1.0 - self.hunger)
            + WELLBEING_BOREDOM * (1.0 - self.boredom)
            + WELLBEING_FATIGUE * (1.0 - self.fatigue)
            + WELLBEING_TRUST * self.trust
            + WELLBEING_COMFORT * self.comfort
    }

    /// The largest deficit among hunger, boredom, fatigue, and `1 − comfort`.
    ///
    /// Ties go to the earlier need in that order.
    pub fn urgent_need(&self) -> Need {
        let candidates = [
            (Need::Boredom, self.boredom),
            (Need::Fatigue, self.fatigue),
            (Need::Comfort, 1.0 - self.comfort),
        ];
        let mut best = (Need::Hunger, self.hunger);
        for candidate in candidates {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }

    /// Whether any need is pressing at `threshold`.
    ///
    /// True if hunger, boredom, fatigue, or mischief exceeds `threshold`,
    /// or comfort is below `1 − threshold`.
    pub fn has_urgent_need(&self, threshold: f32) -> bool {
        self.hunger > threshold
            || self.boredom > threshold
            || self.fatigue > threshold
            || self.comfort < 1.0 - threshold
            || self.mischief > threshold
    }

    /// Whether the child is in crisis at `threshold`.
    ///
    /// True if hunger or fatigue exceeds `threshold`, or trust is below
    /// `1 − threshold`.
    pub fn is_critical(&self, threshold: f32) -> bool {
        self.hunger > threshold || self.fatigue > threshold || self.trust < 1.0 - threshold
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn wellbeing_reference_value() {
        // 0.25*0.8 + 0.20*0.9 + 0.15*0.7 + 0.20*0.5 + 0.20*0.8
        let state = EmotionalState::new(0.2, 0.1, 0.3, 0.5, 0.9, 0.8);
        assert!((state.wellbeing() - 0.745).abs() < 1e-6);
    }

    #[test]
    fn wellbeing_ignores_mischief() {
        let calm = EmotionalState::default().with_mischief(0.0);
        let wild = calm.with_mischief(1.0);
        assert_eq!(calm.wellbeing(), wild.wellbeing());
    }

    #[test]
    fn wellbeing_extremes() {
        let best = EmotionalState::new(0.0, 0.0, 0.0, 1.0, 0.0, 1.0);
        let worst = EmotionalState::new(1.0, 1.0, 1.0, 0.0, 1.0, 0.0);
        assert_close(best.wellbeing(), 1.0);
        assert_close(worst.wellbeing(), 0.0);
    }

    #[test]
    fn urgent_need_tie_goes_to_hunger() {
        let state = EmotionalState::new(0.6, 0.6, 0.6, 0.5, 0.0, 0.4);
        assert_eq!(state.urgent_need(), Need::Hunger);
    }

    #[test]
    fn urgent_need_tie_between_later_needs() {
        let state = EmotionalState::new(0.1, 0.7, 0.7, 0.5, 0.0, 0.3);
        assert_eq!(state.urgent_need(), Need::Boredom);
    }

    #[test]
    fn urgent_need_comfort_deficit() {
        let state = EmotionalState::new(0.1, 0.1, 0.1, 0.5, 0.0, 0.2);
        assert_eq!(state.urgent_need(), Need::Comfort);
    }

    #[test]
    fn has_urgent_need_checks_mischief_and_comfort() {
        let base = EmotionalState::new(0.1, 0.1, 0.1, 0.5, 0.1, 0.9);
        assert!(!base.has_urgent_need(0.7));
        assert!(base.with_mischief(0.75).has_urgent_need(0.7));
        assert!(base.with_comfort(0.25).has_urgent_need(0.7));
        assert!(base.with_fatigue(0.71).has_urgent_need(0.7));
    }

    #[test]
    fn is_critical_checks_trust() {
        let base = EmotionalState::new(0.1, 0.9, 0.1, 0.5, 0.9, 0.0);
        assert!(!base.is_critical(0.85));
        assert!(base.with_trust(0.1).is_critical(0.85));
        assert!(base.with_hunger(0.9).is_critical(0.85));
    }

    #[test]
    fn awake_update_grows_needs() {
        let rates = MoodConfig::default();
        let mut state = EmotionalState::new(0.2, 0.2, 0.2, 0.5, 0.2, 0.5);
        state.update(10.0, false, false, false, &rates);
        assert_close(state.hunger(), 0.2 + rates.hunger_rate * 10.0);
        assert_close(state.boredom(), 0.2 + rates.boredom_rate * 10.0);
        assert_close(state.fatigue(), 0.2 + rates.fatigue_rate * 10.0);
        assert_close(state.trust(), 0.5 - rates.trust_decay * 10.0);
        assert_close(state.comfort(), 0.5 - rates.comfort_decay * 10.0);
        // Not bored enough for mischief to build.
        assert_close(state.mischief(), 0.2 - rates.mischief_decay * 10.0);
    }

    #[test]
    fn engaged_boredom_shrinks_faster_than_it_grows() {
        let rates = MoodConfig::default();
        let mut idle = EmotionalState::default().with_boredom(0.5);
        let mut playing = idle;
        idle.update(5.0, false, false, false, &rates);
        playing.update(5.0, false, true, false, &rates);
        assert!(playing.boredom() < 0.5);
        assert!(0.5 - playing.boredom() > idle.boredom() - 0.5);
    }

    #[test]
    fn sleep_recovers_fatigue_boredom_and_mischief() {
        let rates = MoodConfig::default();
        let mut state = EmotionalState::new(0.2, 0.6, 0.9, 0.5, 0.6, 0.5);
        state.update(10.0, true, false, false, &rates);
        assert!(state.fatigue() < 0.9);
        assert!(state.boredom() < 0.6);
        assert!(state.mischief() < 0.6);
        assert_close(
            state.hunger(),
            0.2 + rates.hunger_rate * rates.hunger_sleep_factor * 10.0,
        );
    }

    #[test]
    fn mischief_builds_only_when_bored_and_fresh() {
        let rates = MoodConfig::default();
        let mut bored = EmotionalState::default().with_boredom(0.8).with_fatigue(0.2);
        let mut tired = bored.with_fatigue(0.8);
        bored.update(1.0, false, false, false, &rates);
        tired.update(1.0, false, false, false, &rates);
        assert!(bored.mischief() > 0.1);
        assert!(tired.mischief() < 0.1);
    }

    #[test]
    fn holding_stops_trust_decay() {
        let rates = MoodConfig::default();
        let mut held = EmotionalState::default();
        let mut alone = held;
        held.update(5.0, false, false, true, &rates);
        alone.update(5.0, false, false, false, &rates);
        assert!(held.trust() >= 0.6);
        assert!(alone.trust() < 0.6);
    }

    #[test]
    fn apply_clamps_and_ignores_nan() {
        let mut state = EmotionalState::default();
        state.apply(&MoodDelta {
            hunger: -5.0,
            comfort: 5.0,
            trust: f32::NAN,
            ..MoodDelta::ZERO
        });
        assert_eq!(state.hunger(), 0.0);
        assert_eq!(state.comfort(), 1.0);
        assert_eq!(state.trust(), 0.6);
    }

    #[test]
    fn negative_and_nan_dt_are_noops() {
        let rates = MoodConfig::default();
        let original = EmotionalState::default();
        let mut state = original;
        state.update(-1.0, false, false, false, &rates);
        state.update(f32::NAN, false, false, false, &rates);
        assert_eq!(state, original);
    }

    #[test]
    fn one_big_step_matches_ten_small_steps() {
        let rates = MoodConfig::default();
        let start = EmotionalState::new(0.3, 0.3, 0.4, 0.5, 0.2, 0.6);
        for (asleep, engaged, held) in [
            (false, false, false),
            (false, true, true),
            (true, false, false),
        ] {
            let mut coarse = start;
            coarse.update(1.0, asleep, engaged, held, &rates);
            let mut fine = start;
            for _ in 0..10 {
                fine.update(0.1, asleep, engaged, held, &rates);
            }
            for (a, b) in coarse.values().iter().zip(fine.values().iter()) {
                assert!((a - b).abs() < 1e-5, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn deserialization_clamps() {
        let json = r#"{"hunger":1.5,"boredom":-0.2,"fatigue":0.5,"trust":0.5,"mischief":0.0,"comfort":0.5}"#;
        let state: EmotionalState = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(state.hunger(), 1.0);
        assert_eq!(state.boredom(), 0.0);
    }

    #[test]
    fn deltas_accumulate() {
        let mut total = MoodDelta::ZERO;
        assert!(total.is_zero());
        total += MoodDelta {
            comfort: -0.1,
            ..MoodDelta::ZERO
        };
        total += MoodDelta {
            comfort: -0.05,
            trust: -0.02,
            ..MoodDelta::ZERO
        };
        assert_close(total.comfort, -0.15);
        assert_close(total.trust, -0.02);
        assert!(!total.is_zero());
    }

    fn arb_rates() -> impl Strategy<Value = MoodConfig> {
        (
            prop::array::uniform12(0.0_f32..2.0),
            0.0_f32..=1.0,
            0.0_f32..=1.0,
            0.0_f32..=1.0,
        )
            .prop_map(|(r, sleep_factor, boredom_gate, fatigue_gate)| {
                let [a, b, c, d, e, f, g, h, i, j, k, l] = r;
                MoodConfig {
                    hunger_rate: a,
                    hunger_sleep_factor: sleep_factor,
                    boredom_rate: b,
                    boredom_activity_recovery: b + c + 0.01,
                    boredom_sleep_recovery: d,
                    fatigue_rate: e,
                    fatigue_sleep_recovery: f,
                    mischief_rate: g,
                    mischief_decay: h,
                    mischief_sleep_decay: i,
                    mischief_boredom_threshold: boredom_gate,
                    mischief_fatigue_ceiling: fatigue_gate,
                    trust_decay: j,
                    trust_held_gain: k,
                    comfort_decay: l,
                }
            })
    }

    proptest! {
        #[test]
        fn update_stays_in_unit_interval(
            rates in arb_rates(),
            start in prop::array::uniform6(0.0_f32..=1.0),
            dt in 0.0_f32..1000.0,
            asleep: bool,
            engaged: bool,
            held: bool,
        ) {
            prop_assert!(rates.validate().is_ok());
            let [h, b, f, t, m, c] = start;
            let mut state = EmotionalState::new(h, b, f, t, m, c);
            state.update(dt, asleep, engaged, held, &rates);
            for v in state.values() {
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }

        #[test]
        fn apply_stays_in_unit_interval(
            start in prop::array::uniform6(0.0_f32..=1.0),
            delta in prop::array::uniform6(-3.0_f32..3.0),
        ) {
            let [h, b, f, t, m, c] = start;
            let mut state = EmotionalState::new(h, b, f, t, m, c);
            let [dh, db, df, dt, dm, dc] = delta;
            state.apply(&MoodDelta {
                hunger: dh,
                boredom: db,
                fatigue: df,
                trust: dt,
                mischief: dm,
                comfort: dc,
            });
            for v in state.values() {
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
