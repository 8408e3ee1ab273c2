//! Static per-child personality.
//!
//! A [`Personality`] is generated once per child from the session seed and
//! never changes afterwards. It is read-only input to the action selector
//! and to the care operations.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Activity, AgeTier, Food};

/// Things a child likes more than others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Preferences {
    /// Food that comforts this child more than any other.
    pub favorite_food: Food,
    /// Activity that relieves this child's boredom fastest.
    pub favorite_activity: Activity,
}

/// Immutable personality traits of one child.
///
/// All five trait scalars lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Personality {
    /// Age class, which gates movement, speech, and instruction-following.
    pub age_tier: AgeTier,
    /// Tendency to withdraw and hide when upset.
    pub shyness: f32,
    /// Drive to explore.
    pub curiosity: f32,
    /// Physical energy; energetic children act out more violently.
    pub energy: f32,
    /// Desire to stay close to the player.
    pub clinginess: f32,
    /// Resistance to being talked out of a mood.
    pub stubbornness: f32,
    /// Food and activity preferences.
    pub preferences: Preferences,
}

impl Personality {
    /// A mid-range personality (all traits at 0.5) for the given tier.
    pub const fn balanced(age_tier: AgeTier) -> Self {
        Self {
            age_tier,
            shyness: 0.5,
            curiosity: 0.5,
            energy: 0.5,
            clinginess: 0.5,
            stubbornness: 0.5,
            preferences: Preferences {
                favorite_food: Food::Fruit,
                favorite_activity: Activity::Blocks,
            },
        }
    }

    /// Whether every trait scalar is finite and inside `[0.0, 1.0]`.
    pub fn is_valid(&self) -> bool {
        [
            self.shyness,
            self.curiosity,
            self.energy,
            self.clinginess,
            self.stubbornness,
        ]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::balanced(AgeTier::Toddler)
    }
}
