//! Enumeration types for the Nursery simulation.
//!
//! Regimes, actions, and needs are closed sets. Every consumer (animation,
//! speech, audio, scoring) matches on them exhaustively, and the string
//! forms exist only at the persistence boundary.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Regime
// ---------------------------------------------------------------------------

/// One of the five top-level behavioral regimes of a child.
///
/// Ordered by escalation: a sleeping child is the calmest, a child in a
/// tantrum the most distressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Regime {
    /// Asleep; fatigue is recovering.
    Sleeping,
    /// Settled and choosing free-play activities.
    Content,
    /// Asking for something to address an urgent need.
    Needy,
    /// Distressed and acting out according to personality.
    Upset,
    /// Full meltdown.
    Tantrum,
}

impl Regime {
    /// All regimes in escalation order.
    pub const ALL: [Self; 5] = [
        Self::Sleeping,
        Self::Content,
        Self::Needy,
        Self::Upset,
        Self::Tantrum,
    ];

    /// Stable lowercase name used in snapshots and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sleeping => "sleeping",
            Self::Content => "content",
            Self::Needy => "needy",
            Self::Upset => "upset",
            Self::Tantrum => "tantrum",
        }
    }

    /// Look a regime up by its stable name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|regime| regime.as_str().eq_ignore_ascii_case(name))
    }
}

impl core::fmt::Display for Regime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// The concrete behavior a child is performing within its regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    // --- Sleeping ---
    /// Asleep in bed or wherever the child dropped off.
    Sleep,

    // --- Content ---
    /// Playing alone with whatever is nearby.
    PlayAlone,
    /// Watching television (only offered while the TV is on).
    WatchTv,
    /// Following the player around.
    FollowPlayer,
    /// Wandering off to explore.
    Explore,
    /// Sitting quietly.
    SitIdle,
    /// Playing with a sibling in the same room.
    PlayWithSibling,

    // --- Needy ---
    /// Asking for food.
    RequestFood,
    /// Asking for attention (also the fallback for fatigue).
    RequestAttention,
    /// Asking to be comforted.
    RequestComfort,

    // --- Upset ---
    /// Hiding somewhere.
    Hiding,
    /// Refusing to cooperate with anyone.
    RefusingInteraction,
    /// Breaking things on purpose.
    BreakingThings,
    /// Crying.
    Crying,

    // --- Tantrum ---
    /// Throwing objects.
    Throwing,
    /// Lying on the floor kicking and screaming.
    FloorTantrum,
    /// Screaming.
    Screaming,
}

impl Action {
    /// Every action, grouped by the regime that selects it.
    pub const ALL: [Self; 17] = [
        Self::Sleep,
        Self::PlayAlone,
        Self::WatchTv,
        Self::FollowPlayer,
        Self::Explore,
        Self::SitIdle,
        Self::PlayWithSibling,
        Self::RequestFood,
        Self::RequestAttention,
        Self::RequestComfort,
        Self::Hiding,
        Self::RefusingInteraction,
        Self::BreakingThings,
        Self::Crying,
        Self::Throwing,
        Self::FloorTantrum,
        Self::Screaming,
    ];

    /// Stable snake-case label used in snapshots and by animation/speech.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::PlayAlone => "play_alone",
            Self::WatchTv => "watch_tv",
            Self::FollowPlayer => "follow_player",
            Self::Explore => "explore",
            Self::SitIdle => "sit_idle",
            Self::PlayWithSibling => "play_with_sibling",
            Self::RequestFood => "request_food",
            Self::RequestAttention => "request_attention",
            Self::RequestComfort => "request_comfort",
            Self::Hiding => "hiding",
            Self::RefusingInteraction => "refusing_interaction",
            Self::BreakingThings => "breaking_things",
            Self::Crying => "crying",
            Self::Throwing => "throwing",
            Self::FloorTantrum => "floor_tantrum",
            Self::Screaming => "screaming",
        }
    }

    /// Look an action up by its stable label (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(name))
    }

    /// Whether this action reports distress to stress/audio consumers.
    pub const fn is_distress(self) -> bool {
        matches!(
            self,
            Self::Crying | Self::Screaming | Self::Throwing | Self::FloorTantrum
        )
    }

    /// Whether this action keeps the child engaged in an activity.
    pub const fn is_activity(self) -> bool {
        matches!(
            self,
            Self::PlayAlone
                | Self::WatchTv
                | Self::Explore
                | Self::PlayWithSibling
                | Self::FollowPlayer
        )
    }

    /// Whether a tantrum with this action can set off contagious crying.
    pub const fn is_audible_tantrum(self) -> bool {
        matches!(self, Self::Screaming | Self::FloorTantrum)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Need
// ---------------------------------------------------------------------------

/// The most pressing deficit of a child.
///
/// Declaration order is the tie-break order of `urgent_need`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Need {
    /// Hungry.
    Hunger,
    /// Bored.
    Boredom,
    /// Tired.
    Fatigue,
    /// Lacking comfort (measured as `1 - comfort`).
    Comfort,
}

impl Need {
    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hunger => "hunger",
            Self::Boredom => "boredom",
            Self::Fatigue => "fatigue",
            Self::Comfort => "comfort",
        }
    }
}

impl core::fmt::Display for Need {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AgeTier
// ---------------------------------------------------------------------------

/// Age class of a child, ordered by capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AgeTier {
    /// Cannot move or speak; signals only through distress.
    Infant,
    /// Moves and emits short fixed tokens.
    Toddler,
    /// Moves, speaks phrases, and follows instructions when trusting.
    Child,
}

impl AgeTier {
    /// All tiers in capability order.
    pub const ALL: [Self; 3] = [Self::Infant, Self::Toddler, Self::Child];

    /// Whether children of this tier can move between places on their own.
    pub const fn can_move(self) -> bool {
        !matches!(self, Self::Infant)
    }

    /// Whether children of this tier can produce words at all.
    pub const fn can_speak(self) -> bool {
        !matches!(self, Self::Infant)
    }

    /// Whether children of this tier can follow spoken instructions.
    pub const fn can_follow_instructions(self) -> bool {
        matches!(self, Self::Child)
    }
}

// ---------------------------------------------------------------------------
// TantrumPhase
// ---------------------------------------------------------------------------

/// Phase of the nested machine that runs while a child is in a tantrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TantrumPhase {
    /// Winding up; not yet loud enough to upset others.
    Building,
    /// Crying loudly enough to spread distress through the room.
    ContagiousCrying,
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Food the kitchen collaborator can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Food {
    /// A bottle or cup of milk.
    Milk,
    /// A bowl of porridge.
    Porridge,
    /// Sliced fruit.
    Fruit,
    /// A plate of pasta.
    Pasta,
    /// Cookies.
    Cookies,
}

impl Food {
    /// All foods.
    pub const ALL: [Self; 5] = [
        Self::Milk,
        Self::Porridge,
        Self::Fruit,
        Self::Pasta,
        Self::Cookies,
    ];
}

/// Activity the player can play with a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Activity {
    /// Building blocks.
    Blocks,
    /// Drawing and coloring.
    Drawing,
    /// Throwing and catching a ball.
    Ball,
    /// Playing pretend with dolls and figures.
    Pretend,
    /// Singing and music.
    Music,
}

impl Activity {
    /// All activities.
    pub const ALL: [Self; 5] = [
        Self::Blocks,
        Self::Drawing,
        Self::Ball,
        Self::Pretend,
        Self::Music,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_names_round_trip() {
        for regime in Regime::ALL {
            assert_eq!(Regime::from_name(regime.as_str()), Some(regime));
        }
        assert_eq!(Regime::from_name("TANTRUM"), Some(Regime::Tantrum));
        assert_eq!(Regime::from_name("napping"), None);
    }

    #[test]
    fn action_labels_are_unique() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.as_str()), Some(action));
        }
    }

    #[test]
    fn distress_actions() {
        let distress: Vec<Action> = Action::ALL.into_iter().filter(|a| a.is_distress()).collect();
        assert_eq!(
            distress,
            vec![
                Action::Crying,
                Action::Throwing,
                Action::FloorTantrum,
                Action::Screaming
            ]
        );
    }

    #[test]
    fn activity_actions() {
        let activities: Vec<Action> = Action::ALL.into_iter().filter(|a| a.is_activity()).collect();
        assert_eq!(activities.len(), 5);
        assert!(Action::FollowPlayer.is_activity());
        assert!(Action::PlayWithSibling.is_activity());
        assert!(!Action::SitIdle.is_activity());
        assert!(!Action::RequestAttention.is_activity());
    }

    #[test]
    fn tiers_are_ordered_by_capability() {
        assert!(AgeTier::Infant < AgeTier::Toddler);
        assert!(AgeTier::Toddler < AgeTier::Child);
        assert!(!AgeTier::Infant.can_move());
        assert!(AgeTier::Toddler.can_speak());
        assert!(!AgeTier::Toddler.can_follow_instructions());
        assert!(AgeTier::Child.can_follow_instructions());
    }

    #[test]
    fn need_order_is_tie_break_order() {
        assert!(Need::Hunger < Need::Boredom);
        assert!(Need::Boredom < Need::Fatigue);
        assert!(Need::Fatigue < Need::Comfort);
    }
}
