//! Utility-based action selection.
//!
//! Each regime maps `{mood, personality, situation}` to one concrete
//! [`Action`]. Content children score every free-play option and take the
//! best; the other regimes use short decision rules. Selection is a pure
//! function: the regime machine decides *when* to call it.

use nursery_types::{Action, Need, Personality, Regime};

use crate::emotion::EmotionalState;
use crate::situation::Situation;

/// Trait value above which an upset child acts on it.
const UPSET_TRAIT_THRESHOLD: f32 = 0.6;
/// Mischief above which an energetic upset child breaks things.
const UPSET_MISCHIEF_THRESHOLD: f32 = 0.5;
/// Trait value above which a tantrum takes that trait's shape.
const TANTRUM_TRAIT_THRESHOLD: f32 = 0.7;
/// Flat bonus for playing with a sibling.
const SIBLING_BONUS: f32 = 0.3;

/// Choose the action for `regime`.
pub fn select_action(
    regime: Regime,
    mood: &EmotionalState,
    personality: &Personality,
    situation: &Situation,
) -> Action {
    match regime {
        Regime::Sleeping => Action::Sleep,
        Regime::Content => select_content(mood, personality, situation),
        Regime::Needy => select_needy(mood),
        Regime::Upset => select_upset(mood, personality),
        Regime::Tantrum => select_tantrum(personality),
    }
}

/// Score every free-play option available right now, in listing order.
///
/// Options that are not on offer (TV off, no sibling) are left out.
pub fn content_scores(
    mood: &EmotionalState,
    personality: &Personality,
    situation: &Situation,
) -> Vec<(Action, f32)> {
    let boredom = mood.boredom();
    let fatigue = mood.fatigue();

    let mut scores = Vec::with_capacity(6);
    scores.push((Action::PlayAlone, 0.6 * boredom + 0.3 * (1.0 - fatigue)));
    if situation.tv_on {
        scores.push((Action::WatchTv, 0.4 * boredom + 0.3 * fatigue));
    }
    scores.push((
        Action::FollowPlayer,
        0.5 * personality.clinginess + 0.3 * (1.0 - mood.trust()),
    ));
    scores.push((Action::Explore, 0.5 * personality.curiosity + 0.3 * boredom));
    scores.push((Action::SitIdle, 0.6 * fatigue));
    if situation.sibling_nearby {
        scores.push((Action::PlayWithSibling, 0.5 * boredom + SIBLING_BONUS));
    }
    scores
}

/// Highest-scoring free-play option. Ties go to the option listed first.
fn select_content(
    mood: &EmotionalState,
    personality: &Personality,
    situation: &Situation,
) -> Action {
    let mut best = (Action::PlayAlone, f32::NEG_INFINITY);
    for (action, score) in content_scores(mood, personality, situation) {
        if score > best.1 {
            best = (action, score);
        }
    }
    best.0
}

/// Ask for whatever addresses the most urgent need.
///
/// There is no request for rest; a tired child asks for attention.
const fn select_needy_for(need: Need) -> Action {
    match need {
        Need::Hunger => Action::RequestFood,
        Need::Comfort => Action::RequestComfort,
        Need::Boredom | Need::Fatigue => Action::RequestAttention,
    }
}

fn select_needy(mood: &EmotionalState) -> Action {
    select_needy_for(mood.urgent_need())
}

fn select_upset(mood: &EmotionalState, personality: &Personality) -> Action {
    if personality.shyness > UPSET_TRAIT_THRESHOLD {
        Action::Hiding
    } else if personality.stubbornness > UPSET_TRAIT_THRESHOLD {
        Action::RefusingInteraction
    } else if personality.energy > UPSET_TRAIT_THRESHOLD
        && mood.mischief() > UPSET_MISCHIEF_THRESHOLD
    {
        Action::BreakingThings
    } else {
        Action::Crying
    }
}

fn select_tantrum(personality: &Personality) -> Action {
    if personality.energy > TANTRUM_TRAIT_THRESHOLD {
        Action::Throwing
    } else if personality.stubbornness > TANTRUM_TRAIT_THRESHOLD {
        Action::FloorTantrum
    } else {
        Action::Screaming
    }
}
